pub mod layouts;
pub mod mesh;
pub mod pipelines;
pub mod renderer;
pub mod scene_renderer;
pub mod shaders;
pub mod textures;
pub mod types;

pub use renderer::WgpuRenderer;
pub use scene_renderer::SceneRenderer;
