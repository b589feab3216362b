//! Error type shared by scene setup, asset loading and the renderer.

/// Everything that can fail before or while the render loop runs.
///
/// The shading functions themselves are total and never produce one of these.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to find an appropriate adapter")]
    Adapter,

    #[error("Failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("Asset not found: {0}")]
    MissingAsset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load glTF file: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("Missing position data for mesh: {0}")]
    MissingPositions(String),

    #[error("glTF file has no scene: {0}")]
    EmptyScene(String),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cube map face {face} is {width}x{height}, expected {expected}x{expected}")]
    CubeFaceSize {
        face: String,
        width: u32,
        height: u32,
        expected: u32,
    },

    #[error("Invalid scene config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type SceneResult<T> = Result<T, SceneError>;
