pub mod config;
pub mod error;
pub mod frame_loop;
pub mod input;
pub mod render;
pub mod scene;
pub mod shading;

pub mod app;
pub mod resource_path;
