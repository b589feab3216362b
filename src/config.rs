use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::SceneResult;
use crate::resource_path::find_resource;
use crate::scene::placement::{default_placements, ModelPlacement};
use crate::shading::OctaveParams;

pub const CONFIG_FILE_NAME: &str = "scene.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub asset_dir: String,
    pub skybox_dir: String,
    pub clear_color: [f64; 4],
    pub camera: CameraConfig,
    pub water: PlaneConfig,
    pub ground: PlaneConfig,
    pub noise: OctaveParams,
    pub models: Vec<ModelPlacement>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            asset_dir: "assets".to_string(),
            skybox_dir: "images".to_string(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            camera: CameraConfig::default(),
            water: PlaneConfig::default(),
            ground: PlaneConfig::default(),
            noise: OctaveParams::default(),
            models: default_placements(),
        }
    }
}

impl SceneConfig {
    pub fn load_from_file(path: &Path) -> SceneResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: SceneConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `scene.json` when one is found next to the binary's working directory,
    /// otherwise the built-in composition.
    pub fn load_or_default() -> Self {
        let Some(path) = find_resource(CONFIG_FILE_NAME) else {
            log::info!("No {} found, using built-in scene", CONFIG_FILE_NAME);
            return Self::default();
        };

        match Self::load_from_file(&path) {
            Ok(config) => {
                log::info!("Loaded scene config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Duck Pond".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 2.5, 5.0],
            target: [0.0, 1.0, 0.0],
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.1,
            max_distance: 500.0,
        }
    }
}

/// A subdivided square laid flat on the ground (XY plane rotated onto XZ).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Uniform scale of the plane's local X and Y axes.
    pub scale: f32,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            width: 3.0,
            height: 3.0,
            width_segments: 100,
            height_segments: 100,
            scale: 5.0,
        }
    }
}

impl PlaneConfig {
    /// Value of the `u_dimensions` uniform.
    pub fn dimensions(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::new(self.scale, self.scale, 1.0),
            Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            Vec3::ZERO,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::OctaveScaling;

    #[test]
    fn empty_json_is_the_default_scene() {
        let config = SceneConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.models.len(), 5);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SceneConfig::from_json_str(
            r#"{ "noise": { "scaling": "fractal" }, "camera": { "fov_y_degrees": 60.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.noise.scaling, OctaveScaling::Fractal);
        assert_eq!(config.noise.octaves, 5);
        assert_eq!(config.camera.fov_y_degrees, 60.0);
        assert_eq!(config.camera.near, 0.1);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SceneConfig::from_json_str("{ \"window\": 3 }").unwrap_err();
        assert!(matches!(err, crate::error::SceneError::Config(_)));
    }

    #[test]
    fn plane_lies_flat_with_local_z_up() {
        let m = PlaneConfig::default().model_matrix();
        let corner = m.transform_point3(Vec3::new(1.5, 1.5, 0.0));
        assert!((corner - Vec3::new(7.5, 0.0, -7.5)).length() < 1e-5);
        let up = m.transform_vector3(Vec3::Z);
        assert!((up - Vec3::Y).length() < 1e-6);
    }
}
