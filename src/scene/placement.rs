//! Where each loaded model sits in the pool scene.

use std::f32::consts::PI;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::model::NodeTransform;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotation about one of the node's own axes, in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalRotation {
    pub axis: Axis,
    pub angle: f32,
}

impl LocalRotation {
    pub fn new(axis: Axis, angle: f32) -> Self {
        Self { axis, angle }
    }

    pub fn quat(&self) -> Quat {
        match self.axis {
            Axis::X => Quat::from_rotation_x(self.angle),
            Axis::Y => Quat::from_rotation_y(self.angle),
            Axis::Z => Quat::from_rotation_z(self.angle),
        }
    }
}

/// Overrides applied to the first root node of a model file.
///
/// Scale replaces the node's scale, each `Some` position component replaces
/// that component of its translation, and rotations are applied in order on
/// top of its existing rotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelPlacement {
    pub name: String,
    pub file: String,
    #[serde(default)]
    pub scale: Option<[f32; 3]>,
    #[serde(default)]
    pub position: [Option<f32>; 3],
    #[serde(default)]
    pub rotations: Vec<LocalRotation>,
    /// Plays the file's first animation clip when it has one.
    #[serde(default = "default_animate")]
    pub animate: bool,
}

fn default_animate() -> bool {
    true
}

impl ModelPlacement {
    pub fn apply(&self, transform: &mut NodeTransform) {
        if let Some(scale) = self.scale {
            transform.scale = Vec3::from(scale);
        }

        for (axis, value) in self.position.iter().enumerate() {
            if let Some(value) = value {
                transform.translation[axis] = *value;
            }
        }

        for rotation in &self.rotations {
            transform.rotation = (transform.rotation * rotation.quat()).normalize();
        }
    }
}

/// Ball, pool and the three ducks.
pub fn default_placements() -> Vec<ModelPlacement> {
    vec![
        ModelPlacement {
            name: "luxo_ball".to_string(),
            file: "pixar_luxo_ball.glb".to_string(),
            scale: Some([0.25, 0.25, 0.25]),
            position: [Some(-2.9), Some(0.25), Some(0.15)],
            rotations: Vec::new(),
            animate: true,
        },
        ModelPlacement {
            name: "pool".to_string(),
            file: "just_a_pool.glb".to_string(),
            scale: Some([0.025, 0.025, 0.008]),
            position: [None, None, None],
            rotations: vec![LocalRotation::new(Axis::Y, PI)],
            animate: true,
        },
        ModelPlacement {
            name: "lowpoly_duck".to_string(),
            file: "lowpoly_duck_animated.glb".to_string(),
            scale: Some([1.0, 1.0, 1.0]),
            position: [Some(-3.5), Some(0.0), Some(0.5)],
            rotations: vec![
                LocalRotation::new(Axis::Z, 3.0 * PI / 2.0),
                LocalRotation::new(Axis::Y, 3.2 * PI / 2.0),
                LocalRotation::new(Axis::X, -1.2),
            ],
            animate: false,
        },
        ModelPlacement {
            name: "realistic_duck".to_string(),
            file: "duck_animation.glb".to_string(),
            scale: Some([0.6, 0.6, 0.6]),
            position: [Some(-0.8), Some(0.0), Some(-1.1)],
            rotations: Vec::new(),
            animate: true,
        },
        ModelPlacement {
            name: "rubber_duck".to_string(),
            file: "Rubber_Duck.glb".to_string(),
            scale: Some([0.002, 0.002, 0.002]),
            position: [Some(2.5), Some(0.7), None],
            rotations: Vec::new(),
            animate: true,
        },
    ]
}
