//! Perspective camera with damped orbit controls around a target point.

use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;

/// Keeps the camera off the poles so `look_at` never degenerates.
const POLAR_EPSILON: f32 = 1e-6;
/// Zoom step per wheel notch at `zoom_speed` 1.
const ZOOM_STEP: f32 = 0.95;

pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fov_y_degrees: config.fov_y_degrees,
            aspect,
            near: config.near,
            far: config.far,
            position: Vec3::from(config.position),
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view(&self, target: Vec3) -> Mat4 {
        Mat4::look_at_rh(self.position, target, Vec3::Y)
    }

    pub fn view_proj(&self, target: Vec3) -> Mat4 {
        self.projection() * self.view(target)
    }

    /// Inverse of the view-projection with the translation removed, used to
    /// turn screen positions into skybox directions.
    pub fn sky_inverse_view_proj(&self, target: Vec3) -> Mat4 {
        let mut view = self.view(target);
        view.w_axis = glam::Vec4::W;
        (self.projection() * view).inverse()
    }
}

/// Radius / polar angle (from +Y) / azimuth (around +Y, from +Z).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Orbit / zoom / pan around `target`. Input accumulates into pending deltas
/// which `update` eases in by `damping_factor` each frame.
pub struct OrbitControls {
    pub target: Vec3,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl OrbitControls {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            target: Vec3::from(config.target),
            damping_factor: config.damping_factor,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    /// Pointer drag in pixels; a drag across the full viewport height turns a full circle.
    pub fn rotate(&mut self, drag: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let per_pixel = std::f32::consts::TAU / viewport_height * self.rotate_speed;
        self.theta_delta -= drag.x * per_pixel;
        self.phi_delta -= drag.y * per_pixel;
    }

    /// Wheel notches, positive toward the target.
    pub fn zoom(&mut self, notches: f32) {
        self.scale *= ZOOM_STEP.powf(self.zoom_speed * notches);
    }

    /// Pointer drag in pixels, moving the target in the camera's view plane.
    pub fn pan(&mut self, drag: Vec2, camera: &PerspectiveCamera, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let offset = camera.position - self.target;
        let target_distance = offset.length() * (camera.fov_y_degrees.to_radians() * 0.5).tan();
        let view = camera.view(self.target);
        let right = Vec3::new(view.x_axis.x, view.y_axis.x, view.z_axis.x);
        let up = Vec3::new(view.x_axis.y, view.y_axis.y, view.z_axis.y);

        let scale = 2.0 * target_distance / viewport_height * self.pan_speed;
        self.pan_offset += right * (-drag.x * scale) + up * (drag.y * scale);
    }

    /// Eases pending input into the camera position. Call once per frame.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        spherical.theta += self.theta_delta * self.damping_factor;
        spherical.phi += self.phi_delta * self.damping_factor;
        spherical.phi = spherical.phi.clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);

        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * self.damping_factor;
        camera.position = self.target + spherical.to_offset();

        let decay = 1.0 - self.damping_factor;
        self.theta_delta *= decay;
        self.phi_delta *= decay;
        self.pan_offset *= decay;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PerspectiveCamera, OrbitControls) {
        let config = CameraConfig::default();
        (PerspectiveCamera::new(&config, 16.0 / 9.0), OrbitControls::new(&config))
    }

    #[test]
    fn idle_update_keeps_position() {
        let (mut camera, mut controls) = setup();
        for _ in 0..10 {
            controls.update(&mut camera);
        }
        assert!((camera.position - Vec3::new(0.0, 2.5, 5.0)).length() < 1e-4);
    }

    #[test]
    fn spherical_round_trip() {
        let offset = Vec3::new(1.0, 2.0, -3.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).length() < 1e-5);
    }

    #[test]
    fn rotation_eases_in_and_keeps_distance() {
        let (mut camera, mut controls) = setup();
        let start_distance = (camera.position - controls.target).length();
        controls.rotate(Vec2::new(100.0, 0.0), 720.0);

        controls.update(&mut camera);
        let first = camera.position;
        for _ in 0..200 {
            controls.update(&mut camera);
        }
        let settled = camera.position;

        assert_ne!(first, settled);
        assert!(((settled - controls.target).length() - start_distance).abs() < 1e-3);
        // A rightward drag orbits toward -X.
        assert!(settled.x < 0.0);
    }

    #[test]
    fn phi_is_clamped_off_the_pole() {
        let (mut camera, mut controls) = setup();
        controls.rotate(Vec2::new(0.0, 100_000.0), 720.0);
        for _ in 0..50 {
            controls.update(&mut camera);
        }
        let offset = camera.position - controls.target;
        assert!(offset.y > 0.0);
        assert!(camera.view(controls.target).is_finite());
    }

    #[test]
    fn zoom_is_clamped() {
        let (mut camera, mut controls) = setup();
        controls.zoom(1000.0);
        controls.update(&mut camera);
        let distance = (camera.position - controls.target).length();
        assert!((distance - controls.min_distance).abs() < 1e-4);
    }

    #[test]
    fn resize_updates_aspect() {
        let (mut camera, _) = setup();
        camera.set_viewport(800, 400);
        assert_eq!(camera.aspect, 2.0);
        camera.set_viewport(0, 400);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn sky_matrix_ignores_camera_translation() {
        let (camera, controls) = setup();
        let a = camera.sky_inverse_view_proj(controls.target);
        let dir = a * glam::Vec4::new(0.0, 0.0, 1.0, 1.0);
        let dir = (dir.truncate() / dir.w).normalize();
        let forward = (controls.target - camera.position).normalize();
        assert!(dir.dot(forward) > 0.999);
    }
}
