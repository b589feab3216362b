use glam::{Vec2, Vec3, Vec4};

pub const GROUND_RADIUS_SQUARED: f32 = 1.2;
pub const GROUND_INSIDE: Vec4 = Vec4::new(0.1, 0.3, 0.1, 1.0);
pub const GROUND_OUTSIDE: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);

/// Pass-through: returns the model-space position and its x/y as `fs_uv`.
pub fn ground_vertex(position: Vec3) -> (Vec3, Vec2) {
    (position, position.truncate())
}

/// Dark green disc, yellow everywhere else. Hard edge.
pub fn ground_fragment(fs_uv: Vec2) -> Vec4 {
    if fs_uv.x * fs_uv.x + fs_uv.y * fs_uv.y <= GROUND_RADIUS_SQUARED {
        GROUND_INSIDE
    } else {
        GROUND_OUTSIDE
    }
}
