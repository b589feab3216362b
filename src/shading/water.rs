//! Water surface: noise-displaced vertices, Voronoi-tinted fragments clipped
//! to a circular pool.

use glam::{Vec2, Vec3, Vec4};

use super::noise::{multi_octave_noise, OctaveParams};
use super::voronoi::voronoi;
use super::ShaderUniforms;

/// Horizontal scale applied to x/y before sampling the height noise.
pub const HEIGHT_SCALE: f32 = 2.0;
pub const VORONOI_MAGNIFICATION: f32 = 100.0;
pub const AMBIENT_LIGHT: f32 = 0.2;
/// Squared pool radius in the mesh's local units.
pub const POOL_RADIUS_SQUARED: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterVertex {
    /// Model-space position after displacement along local z.
    pub position: Vec3,
    /// Undisplaced x/y, handed to the fragment stage.
    pub fs_uv: Vec2,
}

pub fn water_height(x: f32, y: f32, uniforms: &ShaderUniforms, params: &OctaveParams) -> f32 {
    multi_octave_noise(x * HEIGHT_SCALE, y * HEIGHT_SCALE, uniforms.time, params)
}

pub fn water_vertex(position: Vec3, uniforms: &ShaderUniforms, params: &OctaveParams) -> WaterVertex {
    let height = water_height(position.x, position.y, uniforms, params);
    WaterVertex {
        position: Vec3::new(position.x, position.y, height),
        fs_uv: position.truncate(),
    }
}

/// Recentered, aspect-corrected surface coordinate fed to the Voronoi field.
pub fn water_uv(fs_uv: Vec2, dimensions: Vec2) -> Vec2 {
    let uv = fs_uv / dimensions - Vec2::splat(0.5);
    uv / Vec2::new(dimensions.y / dimensions.x, 1.0)
}

/// 1 inside the pool footprint, 0 outside; no soft edge.
pub fn pool_alpha(fs_uv: Vec2) -> f32 {
    if fs_uv.x * fs_uv.x + fs_uv.y * fs_uv.y <= POOL_RADIUS_SQUARED {
        1.0
    } else {
        0.0
    }
}

pub fn water_fragment(fs_uv: Vec2, uniforms: &ShaderUniforms) -> Vec4 {
    let uv = water_uv(fs_uv, uniforms.dimensions);
    let cell = voronoi(uv * VORONOI_MAGNIFICATION, uniforms.time);

    Vec4::new(
        AMBIENT_LIGHT,
        AMBIENT_LIGHT + 0.01 * cell.point.x,
        AMBIENT_LIGHT + cell.point.y,
        pool_alpha(fs_uv),
    )
}
