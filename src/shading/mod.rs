//! Host-side reference implementation of the water and ground shaders.
//!
//! Every function here is a pure function of position and time and mirrors
//! the WGSL in [`crate::render::shaders`] line for line, so the GPU output can
//! be reasoned about (and tested) on the CPU.

pub mod ground;
pub mod noise;
pub mod voronoi;
pub mod water;

use glam::Vec2;

pub use ground::{ground_fragment, ground_vertex, GROUND_INSIDE, GROUND_OUTSIDE};
pub use noise::{lattice_hash, multi_octave_noise, value_noise, OctaveParams, OctaveScaling};
pub use voronoi::{voronoi, VoronoiSample};
pub use water::{water_fragment, water_vertex, WaterVertex};

/// Largest f32 strictly below 1.0.
pub const ONE_MINUS_ULP: f32 = 1.0 - f32::EPSILON / 2.0;

/// Uniform state shared by both shader pairs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderUniforms {
    /// Seconds since scene start.
    pub time: f32,
    /// World-space width and height of the water / ground mesh.
    pub dimensions: Vec2,
}

impl ShaderUniforms {
    pub fn new(time: f32, dimensions: Vec2) -> Self {
        Self { time, dimensions }
    }
}

impl Default for ShaderUniforms {
    fn default() -> Self {
        Self::new(0.0, Vec2::new(3.0, 3.0))
    }
}

/// GLSL-style `fract`: `x - floor(x)`, which stays non-negative for negative
/// inputs (unlike [`f32::fract`]). Values that round up to 1.0 are pulled back
/// below it so the result is always in `[0, 1)`.
#[inline]
pub fn fract(x: f32) -> f32 {
    (x - x.floor()).min(ONE_MINUS_ULP)
}

#[inline]
pub fn fract2(v: Vec2) -> Vec2 {
    Vec2::new(fract(v.x), fract(v.y))
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Inverse of the sRGB transfer curve. The surface fragment stages pass their
/// colors through this before storing to the sRGB target, which re-encodes
/// them to the displayed value.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fract_matches_glsl_for_negatives() {
        assert_eq!(fract(-0.25), 0.75);
        assert_eq!(fract(2.5), 0.5);
        assert_eq!(fract(-3.0), 0.0);
    }

    #[test]
    fn fract_never_reaches_one() {
        assert!(fract(-1.0e-9) < 1.0);
    }

    #[test]
    fn srgb_decode_matches_reference_values() {
        assert!((srgb_to_linear(0.1) - 0.010_022_8).abs() < 1e-5);
        assert!((srgb_to_linear(0.3) - 0.073_239_4).abs() < 1e-5);
        assert_eq!(srgb_to_linear(1.0), 1.0);
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert_eq!(srgb_to_linear(0.04), 0.04 / 12.92);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 5.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 5.0, 1.0), 5.0);
    }
}
