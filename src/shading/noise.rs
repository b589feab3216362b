//! Hashed-lattice value noise and its octave sum, used for the water height.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{fract, lerp};

pub const HASH_WEIGHTS: Vec3 = Vec3::new(12.9898, 78.233, 53.641);
pub const HASH_SCALE: f32 = 43758.5453;

/// The shaders define pi to six places; keep the same value so CPU and GPU agree.
#[allow(clippy::approx_constant)]
pub const SHADER_PI: f32 = 3.141592;

/// Hard iteration cap of the octave loop, whatever `octaves` says.
pub const MAX_OCTAVES: u32 = 10;

/// Pseudo-random value in `[0, 1)` for a lattice corner.
///
/// `fract(sin(dot(p, w)) * 43758.5453)`: deterministic and cheap, with no
/// uniformity guarantee beyond looking random.
pub fn lattice_hash(x: f32, y: f32, z: f32) -> f32 {
    fract(Vec3::new(x, y, z).dot(HASH_WEIGHTS).sin() * HASH_SCALE)
}

/// Lerp with a cosine ease, which hides the lattice creases linear blending shows.
pub fn cosine_interpolate(a: f32, b: f32, t: f32) -> f32 {
    lerp(a, b, (1.0 - (t * SHADER_PI).cos()) * 0.5)
}

/// Trilinear (cosine-eased) interpolation of the hash over the 8 corners
/// surrounding `(x, y, z)`.
pub fn value_noise(x: f32, y: f32, z: f32) -> f32 {
    let x0 = x.floor();
    let x1 = x0 + 1.0;
    let y0 = y.floor();
    let y1 = y0 + 1.0;
    let z0 = z.floor();
    let z1 = z0 + 1.0;

    let c000 = lattice_hash(x0, y0, z0);
    let c001 = lattice_hash(x0, y0, z1);
    let c010 = lattice_hash(x0, y1, z0);
    let c011 = lattice_hash(x0, y1, z1);
    let c100 = lattice_hash(x1, y0, z0);
    let c101 = lattice_hash(x1, y0, z1);
    let c110 = lattice_hash(x1, y1, z0);
    let c111 = lattice_hash(x1, y1, z1);

    let dx = x - x0;
    let dy = y - y0;
    let dz = z - z0;

    let x00 = cosine_interpolate(c000, c100, dx);
    let x01 = cosine_interpolate(c001, c101, dx);
    let x10 = cosine_interpolate(c010, c110, dx);
    let x11 = cosine_interpolate(c011, c111, dx);

    let y0v = cosine_interpolate(x00, x10, dy);
    let y1v = cosine_interpolate(x01, x11, dy);

    cosine_interpolate(y0v, y1v, dz)
}

/// How octave frequency and amplitude evolve with the octave index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OctaveScaling {
    /// Every octave uses `frequency^1` and `persistence^1`, so all octaves are
    /// identical and the sum is `octaves` times one octave. This is what the
    /// water has always rendered with.
    Flat,
    /// Octave `i` uses `frequency^i` and `persistence^i`.
    Fractal,
}

impl OctaveScaling {
    /// Value written into the GPU uniform block.
    pub fn as_uniform(self) -> u32 {
        match self {
            OctaveScaling::Flat => 0,
            OctaveScaling::Fractal => 1,
        }
    }

    fn exponent(self, octave: u32) -> i32 {
        match self {
            OctaveScaling::Flat => 1,
            OctaveScaling::Fractal => octave as i32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctaveParams {
    pub persistence: f32,
    pub frequency: f32,
    pub octaves: u32,
    pub scaling: OctaveScaling,
}

impl Default for OctaveParams {
    fn default() -> Self {
        Self {
            persistence: 0.09,
            frequency: 2.0,
            octaves: 5,
            scaling: OctaveScaling::Flat,
        }
    }
}

impl OctaveParams {
    /// Number of loop iterations actually evaluated.
    pub fn effective_octaves(&self) -> u32 {
        self.octaves.min(MAX_OCTAVES)
    }
}

/// Unnormalized sum of `params.octaves` value-noise samples (at most
/// [`MAX_OCTAVES`]), with `t` as the third noise coordinate.
pub fn multi_octave_noise(x: f32, y: f32, t: f32, params: &OctaveParams) -> f32 {
    let mut total = 0.0;
    for octave in 0..params.effective_octaves() {
        let exponent = params.scaling.exponent(octave);
        let freq = params.frequency.powi(exponent);
        let amp = params.persistence.powi(exponent);

        total += value_noise(freq * x, freq * y, t) * amp;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_at_origin_is_zero() {
        assert_eq!(lattice_hash(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn value_noise_hits_lattice_values() {
        for &(x, y, z) in &[(0.0, 0.0, 0.0), (3.0, -2.0, 7.0), (-5.0, 11.0, -1.0)] {
            assert_eq!(value_noise(x, y, z), lattice_hash(x, y, z));
        }
    }

    #[test]
    fn cosine_interpolate_eases_at_midpoint() {
        let mid = cosine_interpolate(0.0, 1.0, 0.5);
        assert!((mid - 0.5).abs() < 1e-6);
        let quarter = cosine_interpolate(0.0, 1.0, 0.25);
        assert!(quarter < 0.25);
    }

    #[test]
    fn octave_count_is_capped() {
        let params = OctaveParams {
            octaves: 50,
            ..OctaveParams::default()
        };
        assert_eq!(params.effective_octaves(), MAX_OCTAVES);

        let single = value_noise(2.0 * 0.3, 2.0 * 0.7, 1.5) * 0.09;
        let total = multi_octave_noise(0.3, 0.7, 1.5, &params);
        assert!((total - single * MAX_OCTAVES as f32).abs() < 1e-5);
    }

    #[test]
    fn zero_octaves_is_silent() {
        let params = OctaveParams {
            octaves: 0,
            ..OctaveParams::default()
        };
        assert_eq!(multi_octave_noise(1.3, 0.2, 4.0, &params), 0.0);
    }

    #[test]
    fn fractal_scaling_starts_at_unit_octave() {
        let params = OctaveParams {
            octaves: 1,
            scaling: OctaveScaling::Fractal,
            ..OctaveParams::default()
        };
        assert_eq!(
            multi_octave_noise(0.4, 0.9, 2.0, &params),
            value_noise(0.4, 0.9, 2.0)
        );
    }
}
