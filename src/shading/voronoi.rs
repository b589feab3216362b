//! Animated Voronoi field with smooth cell borders.
//!
//! Nearest site is found over the 3x3 neighborhood, then the distance to the
//! closest cell border is measured over the 5x5 neighborhood around that site,
//! projecting onto the bisector of the two sites so borders stay smooth.

use glam::Vec2;

use super::fract2;

pub const JITTER_WEIGHTS_X: Vec2 = Vec2::new(1.2, 5.5);
pub const JITTER_WEIGHTS_Y: Vec2 = Vec2::new(4.54, 2.41);
pub const JITTER_SCALE: f32 = 4.45;

#[allow(clippy::approx_constant)]
pub const SHADER_TAU: f32 = 6.283185;

/// Starting value of both running minimums; larger than any in-range distance.
pub const INITIAL_DISTANCE: f32 = 10.0;

/// Squared length under which two sites count as coincident.
pub const DEGENERATE_EPSILON: f32 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoronoiSample {
    /// Animated jitter of the nearest site, each component in `[0, 1]`.
    pub point: Vec2,
    /// Euclidean distance from the sample to the nearest site.
    pub nearest_distance: f32,
    /// Distance to the nearest border of the sample's cell.
    pub border_distance: f32,
}

/// Per-cell jitter in `[0, 1)^2`.
pub fn cell_jitter(cell: Vec2) -> Vec2 {
    let seed = Vec2::new(cell.dot(JITTER_WEIGHTS_X).sin(), cell.dot(JITTER_WEIGHTS_Y).sin());
    fract2(seed * JITTER_SCALE)
}

/// Site position inside `cell`, orbiting with `time`.
pub fn animated_site(cell: Vec2, time: f32) -> Vec2 {
    let jitter = cell_jitter(cell) * SHADER_TAU + Vec2::splat(time);
    Vec2::splat(0.5) + 0.5 * Vec2::new(jitter.x.sin(), jitter.y.sin())
}

/// Signed distance from the midpoint of `d0`/`d1` along their separating
/// direction. `None` when the two offsets coincide and the direction is
/// undefined; such neighbors are skipped rather than fed a NaN.
pub fn border_distance(d0: Vec2, d1: Vec2) -> Option<f32> {
    let edge = d1 - d0;
    if edge.length_squared() < DEGENERATE_EPSILON {
        return None;
    }
    Some((0.5 * (d0 + d1)).dot(edge.normalize()))
}

pub fn voronoi(uv: Vec2, time: f32) -> VoronoiSample {
    let cell = uv.floor();
    let cell_uv = uv - cell;

    let mut nearest_distance = INITIAL_DISTANCE;
    let mut nearest_point = Vec2::ZERO;
    let mut nearest_diff = Vec2::ZERO;
    let mut nearest_neighbor = Vec2::ZERO;

    for x in -1..=1 {
        for y in -1..=1 {
            let neighbor = Vec2::new(x as f32, y as f32);
            let site = animated_site(cell + neighbor, time);

            let diff = neighbor + site - cell_uv;
            let dist = diff.length();
            if dist < nearest_distance {
                nearest_distance = dist;
                nearest_point = site;
                nearest_diff = diff;
                nearest_neighbor = neighbor;
            }
        }
    }

    let mut border = INITIAL_DISTANCE;
    for x in -2..=2 {
        for y in -2..=2 {
            if x == 0 && y == 0 {
                continue;
            }

            let neighbor = nearest_neighbor + Vec2::new(x as f32, y as f32);
            let site = animated_site(cell + neighbor, time);

            let diff = neighbor + site - cell_uv;
            if let Some(dist) = border_distance(nearest_diff, diff) {
                border = border.min(dist);
            }
        }
    }

    VoronoiSample {
        point: nearest_point,
        nearest_distance,
        border_distance: border,
    }
}
