use approx::assert_abs_diff_eq;
use glam::{Vec2, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};

use duck_pond::shading::voronoi::animated_site;
use duck_pond::shading::{
    ground_fragment, ground_vertex, lattice_hash, multi_octave_noise, value_noise, voronoi, water_fragment,
    water_vertex, OctaveParams, OctaveScaling, ShaderUniforms, GROUND_INSIDE, GROUND_OUTSIDE,
};

const SAMPLES: usize = 2000;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x0d0c_c0de)
}

#[test]
fn hash_is_deterministic_and_in_unit_range() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let (x, y, z) = (
            rng.gen_range(-500.0..500.0f32).floor(),
            rng.gen_range(-500.0..500.0f32).floor(),
            rng.gen_range(0.0..100.0f32).floor(),
        );
        let h = lattice_hash(x, y, z);
        assert!((0.0..1.0).contains(&h), "hash({x}, {y}, {z}) = {h}");
        assert_eq!(h, lattice_hash(x, y, z));
    }
}

#[test]
fn value_noise_matches_hash_on_lattice_points() {
    let mut rng = rng();
    for _ in 0..200 {
        let x = rng.gen_range(-50i32..50) as f32;
        let y = rng.gen_range(-50i32..50) as f32;
        let z = rng.gen_range(0i32..20) as f32;
        assert_eq!(value_noise(x, y, z), lattice_hash(x, y, z));
    }
}

#[test]
fn value_noise_is_continuous_across_cell_edges() {
    let mut rng = rng();
    for _ in 0..200 {
        let edge = rng.gen_range(-20i32..20) as f32;
        let y = rng.gen_range(-20.0..20.0f32);
        let z = rng.gen_range(0.0..10.0f32);
        let below = value_noise(edge - 1e-3, y, z);
        let above = value_noise(edge + 1e-3, y, z);
        assert_abs_diff_eq!(below, above, epsilon = 1e-2);
    }
}

#[test]
fn flat_octaves_sum_identical_layers() {
    let params = OctaveParams::default();
    let single = OctaveParams {
        octaves: 1,
        ..params
    };
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let x = rng.gen_range(-10.0..10.0f32);
        let y = rng.gen_range(-10.0..10.0f32);
        let t = rng.gen_range(0.0..60.0f32);
        let total = multi_octave_noise(x, y, t, &params);
        let one = multi_octave_noise(x, y, t, &single);
        assert_abs_diff_eq!(total, 5.0 * one, epsilon = 1e-5);
        assert!(total >= 0.0 && total <= 5.0 * params.persistence + 1e-6);
    }
}

#[test]
fn fractal_octaves_differ_from_flat() {
    let flat = OctaveParams::default();
    let fractal = OctaveParams {
        scaling: OctaveScaling::Fractal,
        ..flat
    };
    let mut rng = rng();
    let differing = (0..100)
        .filter(|_| {
            let x = rng.gen_range(-10.0..10.0f32);
            let y = rng.gen_range(-10.0..10.0f32);
            multi_octave_noise(x, y, 1.5, &flat) != multi_octave_noise(x, y, 1.5, &fractal)
        })
        .count();
    assert!(differing > 90);
}

#[test]
fn octave_count_is_capped() {
    let ten = OctaveParams {
        octaves: 10,
        ..OctaveParams::default()
    };
    let many = OctaveParams {
        octaves: 1000,
        ..OctaveParams::default()
    };
    assert_eq!(multi_octave_noise(0.3, 0.7, 2.0, &ten), multi_octave_noise(0.3, 0.7, 2.0, &many));
}

#[test]
fn water_origin_does_not_move_at_time_zero() {
    let uniforms = ShaderUniforms::default();
    let params = OctaveParams::default();
    let vertex = water_vertex(Vec3::new(0.0, 0.0, 0.0), &uniforms, &params);
    assert_eq!(vertex.position, Vec3::ZERO);
    assert_eq!(vertex.position.z, multi_octave_noise(0.0, 0.0, 0.0, &params));
    assert_eq!(vertex.fs_uv, Vec2::ZERO);
}

#[test]
fn water_vertex_keeps_xy_and_displaces_z() {
    let params = OctaveParams::default();
    let mut rng = rng();
    for _ in 0..200 {
        let position = Vec3::new(rng.gen_range(-1.5..1.5), rng.gen_range(-1.5..1.5), 0.0);
        let uniforms = ShaderUniforms::new(rng.gen_range(0.0..30.0), Vec2::new(3.0, 3.0));
        let vertex = water_vertex(position, &uniforms, &params);
        assert_eq!(vertex.position.truncate(), position.truncate());
        assert_eq!(vertex.fs_uv, position.truncate());
        let expected = multi_octave_noise(position.x * 2.0, position.y * 2.0, uniforms.time, &params);
        assert_eq!(vertex.position.z, expected);
    }
}

#[test]
fn voronoi_distance_vanishes_on_a_site() {
    let sample = voronoi(Vec2::new(0.5, 0.5), 0.0);
    assert_eq!(sample.nearest_distance, 0.0);
    assert_eq!(sample.point, Vec2::new(0.5, 0.5));
}

#[test]
fn voronoi_distance_vanishes_on_every_jittered_site() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let cell = Vec2::new(rng.gen_range(-30i32..30) as f32, rng.gen_range(-30i32..30) as f32);
        let uv = cell + animated_site(cell, 0.0);
        let sample = voronoi(uv, 0.0);
        assert!(sample.nearest_distance < 1e-4, "cell {cell}: distance {}", sample.nearest_distance);
    }
}

#[test]
fn voronoi_outputs_stay_bounded() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let uv = Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
        let sample = voronoi(uv, rng.gen_range(0.0..100.0));
        assert!(sample.point.cmpge(Vec2::ZERO).all() && sample.point.cmple(Vec2::ONE).all());
        assert!(sample.nearest_distance >= 0.0 && sample.nearest_distance <= 2.0f32.sqrt());
        assert!(sample.border_distance.is_finite());
        assert!(sample.border_distance < 10.0);
    }
}

#[test]
fn water_alpha_is_a_hard_disc() {
    let uniforms = ShaderUniforms::new(3.0, Vec2::new(3.0, 3.0));
    assert_eq!(water_fragment(Vec2::new(0.49, 0.0), &uniforms).w, 1.0);
    assert_eq!(water_fragment(Vec2::new(0.0, -0.49), &uniforms).w, 1.0);
    assert_eq!(water_fragment(Vec2::new(0.51, 0.0), &uniforms).w, 0.0);
    assert_eq!(water_fragment(Vec2::new(1.4, 1.4), &uniforms).w, 0.0);
}

#[test]
fn water_color_channels_stay_in_range() {
    let mut rng = rng();
    for _ in 0..500 {
        let fs_uv = Vec2::new(rng.gen_range(-1.5..1.5), rng.gen_range(-1.5..1.5));
        let uniforms = ShaderUniforms::new(rng.gen_range(0.0..60.0), Vec2::new(3.0, 3.0));
        let color = water_fragment(fs_uv, &uniforms);
        assert_eq!(color.x, 0.2);
        assert!(color.y >= 0.2 && color.y <= 0.21 + 1e-6);
        assert!(color.z >= 0.2 && color.z <= 1.2 + 1e-6);
    }
}

#[test]
fn ground_is_green_inside_and_yellow_outside() {
    assert_eq!(ground_fragment(Vec2::new(0.0, 0.0)), GROUND_INSIDE);
    assert_eq!(ground_fragment(Vec2::new(1.0, 0.0)), GROUND_INSIDE);
    assert_eq!(ground_fragment(Vec2::new(1.2, 0.0)), GROUND_OUTSIDE);
    assert_eq!(ground_fragment(Vec2::new(-1.0, -1.0)), GROUND_OUTSIDE);
    assert_eq!(GROUND_INSIDE.to_array(), [0.1, 0.3, 0.1, 1.0]);
    assert_eq!(GROUND_OUTSIDE.to_array(), [1.0, 1.0, 0.0, 1.0]);
}

#[test]
fn ground_vertex_passes_position_through() {
    let mut rng = rng();
    for _ in 0..100 {
        let position = Vec3::new(rng.gen_range(-1.5..1.5), rng.gen_range(-1.5..1.5), rng.gen_range(-1.0..1.0));
        let (out, fs_uv) = ground_vertex(position);
        assert_eq!(out, position);
        assert_eq!(fs_uv, position.truncate());
    }
}
