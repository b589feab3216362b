//! WGSL sources. The water and ground programs mirror `crate::shading`
//! function for function; keep the two in step.

pub const WATER_SHADER: &str = r#"
struct SurfaceUniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    dimensions: vec2<f32>,
    time: f32,
    octaves: u32,
    persistence: f32,
    frequency: f32,
    octave_scaling: u32,
    _padding: f32,
}

@group(0) @binding(0)
var<uniform> uniforms: SurfaceUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) normal: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) fs_uv: vec2<f32>,
}

const PI: f32 = 3.141592;
const TAU: f32 = 6.283185;
const ONE_MINUS_ULP: f32 = 0.99999994;
const MAX_OCTAVES: u32 = 10u;
const HEIGHT_SCALE: f32 = 2.0;
const VORONOI_MAGNIFICATION: f32 = 100.0;
const AMBIENT_LIGHT: f32 = 0.2;
const POOL_RADIUS_SQUARED: f32 = 0.25;

fn srgb_to_linear(c: vec3<f32>) -> vec3<f32> {
    let low = c / 12.92;
    let high = pow((c + vec3<f32>(0.055)) / 1.055, vec3<f32>(2.4));
    return select(high, low, c <= vec3<f32>(0.04045));
}

fn fract01(x: f32) -> f32 {
    return min(x - floor(x), ONE_MINUS_ULP);
}

fn fract01_2(v: vec2<f32>) -> vec2<f32> {
    return vec2<f32>(fract01(v.x), fract01(v.y));
}

fn lattice_hash(p: vec3<f32>) -> f32 {
    return fract01(sin(dot(p, vec3<f32>(12.9898, 78.233, 53.641))) * 43758.5453);
}

fn cosine_interpolate(a: f32, b: f32, t: f32) -> f32 {
    let f = (1.0 - cos(t * PI)) * 0.5;
    return a * (1.0 - f) + b * f;
}

fn value_noise(p: vec3<f32>) -> f32 {
    let p0 = floor(p);
    let d = p - p0;

    let c000 = lattice_hash(p0);
    let c001 = lattice_hash(p0 + vec3<f32>(0.0, 0.0, 1.0));
    let c010 = lattice_hash(p0 + vec3<f32>(0.0, 1.0, 0.0));
    let c011 = lattice_hash(p0 + vec3<f32>(0.0, 1.0, 1.0));
    let c100 = lattice_hash(p0 + vec3<f32>(1.0, 0.0, 0.0));
    let c101 = lattice_hash(p0 + vec3<f32>(1.0, 0.0, 1.0));
    let c110 = lattice_hash(p0 + vec3<f32>(1.0, 1.0, 0.0));
    let c111 = lattice_hash(p0 + vec3<f32>(1.0, 1.0, 1.0));

    let x00 = cosine_interpolate(c000, c100, d.x);
    let x01 = cosine_interpolate(c001, c101, d.x);
    let x10 = cosine_interpolate(c010, c110, d.x);
    let x11 = cosine_interpolate(c011, c111, d.x);

    let y0 = cosine_interpolate(x00, x10, d.y);
    let y1 = cosine_interpolate(x01, x11, d.y);

    return cosine_interpolate(y0, y1, d.z);
}

fn multi_octave_noise(x: f32, y: f32, t: f32) -> f32 {
    var total = 0.0;
    let count = min(uniforms.octaves, MAX_OCTAVES);
    for (var i = 0u; i < count; i++) {
        var exponent = 1.0;
        if (uniforms.octave_scaling == 1u) {
            exponent = f32(i);
        }
        let freq = pow(uniforms.frequency, exponent);
        let amp = pow(uniforms.persistence, exponent);
        total += value_noise(vec3<f32>(freq * x, freq * y, t)) * amp;
    }
    return total;
}

fn cell_jitter(cell: vec2<f32>) -> vec2<f32> {
    let seed = vec2<f32>(
        sin(dot(cell, vec2<f32>(1.2, 5.5))),
        sin(dot(cell, vec2<f32>(4.54, 2.41)))
    );
    return fract01_2(seed * 4.45);
}

fn animated_site(cell: vec2<f32>, time: f32) -> vec2<f32> {
    let jitter = cell_jitter(cell) * TAU + vec2<f32>(time);
    return vec2<f32>(0.5) + 0.5 * sin(jitter);
}

struct VoronoiSample {
    site: vec2<f32>,
    nearest_distance: f32,
    border_distance: f32,
}

fn voronoi(uv: vec2<f32>, time: f32) -> VoronoiSample {
    let cell = floor(uv);
    let cell_uv = uv - cell;

    var nearest_distance = 10.0;
    var nearest_site = vec2<f32>(0.0);
    var nearest_diff = vec2<f32>(0.0);
    var nearest_neighbor = vec2<f32>(0.0);

    for (var x = -1; x <= 1; x++) {
        for (var y = -1; y <= 1; y++) {
            let neighbor = vec2<f32>(f32(x), f32(y));
            let site = animated_site(cell + neighbor, time);
            let diff = neighbor + site - cell_uv;
            let dist = length(diff);
            if (dist < nearest_distance) {
                nearest_distance = dist;
                nearest_site = site;
                nearest_diff = diff;
                nearest_neighbor = neighbor;
            }
        }
    }

    var border = 10.0;
    for (var x = -2; x <= 2; x++) {
        for (var y = -2; y <= 2; y++) {
            if (x == 0 && y == 0) {
                continue;
            }
            let neighbor = nearest_neighbor + vec2<f32>(f32(x), f32(y));
            let site = animated_site(cell + neighbor, time);
            let diff = neighbor + site - cell_uv;
            let edge = diff - nearest_diff;
            if (dot(edge, edge) >= 1e-12) {
                border = min(border, dot(0.5 * (nearest_diff + diff), normalize(edge)));
            }
        }
    }

    return VoronoiSample(nearest_site, nearest_distance, border);
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    let height = multi_octave_noise(
        input.position.x * HEIGHT_SCALE,
        input.position.y * HEIGHT_SCALE,
        uniforms.time
    );
    let displaced = vec3<f32>(input.position.xy, height);
    output.clip_position = uniforms.view_proj * uniforms.model * vec4<f32>(displaced, 1.0);
    output.fs_uv = input.position.xy;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let dims = uniforms.dimensions;
    var uv = input.fs_uv / dims - vec2<f32>(0.5);
    uv = uv / vec2<f32>(dims.y / dims.x, 1.0);

    let cell = voronoi(uv * VORONOI_MAGNIFICATION, uniforms.time);

    var alpha = 0.0;
    if (dot(input.fs_uv, input.fs_uv) <= POOL_RADIUS_SQUARED) {
        alpha = 1.0;
    }

    let color = vec3<f32>(
        AMBIENT_LIGHT,
        AMBIENT_LIGHT + 0.01 * cell.site.x,
        AMBIENT_LIGHT + cell.site.y
    );
    return vec4<f32>(srgb_to_linear(color), alpha);
}
"#;

pub const GROUND_SHADER: &str = r#"
struct SurfaceUniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    dimensions: vec2<f32>,
    time: f32,
    octaves: u32,
    persistence: f32,
    frequency: f32,
    octave_scaling: u32,
    _padding: f32,
}

@group(0) @binding(0)
var<uniform> uniforms: SurfaceUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) normal: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) fs_uv: vec2<f32>,
}

const GROUND_RADIUS_SQUARED: f32 = 1.2;

fn srgb_to_linear(c: vec3<f32>) -> vec3<f32> {
    let low = c / 12.92;
    let high = pow((c + vec3<f32>(0.055)) / 1.055, vec3<f32>(2.4));
    return select(high, low, c <= vec3<f32>(0.04045));
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.clip_position = uniforms.view_proj * uniforms.model * vec4<f32>(input.position, 1.0);
    output.fs_uv = input.position.xy;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    var color = vec3<f32>(1.0, 1.0, 0.0);
    if (dot(input.fs_uv, input.fs_uv) <= GROUND_RADIUS_SQUARED) {
        color = vec3<f32>(0.1, 0.3, 0.1);
    }
    return vec4<f32>(srgb_to_linear(color), 1.0);
}
"#;

/// Unlit textured meshes under full white ambient light.
pub const MODEL_SHADER: &str = r#"
struct ModelUniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    base_color: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> uniforms: ModelUniforms;

@group(0) @binding(1)
var model_texture: texture_2d<f32>;

@group(0) @binding(2)
var model_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) normal: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.clip_position = uniforms.view_proj * uniforms.model * vec4<f32>(input.position, 1.0);
    output.uv = input.uv;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let tex_color = textureSample(model_texture, model_sampler, input.uv);
    return tex_color * uniforms.base_color;
}
"#;

/// Full-screen triangle at the far plane sampling the skybox cube.
pub const SKY_SHADER: &str = r#"
struct SkyUniforms {
    inv_view_proj: mat4x4<f32>,
}

@group(0) @binding(0)
var<uniform> uniforms: SkyUniforms;

@group(0) @binding(1)
var sky_texture: texture_cube<f32>;

@group(0) @binding(2)
var sky_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) direction: vec3<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    let ndc = vec2<f32>(f32((vertex_index << 1u) & 2u), f32(vertex_index & 2u)) * 2.0 - 1.0;
    let world = uniforms.inv_view_proj * vec4<f32>(ndc, 1.0, 1.0);

    var output: VertexOutput;
    output.clip_position = vec4<f32>(ndc, 1.0, 1.0);
    output.direction = world.xyz / world.w;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(sky_texture, sky_sampler, normalize(input.direction));
}
"#;

/// Every shader with its name, for validation and pipeline labels.
pub const SHADER_SOURCES: &[(&str, &str)] = &[
    ("water", WATER_SHADER),
    ("ground", GROUND_SHADER),
    ("model", MODEL_SHADER),
    ("sky", SKY_SHADER),
];
