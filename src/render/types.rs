use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::*;

use crate::shading::{OctaveParams, ShaderUniforms};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexData {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl VertexData {
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexData>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    offset: (std::mem::size_of::<[f32; 3]>() + std::mem::size_of::<[f32; 2]>()) as BufferAddress,
                    shader_location: 2,
                    format: VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Uniform block shared by the water and ground shaders.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SurfaceUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub dimensions: [f32; 2],
    pub time: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub frequency: f32,
    pub octave_scaling: u32,
    pub _padding: f32,
}

impl SurfaceUniforms {
    pub fn new(view_proj: Mat4, model: Mat4, shader: &ShaderUniforms, noise: &OctaveParams) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            dimensions: shader.dimensions.to_array(),
            time: shader.time,
            octaves: noise.octaves,
            persistence: noise.persistence,
            frequency: noise.frequency,
            octave_scaling: noise.scaling.as_uniform(),
            _padding: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ModelUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub base_color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SkyUniforms {
    pub inv_view_proj: [[f32; 4]; 4],
}

pub struct WgpuTexture {
    pub texture: Texture,
    pub view: TextureView,
    pub sampler: Sampler,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::OctaveScaling;
    use glam::Vec2;

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<VertexData>(), 32);
        assert_eq!(std::mem::size_of::<SurfaceUniforms>(), 160);
        assert_eq!(std::mem::size_of::<ModelUniforms>(), 144);
        assert_eq!(std::mem::size_of::<SkyUniforms>(), 64);
    }

    #[test]
    fn surface_uniforms_carry_time_and_noise() {
        let shader = ShaderUniforms::new(4.5, Vec2::new(3.0, 2.0));
        let noise = OctaveParams {
            scaling: OctaveScaling::Fractal,
            ..OctaveParams::default()
        };
        let uniforms = SurfaceUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, &shader, &noise);
        assert_eq!(uniforms.time, 4.5);
        assert_eq!(uniforms.dimensions, [3.0, 2.0]);
        assert_eq!(uniforms.octaves, 5);
        assert_eq!(uniforms.octave_scaling, 1);
    }
}
