use wgpu::*;

use crate::render::types::{ModelUniforms, SkyUniforms, SurfaceUniforms};

fn uniform_entry<T>(binding: u32, visibility: ShaderStages) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64),
        },
        count: None,
    }
}

fn texture_entry(binding: u32, view_dimension: TextureViewDimension) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility: ShaderStages::FRAGMENT,
        ty: BindingType::Texture {
            sample_type: TextureSampleType::Float { filterable: true },
            view_dimension,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility: ShaderStages::FRAGMENT,
        ty: BindingType::Sampler(SamplerBindingType::Filtering),
        count: None,
    }
}

/// Water and ground: one uniform block read by both stages.
pub fn create_surface_bind_group_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Surface Bind Group Layout"),
        entries: &[uniform_entry::<SurfaceUniforms>(0, ShaderStages::VERTEX | ShaderStages::FRAGMENT)],
    })
}

pub fn create_model_bind_group_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Model Bind Group Layout"),
        entries: &[
            uniform_entry::<ModelUniforms>(0, ShaderStages::VERTEX | ShaderStages::FRAGMENT),
            texture_entry(1, TextureViewDimension::D2),
            sampler_entry(2),
        ],
    })
}

pub fn create_sky_bind_group_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Sky Bind Group Layout"),
        entries: &[
            uniform_entry::<SkyUniforms>(0, ShaderStages::VERTEX),
            texture_entry(1, TextureViewDimension::Cube),
            sampler_entry(2),
        ],
    })
}
