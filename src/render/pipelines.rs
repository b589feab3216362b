use wgpu::*;

use crate::render::types::VertexData;

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

pub fn create_depth_stencil_state(depth_write_enabled: bool, depth_compare: CompareFunction) -> DepthStencilState {
    DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled,
        depth_compare,
        stencil: StencilState::default(),
        bias: DepthBiasState::default(),
    }
}

pub fn create_primitive_state(cull_mode: Option<Face>) -> PrimitiveState {
    PrimitiveState {
        topology: PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: FrontFace::Ccw,
        cull_mode,
        polygon_mode: PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

pub fn create_multisample_state() -> MultisampleState {
    MultisampleState {
        count: 1,
        mask: !0,
        alpha_to_coverage_enabled: false,
    }
}

pub fn create_color_target_state(surface_format: TextureFormat, blend: Option<BlendState>) -> ColorTargetState {
    ColorTargetState {
        format: surface_format,
        blend,
        write_mask: ColorWrites::ALL,
    }
}

/// Settings that differ between the scene's pipelines.
pub struct PipelineSpec<'a> {
    pub label: &'a str,
    pub shader_source: &'a str,
    pub bind_group_layouts: &'a [&'a BindGroupLayout],
    /// `false` for pipelines that generate their vertices in the shader.
    pub uses_vertex_buffer: bool,
    pub cull_mode: Option<Face>,
    pub blend: Option<BlendState>,
    pub depth_write_enabled: bool,
    pub depth_compare: CompareFunction,
}

pub fn create_render_pipeline(device: &Device, surface_format: TextureFormat, spec: &PipelineSpec) -> RenderPipeline {
    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some(spec.label),
        source: ShaderSource::Wgsl(spec.shader_source.into()),
    });

    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some(spec.label),
        bind_group_layouts: spec.bind_group_layouts,
        push_constant_ranges: &[],
    });

    let vertex_buffers = [VertexData::desc()];
    let buffers: &[VertexBufferLayout] = if spec.uses_vertex_buffer { &vertex_buffers } else { &[] };

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(&layout),
        vertex: VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers,
            compilation_options: PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(create_color_target_state(surface_format, spec.blend))],
            compilation_options: PipelineCompilationOptions::default(),
        }),
        primitive: create_primitive_state(spec.cull_mode),
        depth_stencil: Some(create_depth_stencil_state(spec.depth_write_enabled, spec.depth_compare)),
        multisample: create_multisample_state(),
        multiview: None,
    })
}
