use std::sync::Arc;

use bytemuck::Zeroable;
use glam::Vec3;
use wgpu::util::DeviceExt;
use wgpu::*;

use crate::config::{PlaneConfig, SceneConfig};
use crate::render::layouts::{
    create_model_bind_group_layout, create_sky_bind_group_layout, create_surface_bind_group_layout,
};
use crate::render::mesh::{plane_geometry, MeshData};
use crate::render::pipelines::{create_render_pipeline, PipelineSpec, DEPTH_FORMAT};
use crate::render::renderer::WgpuRenderer;
use crate::render::shaders::{GROUND_SHADER, MODEL_SHADER, SKY_SHADER, WATER_SHADER};
use crate::render::textures::{create_rgba_texture, create_white_texture, load_cube_texture};
use crate::render::types::{ModelUniforms, SkyUniforms, SurfaceUniforms, WgpuTexture};
use crate::scene::camera::PerspectiveCamera;
use crate::scene::Scene;

struct GpuMesh {
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn new(device: &Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    fn draw<'a>(&'a self, render_pass: &mut RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

fn create_uniform_buffer<T: bytemuck::Pod>(device: &Device, label: &str, contents: &T) -> Buffer {
    device.create_buffer_init(&util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(contents),
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
    })
}

/// Water or ground: a subdivided plane with its own uniform block.
struct SurfaceMesh {
    mesh: GpuMesh,
    plane: PlaneConfig,
    uniform_buffer: Buffer,
    bind_group: BindGroup,
}

impl SurfaceMesh {
    fn new(device: &Device, layout: &BindGroupLayout, label: &str, plane: &PlaneConfig) -> Self {
        let geometry = plane_geometry(plane.width, plane.height, plane.width_segments, plane.height_segments);
        let mesh = GpuMesh::new(device, label, &geometry);
        let uniform_buffer = create_uniform_buffer(device, label, &SurfaceUniforms::zeroed());
        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        Self {
            mesh,
            plane: plane.clone(),
            uniform_buffer,
            bind_group,
        }
    }
}

struct GpuPrimitive {
    mesh: GpuMesh,
    node: usize,
    base_color: [f32; 4],
    uniform_buffer: Buffer,
    bind_group: BindGroup,
}

struct Skybox {
    _texture: WgpuTexture,
    uniform_buffer: Buffer,
    bind_group: BindGroup,
}

/// Owns every pipeline and GPU resource of the scene and records one frame.
pub struct SceneRenderer {
    device: Arc<Device>,
    queue: Arc<Queue>,
    sky_pipeline: RenderPipeline,
    ground_pipeline: RenderPipeline,
    model_pipeline: RenderPipeline,
    water_pipeline: RenderPipeline,
    skybox: Option<Skybox>,
    ground: SurfaceMesh,
    water: SurfaceMesh,
    /// One list per scene object, in scene order.
    objects: Vec<Vec<GpuPrimitive>>,
    _model_textures: Vec<WgpuTexture>,
    depth_view: TextureView,
    clear_color: Color,
}

impl SceneRenderer {
    pub fn new(renderer: &WgpuRenderer, scene: &Scene, config: &SceneConfig) -> Self {
        let device = renderer.device.clone();
        let queue = renderer.queue.clone();
        let surface_format = renderer.surface_format();

        let surface_layout = create_surface_bind_group_layout(&device);
        let model_layout = create_model_bind_group_layout(&device);
        let sky_layout = create_sky_bind_group_layout(&device);

        let sky_pipeline = create_render_pipeline(
            &device,
            surface_format,
            &PipelineSpec {
                label: "Sky Pipeline",
                shader_source: SKY_SHADER,
                bind_group_layouts: &[&sky_layout],
                uses_vertex_buffer: false,
                cull_mode: None,
                blend: None,
                depth_write_enabled: false,
                depth_compare: CompareFunction::Always,
            },
        );
        let ground_pipeline = create_render_pipeline(
            &device,
            surface_format,
            &PipelineSpec {
                label: "Ground Pipeline",
                shader_source: GROUND_SHADER,
                bind_group_layouts: &[&surface_layout],
                uses_vertex_buffer: true,
                cull_mode: None,
                blend: None,
                depth_write_enabled: true,
                depth_compare: CompareFunction::Less,
            },
        );
        let model_pipeline = create_render_pipeline(
            &device,
            surface_format,
            &PipelineSpec {
                label: "Model Pipeline",
                shader_source: MODEL_SHADER,
                bind_group_layouts: &[&model_layout],
                uses_vertex_buffer: true,
                cull_mode: None,
                blend: None,
                depth_write_enabled: true,
                depth_compare: CompareFunction::Less,
            },
        );
        let water_pipeline = create_render_pipeline(
            &device,
            surface_format,
            &PipelineSpec {
                label: "Water Pipeline",
                shader_source: WATER_SHADER,
                bind_group_layouts: &[&surface_layout],
                uses_vertex_buffer: true,
                cull_mode: None,
                blend: Some(BlendState::ALPHA_BLENDING),
                depth_write_enabled: true,
                depth_compare: CompareFunction::Less,
            },
        );

        let skybox = match load_cube_texture(&device, &queue, &config.skybox_dir) {
            Ok(texture) => {
                let uniform_buffer = create_uniform_buffer(&device, "Sky Uniform Buffer", &SkyUniforms::zeroed());
                let bind_group = device.create_bind_group(&BindGroupDescriptor {
                    label: Some("Sky Bind Group"),
                    layout: &sky_layout,
                    entries: &[
                        BindGroupEntry {
                            binding: 0,
                            resource: uniform_buffer.as_entire_binding(),
                        },
                        BindGroupEntry {
                            binding: 1,
                            resource: BindingResource::TextureView(&texture.view),
                        },
                        BindGroupEntry {
                            binding: 2,
                            resource: BindingResource::Sampler(&texture.sampler),
                        },
                    ],
                });
                Some(Skybox {
                    _texture: texture,
                    uniform_buffer,
                    bind_group,
                })
            }
            Err(e) => {
                log::warn!("Skybox unavailable ({}), using clear color", e);
                None
            }
        };

        let ground = SurfaceMesh::new(&device, &surface_layout, "Ground", &scene.ground);
        let water = SurfaceMesh::new(&device, &surface_layout, "Water", &scene.water);

        let white = create_white_texture(&device, &queue);
        let mut model_textures = Vec::new();
        let mut objects = Vec::with_capacity(scene.objects.len());
        for object in &scene.objects {
            let model = &object.model;
            let first_texture = model_textures.len();
            for (index, texture) in model.textures.iter().enumerate() {
                let label = format!("{} texture {}", model.name, index);
                model_textures.push(create_rgba_texture(
                    &device,
                    &queue,
                    &label,
                    texture.width,
                    texture.height,
                    &texture.pixels,
                ));
            }

            let mut primitives = Vec::with_capacity(model.primitives.len());
            for primitive in &model.primitives {
                if primitive.indices.is_empty() || primitive.vertices.is_empty() {
                    continue;
                }
                let texture = primitive
                    .texture
                    .and_then(|index| model_textures.get(first_texture + index))
                    .unwrap_or(&white);

                let uniform_buffer = create_uniform_buffer(&device, &model.name, &ModelUniforms::zeroed());
                let bind_group = device.create_bind_group(&BindGroupDescriptor {
                    label: Some(model.name.as_str()),
                    layout: &model_layout,
                    entries: &[
                        BindGroupEntry {
                            binding: 0,
                            resource: uniform_buffer.as_entire_binding(),
                        },
                        BindGroupEntry {
                            binding: 1,
                            resource: BindingResource::TextureView(&texture.view),
                        },
                        BindGroupEntry {
                            binding: 2,
                            resource: BindingResource::Sampler(&texture.sampler),
                        },
                    ],
                });

                let mesh = MeshData {
                    vertices: primitive.vertices.clone(),
                    indices: primitive.indices.clone(),
                };
                primitives.push(GpuPrimitive {
                    mesh: GpuMesh::new(&device, &model.name, &mesh),
                    node: primitive.node,
                    base_color: primitive.base_color,
                    uniform_buffer,
                    bind_group,
                });
            }
            objects.push(primitives);
        }
        model_textures.push(white);

        let (width, height) = renderer.get_viewport_size();
        let depth_view = create_depth_view(&device, width, height);

        let [r, g, b, a] = config.clear_color;
        Self {
            device,
            queue,
            sky_pipeline,
            ground_pipeline,
            model_pipeline,
            water_pipeline,
            skybox,
            ground,
            water,
            objects,
            _model_textures: model_textures,
            depth_view,
            clear_color: Color { r, g, b, a },
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    fn write_uniforms(&self, scene: &Scene, camera: &PerspectiveCamera, target: Vec3) {
        let view_proj = camera.view_proj(target);

        if let Some(skybox) = &self.skybox {
            let uniforms = SkyUniforms {
                inv_view_proj: camera.sky_inverse_view_proj(target).to_cols_array_2d(),
            };
            self.queue.write_buffer(&skybox.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        for surface in [&self.ground, &self.water] {
            let mut shader = scene.uniforms;
            shader.dimensions = surface.plane.dimensions();
            let uniforms = SurfaceUniforms::new(view_proj, surface.plane.model_matrix(), &shader, &scene.noise);
            self.queue.write_buffer(&surface.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        for (object, primitives) in scene.objects.iter().zip(&self.objects) {
            let world = object.model.world_transforms();
            for primitive in primitives {
                let model = world.get(primitive.node).copied().unwrap_or(glam::Mat4::IDENTITY);
                let uniforms = ModelUniforms {
                    view_proj: view_proj.to_cols_array_2d(),
                    model: model.to_cols_array_2d(),
                    base_color: primitive.base_color,
                };
                self.queue.write_buffer(&primitive.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
            }
        }
    }

    /// Draws sky, ground, models, then the blended water.
    pub fn render(&mut self, renderer: &mut WgpuRenderer, scene: &Scene, camera: &PerspectiveCamera, target: Vec3) {
        let Some(frame) = renderer.begin_frame() else {
            return;
        };
        let view = frame.texture.create_view(&TextureViewDescriptor::default());

        self.write_uniforms(scene, camera, target);

        let mut encoder = self.device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("Scene Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(skybox) = &self.skybox {
                render_pass.set_pipeline(&self.sky_pipeline);
                render_pass.set_bind_group(0, &skybox.bind_group, &[]);
                render_pass.draw(0..3, 0..1);
            }

            render_pass.set_pipeline(&self.ground_pipeline);
            render_pass.set_bind_group(0, &self.ground.bind_group, &[]);
            self.ground.mesh.draw(&mut render_pass);

            render_pass.set_pipeline(&self.model_pipeline);
            for primitive in self.objects.iter().flatten() {
                render_pass.set_bind_group(0, &primitive.bind_group, &[]);
                primitive.mesh.draw(&mut render_pass);
            }

            render_pass.set_pipeline(&self.water_pipeline);
            render_pass.set_bind_group(0, &self.water.bind_group, &[]);
            self.water.mesh.draw(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        renderer.end_frame(frame);
    }
}

fn create_depth_view(device: &Device, width: u32, height: u32) -> TextureView {
    let texture = device.create_texture(&TextureDescriptor {
        label: Some("Depth Texture"),
        size: Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&TextureViewDescriptor::default())
}
