//! Line rendering and the GPU parameter sinks.
//!
//! Each entity owns one uniform buffer holding its MVP matrix (offset 0) and
//! flat color (offset 64). The CPU-side [`MvpParam`] is the sink the MVP
//! pipeline delivers narrowed matrices into; dirty values are written to the
//! uniform buffer at draw time.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use nibiru_engine::geometry::LineMeshData;
use nibiru_engine::math::Mat4F;
use nibiru_engine::scene::{ParameterSink, SinkHandle, SinkTable};

/// One GPU parameter: the latest delivered matrix, keyed by uniform name.
#[derive(Debug, Clone)]
pub struct MvpParam {
    uniform: String,
    value: Mat4F,
    dirty: bool,
}

impl ParameterSink for MvpParam {
    fn set_matrix(&mut self, name: &str, value: Mat4F) {
        if name == self.uniform {
            self.value = value;
            self.dirty = true;
        } else {
            log::warn!("delivery for {name:?} but parameter is keyed {:?}", self.uniform);
        }
    }
}

/// The rendering layer's sink storage. Owns every parameter; the binding
/// table only ever holds handles into it.
#[derive(Debug, Default)]
pub struct ParamSet {
    params: Vec<MvpParam>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a parameter keyed by `uniform` and returns its handle.
    pub fn alloc(&mut self, uniform: &str) -> SinkHandle {
        let handle = SinkHandle(self.params.len() as u32);
        self.params.push(MvpParam {
            uniform: uniform.to_string(),
            value: Mat4F::IDENTITY,
            dirty: false,
        });
        handle
    }

    /// Takes the pending value for `handle` if a delivery arrived since the
    /// last draw, clearing the dirty flag.
    pub fn take_dirty(&mut self, handle: SinkHandle) -> Option<Mat4F> {
        let param = self.params.get_mut(handle.0 as usize)?;
        if param.dirty {
            param.dirty = false;
            Some(param.value)
        } else {
            None
        }
    }
}

impl SinkTable for ParamSet {
    fn sink_mut(&mut self, handle: SinkHandle) -> Option<&mut dyn ParameterSink> {
        self.params
            .get_mut(handle.0 as usize)
            .map(|p| p as &mut dyn ParameterSink)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct EntityUniform {
    mvp: Mat4F,
    color: [f32; 4],
}

struct LineEntity {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    sink: SinkHandle,
}

/// Renders line-strip entities with per-entity MVP uniforms.
///
/// Strip topology with `Uint32` indices, so [`LineMeshData`]'s restart
/// sentinel breaks strips natively.
pub struct LinePass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    entities: Vec<LineEntity>,
}

impl LinePass {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("nibiru line shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/line.wgsl").into()),
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("nibiru line bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<EntityUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("nibiru line pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("nibiru line pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (3 * std::mem::size_of::<f32>()) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                strip_index_format: Some(wgpu::IndexFormat::Uint32),
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
            entities: Vec::new(),
        }
    }

    /// Uploads a mesh, allocates its parameter sink, and returns the handle
    /// for the scene's binding table.
    pub fn add_entity(
        &mut self,
        device: &wgpu::Device,
        label: &'static str,
        mesh: &LineMeshData,
        color: [f32; 4],
        uniform: &str,
        params: &mut ParamSet,
    ) -> SinkHandle {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: mesh.position_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: mesh.index_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });
        let ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&EntityUniform {
                mvp: Mat4F::IDENTITY,
                color,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        let sink = params.alloc(uniform);
        log::debug!(
            "entity {label:?}: {} vertices, {} indices, sink {sink:?}",
            mesh.vertex_count(),
            mesh.index_count()
        );

        self.entities.push(LineEntity {
            vbo,
            ibo,
            index_count: mesh.index_count(),
            ubo,
            bind_group,
            sink,
        });
        sink
    }

    /// Writes pending parameter values and records one clear-and-draw pass.
    pub fn draw(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clear: wgpu::Color,
        params: &mut ParamSet,
    ) {
        // Flush dirty sinks into their uniform buffers. Only the matrix
        // region is touched; the color at offset 64 is written once at init.
        for entity in &self.entities {
            if let Some(mvp) = params.take_dirty(entity.sink) {
                queue.write_buffer(&entity.ubo, 0, bytemuck::bytes_of(&mvp));
            }
        }

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("nibiru line pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        for entity in &self.entities {
            rpass.set_bind_group(0, &entity.bind_group, &[]);
            rpass.set_vertex_buffer(0, entity.vbo.slice(..));
            rpass.set_index_buffer(entity.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..entity.index_count, 0, 0..1);
        }
    }
}
