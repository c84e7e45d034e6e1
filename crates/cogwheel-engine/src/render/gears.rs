use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::math::Mat4;
use crate::mesh::{GearMesh, GearVertex};
use crate::paint::Color;
use crate::render::ctx::load_color_attachment;
use crate::render::{RenderCtx, RenderTarget};

/// Directional light, eye space. Only `xyz` is used.
pub const DEFAULT_LIGHT: [f32; 4] = [5.0, 5.0, 10.0, 1.0];

/// A gear mesh with its vertex buffer.
///
/// The buffer is written once at upload and released on drop.
pub struct Gear {
    mesh: GearMesh,
    vbo: wgpu::Buffer,
}

impl Gear {
    pub fn upload(device: &wgpu::Device, mesh: GearMesh) -> Self {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cogwheel gear vbo"),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self { mesh, vbo }
    }

    pub fn mesh(&self) -> &GearMesh {
        &self.mesh
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vbo
    }
}

/// One gear placement for a frame.
pub struct GearDraw<'g> {
    pub gear: &'g Gear,
    pub model_view: Mat4,
    pub color: Color,
}

impl<'g> GearDraw<'g> {
    /// Places `gear` at `(x, y)` in the `transform` frame, rotated by
    /// `angle` degrees about its Z axis.
    pub fn new(gear: &'g Gear, transform: &Mat4, x: f32, y: f32, angle: f32, color: Color) -> Self {
        Self { gear, model_view: place(transform, x, y, angle), color }
    }

    pub fn uniforms(&self, projection: &Mat4, light: [f32; 4]) -> GearUniforms {
        GearUniforms::new(projection, &self.model_view, self.color, light)
    }
}

/// `transform`, then a translation to `(x, y, 0)`, then a rotation of
/// `angle` degrees about Z.
pub fn place(transform: &Mat4, x: f32, y: f32, angle: f32) -> Mat4 {
    let mut model_view = *transform;
    model_view.translate(x, y, 0.0);
    model_view.rotate(2.0 * PI * angle / 360.0, 0.0, 0.0, 1.0);
    model_view
}

/// Per-draw uniform block (160 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GearUniforms {
    pub mvp: [f32; 16],
    pub normal_matrix: [f32; 16],
    pub light: [f32; 4],
    pub color: [f32; 4],
}

impl GearUniforms {
    pub fn new(projection: &Mat4, model_view: &Mat4, color: Color, light: [f32; 4]) -> Self {
        let mut mvp = *projection;
        mvp.multiply(model_view);

        // Inverse transpose of the model-view.
        let mut normal_matrix = *model_view;
        normal_matrix.invert_rigid();
        normal_matrix.transpose();

        Self {
            mvp: mvp.to_array(),
            normal_matrix: normal_matrix.to_array(),
            light,
            color: color.to_array(),
        }
    }
}

/// Lit gear renderer.
///
/// Draws every strip of every gear as a triangle strip with back-face
/// culling and, when the target has one, a `Less` depth test. Per-draw
/// uniforms live in one buffer addressed with dynamic offsets.
#[derive(Default)]
pub struct GearRenderer {
    pipeline_formats: Option<(wgpu::TextureFormat, Option<wgpu::TextureFormat>)>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,
    uniform_capacity: usize,
    uniform_stride: u64,
    staging: Vec<u8>,
}

impl GearRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        projection: &Mat4,
        light: [f32; 4],
        draws: &[GearDraw<'_>],
    ) {
        if draws.is_empty() {
            return;
        }

        let depth_format = target.depth_view.and(ctx.depth_format);

        self.ensure_pipeline(ctx, depth_format);
        self.ensure_uniform_capacity(ctx, draws.len());
        self.write_uniforms(ctx, projection, light, draws);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let depth_stencil_attachment = target
            .depth_view
            .filter(|_| depth_format.is_some())
            .map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cogwheel gear pass"),
            color_attachments: &[Some(load_color_attachment(target.color_view))],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);

        for (i, draw) in draws.iter().enumerate() {
            let offset = (i as u64 * self.uniform_stride) as u32;
            rpass.set_bind_group(0, bind_group, &[offset]);
            rpass.set_vertex_buffer(0, draw.gear.vertex_buffer().slice(..));
            for strip in draw.gear.mesh().strips() {
                rpass.draw(strip.range(), 0..1);
            }
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, depth_format: Option<wgpu::TextureFormat>) {
        let formats = (ctx.surface_format, depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        if depth_format.is_none() {
            log::warn!("GearRenderer: no depth attachment; drawing without depth test");
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cogwheel gear shader"),
            source: wgpu::ShaderSource::Wgsl(GEAR_SHADER.into()),
        });

        let bind_group_layout = self.bind_group_layout.take().unwrap_or_else(|| {
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("cogwheel gear bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(GEAR_UNIFORM_SIZE),
                    },
                    count: None,
                }],
            })
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cogwheel gear pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cogwheel gear pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        log::debug!("GearRenderer: pipeline built for {formats:?}");

        self.pipeline_formats = Some(formats);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, required_draws: usize) {
        if required_draws <= self.uniform_capacity && self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let align = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = uniform_stride(GEAR_UNIFORM_SIZE, align);
        let new_cap = required_draws.next_power_of_two().max(4);

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cogwheel gear uniforms"),
            size: stride * new_cap as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cogwheel gear bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: wgpu::BufferSize::new(GEAR_UNIFORM_SIZE),
                }),
            }],
        });

        self.uniform_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
        self.uniform_capacity = new_cap;
        self.uniform_stride = stride;
    }

    fn write_uniforms(
        &mut self,
        ctx: &RenderCtx<'_>,
        projection: &Mat4,
        light: [f32; 4],
        draws: &[GearDraw<'_>],
    ) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };

        let stride = self.uniform_stride as usize;
        self.staging.clear();
        self.staging.resize(stride * draws.len(), 0);

        for (chunk, draw) in self.staging.chunks_exact_mut(stride).zip(draws) {
            let u = draw.uniforms(projection, light);
            chunk[..GEAR_UNIFORM_SIZE as usize].copy_from_slice(bytemuck::bytes_of(&u));
        }

        ctx.queue.write_buffer(ubo, 0, &self.staging);
    }
}

const GEAR_SHADER: &str = include_str!("shaders/gear.wgsl");

const GEAR_UNIFORM_SIZE: u64 = std::mem::size_of::<GearUniforms>() as u64;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x3  // normal
];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<GearVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

/// Rounds `size` up to a multiple of `align` (a power of two).
fn uniform_stride(size: u64, align: u64) -> u64 {
    let align = align.max(1);
    size.div_ceil(align) * align
}
