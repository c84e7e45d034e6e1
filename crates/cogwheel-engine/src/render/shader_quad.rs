//! Full-window quad driven by a user fragment shader.
//!
//! User shaders are WGSL. They are appended to a prelude that declares:
//!
//! ```wgsl
//! struct ShaderToyUniforms { time: f32, resolution: vec2<f32> };
//! @group(0) @binding(0) var<uniform> shadertoy: ShaderToyUniforms;
//! @group(0) @binding(1) var tex0: texture_2d<f32>;
//! @group(0) @binding(2) var tex0_sampler: sampler;
//! struct QuadOut { @builtin(position) position: vec4<f32>, @location(0) uv: vec2<f32> };
//! ```
//!
//! The fragment source must define `fs_main`. A vertex source, when given,
//! must define `vs_main` taking `@location(0) coord2d: vec2<f32>`; otherwise
//! the built-in pass-through vertex stage is used.

use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::ctx::load_color_attachment;
use crate::render::{RenderCtx, RenderTarget};

const PRELUDE: &str = include_str!("shaders/shadertoy_prelude.wgsl");
const DEFAULT_VERTEX: &str = include_str!("shaders/fullscreen.wgsl");

/// Two triangles covering clip space.
const QUAD: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse shader `{name}`:\n{message}")]
    Parse { name: String, message: String },
    #[error("shader `{name}` failed validation:\n{message}")]
    Validation { name: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read texture `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode texture `{}`", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("texture is {width}x{height}, device limit is {max} px per side")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Shader capabilities granted by a device created with `features`.
pub fn shader_capabilities(features: wgpu::Features) -> naga::valid::Capabilities {
    use naga::valid::Capabilities as C;

    [
        (wgpu::Features::SHADER_F64, C::FLOAT64),
        (wgpu::Features::SHADER_F16, C::SHADER_FLOAT16),
        (wgpu::Features::SHADER_INT64, C::SHADER_INT64),
        (wgpu::Features::SHADER_PRIMITIVE_INDEX, C::PRIMITIVE_INDEX),
    ]
    .into_iter()
    .filter(|(feature, _)| features.contains(*feature))
    .fold(C::empty(), |caps, (_, cap)| caps | cap)
}

/// Named WGSL source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    name: String,
    code: String,
}

impl ShaderSource {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self { name: name.into(), code: code.into() }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let code = std::fs::read_to_string(path)
            .map_err(|source| ShaderError::Io { path: path.to_path_buf(), source })?;
        Ok(Self::new(path.display().to_string(), code))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Parses and validates the source as a complete WGSL module.
    ///
    /// Constructs outside `capabilities` (see [`shader_capabilities`]) are
    /// validation errors.
    pub fn validate(
        &self,
        capabilities: naga::valid::Capabilities,
    ) -> Result<naga::Module, ShaderError> {
        let module = naga::front::wgsl::parse_str(&self.code).map_err(|e| ShaderError::Parse {
            name: self.name.clone(),
            message: e.emit_to_string(&self.code),
        })?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            capabilities,
        )
        .validate(&module)
        .map_err(|e| ShaderError::Validation {
            name: self.name.clone(),
            message: e.emit_to_string(&self.code),
        })?;

        Ok(module)
    }
}

/// A validated shader-quad module: prelude, vertex stage and fragment stage.
#[derive(Debug, Clone)]
pub struct ShaderQuadProgram {
    source: ShaderSource,
    features: wgpu::Features,
}

impl ShaderQuadProgram {
    /// Joins `fragment` (and `vertex`, if given) with the prelude and validates
    /// the result, including the `vs_main` / `fs_main` entry points, against
    /// what a device with `features` can run.
    pub fn compose(
        fragment: &ShaderSource,
        vertex: Option<&ShaderSource>,
        features: wgpu::Features,
    ) -> Result<Self, ShaderError> {
        let vertex_code = vertex.map_or(DEFAULT_VERTEX, ShaderSource::code);
        let name = match vertex {
            Some(v) => format!("{} + {}", v.name(), fragment.name()),
            None => fragment.name().to_string(),
        };

        let source = ShaderSource::new(
            name,
            format!("{PRELUDE}\n{vertex_code}\n{}", fragment.code()),
        );
        let module = source.validate(shader_capabilities(features))?;

        for (stage, entry) in [
            (naga::ShaderStage::Vertex, "vs_main"),
            (naga::ShaderStage::Fragment, "fs_main"),
        ] {
            let found = module
                .entry_points
                .iter()
                .any(|ep| ep.stage == stage && ep.name == entry);
            if !found {
                return Err(ShaderError::Validation {
                    name: source.name.clone(),
                    message: format!("missing {stage:?} entry point `{entry}`"),
                });
            }
        }

        log::info!("shader `{}` validated for features {features:?}", source.name);
        Ok(Self { source, features })
    }

    pub fn source(&self) -> &ShaderSource {
        &self.source
    }

    /// The device features the program was validated against.
    pub fn features(&self) -> wgpu::Features {
        self.features
    }
}

/// RGBA8 image for binding `tex0`, stored bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderQuadTexture {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl ShaderQuadTexture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|source| TextureError::Io { path: path.to_path_buf(), source })?;
        let image = image::load_from_memory(&bytes)
            .map_err(|source| TextureError::Decode { path: path.to_path_buf(), source })?;
        Ok(Self::from_image(image))
    }

    /// Flips vertically so that `uv.y = 0` samples the bottom of the image.
    pub fn from_image(image: image::DynamicImage) -> Self {
        let rgba = image.flipv().into_rgba8();
        let (width, height) = rgba.dimensions();
        Self { width, height, rgba: rgba.into_raw() }
    }

    /// 1x1 opaque white, bound when no texture is supplied.
    pub fn white() -> Self {
        Self { width: 1, height: 1, rgba: vec![255; 4] }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Fails when either side exceeds `limits.max_texture_dimension_2d`.
    pub fn check_limits(&self, limits: &wgpu::Limits) -> Result<(), TextureError> {
        let max = limits.max_texture_dimension_2d;
        if self.width > max || self.height > max {
            return Err(TextureError::TooLarge { width: self.width, height: self.height, max });
        }
        Ok(())
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ShaderQuadUniforms {
    pub time: f32,
    pub _pad: f32,
    pub resolution: [f32; 2],
}

impl ShaderQuadUniforms {
    pub fn new(time: f32, width: u32, height: u32) -> Self {
        Self { time, _pad: 0.0, resolution: [width as f32, height as f32] }
    }
}

/// Renders a [`ShaderQuadProgram`] over the whole target.
pub struct ShaderQuadRenderer {
    program: ShaderQuadProgram,
    texture_data: ShaderQuadTexture,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,

    uniform_ubo: Option<wgpu::Buffer>,
    quad_vbo: Option<wgpu::Buffer>,
    texture: Option<(wgpu::Texture, wgpu::TextureView, wgpu::Sampler)>,

    /// Set once the device turned out to lack the program's features.
    unsupported: bool,
}

impl ShaderQuadRenderer {
    pub fn new(program: ShaderQuadProgram, texture: Option<ShaderQuadTexture>) -> Self {
        Self {
            program,
            texture_data: texture.unwrap_or_else(ShaderQuadTexture::white),
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            uniform_ubo: None,
            quad_vbo: None,
            texture: None,
            unsupported: false,
        }
    }

    /// Draws the quad with `time` seconds and the drawable size as uniforms.
    ///
    /// Draws nothing on a device missing the features the program was
    /// validated against.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, time: f32) {
        if self.unsupported {
            return;
        }
        let missing = self.program.features().difference(ctx.device.features());
        if !missing.is_empty() {
            log::error!(
                "shader `{}` needs device features {missing:?}; not drawing",
                self.program.source().name()
            );
            self.unsupported = true;
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_texture(ctx);
        self.ensure_bindings(ctx);

        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        let u = ShaderQuadUniforms::new(time, ctx.size.width, ctx.size.height);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cogwheel shader quad pass"),
            color_attachments: &[Some(load_color_attachment(target.color_view))],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.draw(0..QUAD.len() as u32, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let source = self.program.source();
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.name()),
            source: wgpu::ShaderSource::Wgsl(source.code().into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("cogwheel shader quad bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: wgpu::BufferSize::new(
                                    std::mem::size_of::<ShaderQuadUniforms>() as u64,
                                ),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("cogwheel shader quad pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cogwheel shader quad pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[quad_layout()],
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
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
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

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cogwheel shader quad vbo"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }

    fn ensure_texture(&mut self, ctx: &RenderCtx<'_>) {
        if self.texture.is_some() {
            return;
        }

        if let Err(e) = self.texture_data.check_limits(&ctx.device.limits()) {
            log::error!("{e}; binding a white texture instead");
            self.texture_data = ShaderQuadTexture::white();
        }

        let (width, height) = self.texture_data.size();
        let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("cogwheel shader quad tex0"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            self.texture_data.rgba(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("cogwheel shader quad sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        log::debug!("ShaderQuadRenderer: uploaded {width}x{height} texture");

        self.texture = Some((texture, view, sampler));
        self.bind_group = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some((_, view, sampler)) = self.texture.as_ref() else { return };

        let ubo = self.uniform_ubo.take().unwrap_or_else(|| {
            ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("cogwheel shader quad ubo"),
                size: std::mem::size_of::<ShaderQuadUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cogwheel shader quad bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.uniform_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }
}

const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

fn quad_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &QUAD_ATTRS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRADIENT: &str = r#"
@fragment
fn fs_main(v: QuadOut) -> @location(0) vec4<f32> {
    let pulse = 0.5 + 0.5 * sin(shadertoy.time);
    let texel = textureSample(tex0, tex0_sampler, v.uv);
    return vec4<f32>(v.uv * pulse, 0.5, 1.0) * texel;
}
"#;

    const NO_FEATURES: wgpu::Features = wgpu::Features::empty();

    const F64_FRAGMENT: &str = r#"
@fragment
fn fs_main(v: QuadOut) -> @location(0) vec4<f32> {
    let x: f64 = f64(shadertoy.time);
    return vec4<f32>(v.uv, f32(x), 1.0);
}
"#;

    fn fragment(code: &str) -> ShaderSource {
        ShaderSource::new("test.wgsl", code)
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn gear_shader_validates() {
        let src = ShaderSource::new("gear.wgsl", include_str!("shaders/gear.wgsl"));
        let module = src.validate(shader_capabilities(wgpu::Features::empty())).unwrap();
        assert_eq!(module.entry_points.len(), 2);
    }

    #[test]
    fn default_vertex_with_fragment_composes() {
        let program = ShaderQuadProgram::compose(&fragment(GRADIENT), None, NO_FEATURES).unwrap();
        assert!(program.source().code().contains("fn vs_main"));
        assert_eq!(program.source().name(), "test.wgsl");
    }

    #[test]
    fn custom_vertex_replaces_default() {
        let vertex = ShaderSource::new(
            "flip.wgsl",
            r#"
@vertex
fn vs_main(@location(0) coord2d: vec2<f32>) -> QuadOut {
    var out: QuadOut;
    out.position = vec4<f32>(coord2d.x, -coord2d.y, 0.0, 1.0);
    out.uv = coord2d;
    return out;
}
"#,
        );
        let program =
            ShaderQuadProgram::compose(&fragment(GRADIENT), Some(&vertex), NO_FEATURES).unwrap();
        assert_eq!(program.source().name(), "flip.wgsl + test.wgsl");
        assert_eq!(program.source().code().matches("fn vs_main").count(), 1);
    }

    #[test]
    fn syntax_error_is_a_parse_error() {
        let broken = fragment("@fragment fn fs_main( {");
        let err = ShaderQuadProgram::compose(&broken, None, NO_FEATURES).unwrap_err();
        assert!(matches!(err, ShaderError::Parse { .. }), "{err}");
    }

    #[test]
    fn type_error_is_reported() {
        let bad = r#"
@fragment
fn fs_main(v: QuadOut) -> @location(0) vec4<f32> {
    return shadertoy.time;
}
"#;
        let err = ShaderQuadProgram::compose(&fragment(bad), None, NO_FEATURES).unwrap_err();
        assert!(
            matches!(err, ShaderError::Parse { .. } | ShaderError::Validation { .. }),
            "{err}"
        );
    }

    #[test]
    fn missing_fragment_entry_point_is_rejected() {
        let helper = fragment("fn helper() -> f32 { return 1.0; }");
        let err = ShaderQuadProgram::compose(&helper, None, NO_FEATURES).unwrap_err();
        match err {
            ShaderError::Validation { message, .. } => assert!(message.contains("fs_main")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn f64_needs_the_shader_f64_feature() {
        let err = ShaderQuadProgram::compose(&fragment(F64_FRAGMENT), None, NO_FEATURES)
            .unwrap_err();
        assert!(matches!(err, ShaderError::Validation { .. }), "{err}");

        let program =
            ShaderQuadProgram::compose(&fragment(F64_FRAGMENT), None, wgpu::Features::SHADER_F64)
                .unwrap();
        assert_eq!(program.features(), wgpu::Features::SHADER_F64);
    }

    #[test]
    fn capabilities_follow_features() {
        use naga::valid::Capabilities as C;
        assert_eq!(shader_capabilities(NO_FEATURES), C::empty());
        let caps = shader_capabilities(wgpu::Features::SHADER_F64 | wgpu::Features::SHADER_INT64);
        assert_eq!(caps, C::FLOAT64 | C::SHADER_INT64);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ShaderSource::load("/nonexistent/shader.wgsl").unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/shader.wgsl"));
    }

    // ── texture ───────────────────────────────────────────────────────────

    #[test]
    fn texture_is_flipped_vertically() {
        let mut img = image::RgbaImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));

        let tex = ShaderQuadTexture::from_image(image::DynamicImage::ImageRgba8(img));
        assert_eq!(tex.size(), (1, 2));
        assert_eq!(&tex.rgba()[..4], &[0, 0, 255, 255]);
        assert_eq!(&tex.rgba()[4..], &[255, 0, 0, 255]);
    }

    #[test]
    fn fallback_texture_is_white() {
        let tex = ShaderQuadTexture::white();
        assert_eq!(tex.size(), (1, 1));
        assert_eq!(tex.rgba(), &[255, 255, 255, 255]);
    }

    #[test]
    fn undecodable_texture_is_a_decode_error() {
        let path = std::env::temp_dir()
            .join(format!("cogwheel-not-an-image-{}.png", std::process::id()));
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = ShaderQuadTexture::load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, TextureError::Decode { .. }));
    }

    #[test]
    fn oversized_texture_is_rejected() {
        let limits = wgpu::Limits::default();
        let max = limits.max_texture_dimension_2d;

        let wide = ShaderQuadTexture::from_image(image::DynamicImage::new_rgba8(max + 1, 1));
        match wide.check_limits(&limits) {
            Err(TextureError::TooLarge { width, height, max: m }) => {
                assert_eq!((width, height, m), (max + 1, 1, max));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let fits = ShaderQuadTexture::from_image(image::DynamicImage::new_rgba8(max, 1));
        assert!(fits.check_limits(&limits).is_ok());
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    #[test]
    fn uniforms_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<ShaderQuadUniforms>(), 16);
        let u = ShaderQuadUniforms::new(1.5, 640, 480);
        assert_eq!(u.resolution, [640.0, 480.0]);
        assert_eq!(u.time, 1.5);
    }
}
