use anyhow::{Context, Result};
use cogwheel_engine::core::{App, AppControl, FrameCtx};
use cogwheel_engine::device::GpuInit;
use cogwheel_engine::input::Key;
use cogwheel_engine::paint::Color;
use cogwheel_engine::render::{ShaderQuadProgram, ShaderQuadRenderer, ShaderQuadTexture, ShaderSource};

use crate::cli::Args;

pub struct ShaderToyApp {
    renderer: ShaderQuadRenderer,
}

impl ShaderToyApp {
    /// Loads the shaders and the optional texture and checks them against the
    /// features and limits the device will be created with.
    pub fn load(args: &Args, gpu_init: &GpuInit) -> Result<Self> {
        let fragment = ShaderSource::load(&args.fragment)?;
        let vertex = args.vertex.as_ref().map(ShaderSource::load).transpose()?;
        let program =
            ShaderQuadProgram::compose(&fragment, vertex.as_ref(), gpu_init.required_features)
                .context("shader program rejected")?;

        let texture = match &args.texture {
            Some(path) => {
                let texture = ShaderQuadTexture::load(path)?;
                texture
                    .check_limits(&gpu_init.required_limits)
                    .with_context(|| format!("texture `{}` rejected", path.display()))?;
                let (w, h) = texture.size();
                log::info!("texture `{}`: {w}x{h}", path.display());
                Some(texture)
            }
            None => None,
        };

        Ok(Self { renderer: ShaderQuadRenderer::new(program, texture) })
    }
}

impl App for ShaderToyApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }

        let time = ctx.time.elapsed;
        let renderer = &mut self.renderer;
        ctx.render(Color::BLACK, |rctx, target| renderer.render(rctx, target, time))
    }
}
