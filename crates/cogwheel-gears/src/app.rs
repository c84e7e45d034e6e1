use std::time::Duration;

use cogwheel_engine::core::{App, AppControl, FrameCtx};
use cogwheel_engine::input::{Key, MouseButton};
use cogwheel_engine::mesh::GearMesh;
use cogwheel_engine::paint::Color;
use cogwheel_engine::render::{Gear, GearDraw, GearRenderer, DEFAULT_LIGHT};
use cogwheel_engine::time::FrameRateMeter;

use crate::scene::{GearsScene, GEARS};

/// The es2gears application: three meshing gears and a frame rate log.
pub struct GearsApp {
    /// Generated geometry, moved to the GPU on the first frame.
    pending: Vec<GearMesh>,
    gears: Vec<Gear>,
    renderer: GearRenderer,
    scene: GearsScene,
    meter: FrameRateMeter,
    clear: Color,
    cursor_hidden: Option<bool>,
}

impl GearsApp {
    pub fn new(meshes: Vec<GearMesh>, benchmark_interval: Duration, transparent: bool) -> Self {
        debug_assert_eq!(meshes.len(), GEARS.len());
        Self {
            pending: meshes,
            gears: Vec::new(),
            renderer: GearRenderer::new(),
            scene: GearsScene::new(),
            meter: FrameRateMeter::new(benchmark_interval),
            clear: if transparent { Color::transparent() } else { Color::BLACK },
            cursor_hidden: None,
        }
    }

    fn upload_pending(&mut self, device: &wgpu::Device) {
        if self.pending.is_empty() {
            return;
        }
        self.gears
            .extend(self.pending.drain(..).map(|mesh| Gear::upload(device, mesh)));
        log::debug!("uploaded {} gears", self.gears.len());
    }
}

impl App for GearsApp {
    fn on_resize(&mut self, width: u32, height: u32) {
        // Minimised.
        if width == 0 || height == 0 {
            return;
        }
        self.scene.resize(width, height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }
        if ctx.input_frame.key_pressed(Key::F11) {
            let fullscreen = !ctx.window.is_fullscreen();
            log::debug!("fullscreen: {fullscreen}");
            ctx.window.set_fullscreen(fullscreen);
        }
        if ctx.input_frame.button_pressed(MouseButton::Left) {
            ctx.window.drag();
        }

        let hide = ctx.window.is_fullscreen();
        if self.cursor_hidden != Some(hide) {
            ctx.window.set_cursor_visible(!hide);
            self.cursor_hidden = Some(hide);
        }

        self.upload_pending(ctx.gpu.device());

        self.scene.advance(ctx.time.dt);
        if let Some(report) = self.meter.record(ctx.time.now) {
            log::info!("{report}");
        }

        let view = self.scene.view_transform();
        let draws: Vec<GearDraw<'_>> = self
            .gears
            .iter()
            .zip(GEARS.iter())
            .map(|(gear, spec)| {
                GearDraw::new(gear, &view, spec.x, spec.y, self.scene.gear_angle(spec), spec.color)
            })
            .collect();

        let renderer = &mut self.renderer;
        let projection = self.scene.projection();
        ctx.render_3d(self.clear, |rctx, target| {
            renderer.render(rctx, target, projection, DEFAULT_LIGHT, &draws);
        })
    }
}
