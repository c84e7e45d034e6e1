use std::time::Duration;

use clap::Parser;
use cogwheel_engine::device::GpuInit;
use cogwheel_engine::window::RuntimeConfig;

/// Spinning gears, GLES2-style.
#[derive(Parser, Debug)]
#[command(name = "es2gears", version, about = "Three lit gear wheels turning in mesh")]
pub struct Args {
    /// Create an opaque surface instead of a transparent one.
    #[arg(short = 'o', long)]
    pub opaque: bool,

    /// Don't sync to the display refresh.
    #[arg(short = 'b', long = "no-vsync")]
    pub no_vsync: bool,

    /// Start in a window instead of fullscreen.
    #[arg(long)]
    pub windowed: bool,

    /// Window width in logical pixels.
    #[arg(long, default_value_t = 250)]
    pub width: u32,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 250)]
    pub height: u32,

    /// Seconds between frame rate reports.
    #[arg(long, value_name = "SECS", default_value_t = 5,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub benchmark_interval: u64,

    /// Log filter in env_logger syntax (overrides RUST_LOG).
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Args {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig::new("es2gears")
            .with_size(self.width as f64, self.height as f64)
            .with_fullscreen(!self.windowed)
            .with_transparent(!self.opaque)
    }

    pub fn gpu_init(&self) -> GpuInit {
        let alpha = if self.opaque {
            wgpu::CompositeAlphaMode::Opaque
        } else {
            wgpu::CompositeAlphaMode::PreMultiplied
        };

        GpuInit {
            prefer_srgb: false,
            ..GpuInit::default()
        }
        .with_vsync(!self.no_vsync)
        .with_depth(wgpu::TextureFormat::Depth24Plus)
        .with_alpha_mode(alpha)
    }

    pub fn benchmark_interval(&self) -> Duration {
        Duration::from_secs(self.benchmark_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("es2gears").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_classic_demo() {
        let args = parse(&[]);
        let cfg = args.runtime_config();
        assert!(cfg.fullscreen);
        assert!(cfg.transparent);
        assert_eq!((cfg.initial_size.width, cfg.initial_size.height), (250.0, 250.0));
        assert_eq!(args.benchmark_interval(), Duration::from_secs(5));

        let init = args.gpu_init();
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
        assert_eq!(init.depth_format, Some(wgpu::TextureFormat::Depth24Plus));
        assert_eq!(init.alpha_mode, Some(wgpu::CompositeAlphaMode::PreMultiplied));
    }

    #[test]
    fn short_flags() {
        let args = parse(&["-o", "-b"]);
        assert!(!args.runtime_config().transparent);
        let init = args.gpu_init();
        assert_eq!(init.present_mode, wgpu::PresentMode::AutoNoVsync);
        assert_eq!(init.alpha_mode, Some(wgpu::CompositeAlphaMode::Opaque));
    }

    #[test]
    fn windowed_with_size() {
        let cfg = parse(&["--windowed", "--width", "640", "--height", "480"]).runtime_config();
        assert!(!cfg.fullscreen);
        assert_eq!((cfg.initial_size.width, cfg.initial_size.height), (640.0, 480.0));
    }

    #[test]
    fn zero_benchmark_interval_is_rejected() {
        assert!(Args::try_parse_from(["es2gears", "--benchmark-interval", "0"]).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["es2gears", "-s"]).is_err());
    }
}
