use std::path::PathBuf;

use clap::Parser;
use cogwheel_engine::window::RuntimeConfig;

/// Previews a WGSL fragment shader on a full-window quad.
#[derive(Parser, Debug)]
#[command(name = "shadertoy", version)]
pub struct Args {
    /// Fragment shader defining `fs_main`.
    #[arg(value_name = "FRAGMENT")]
    pub fragment: PathBuf,

    /// Vertex shader defining `vs_main`; a pass-through quad is used otherwise.
    #[arg(long, value_name = "FILE")]
    pub vertex: Option<PathBuf>,

    /// Image bound as `tex0`.
    #[arg(long, value_name = "FILE")]
    pub texture: Option<PathBuf>,

    #[arg(long, default_value_t = 640)]
    pub width: u32,

    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Log filter in env_logger syntax (overrides RUST_LOG).
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Args {
    pub fn runtime_config(&self) -> RuntimeConfig {
        let title = match self.fragment.file_name() {
            Some(name) => format!("shadertoy - {}", name.to_string_lossy()),
            None => "shadertoy".to_string(),
        };
        RuntimeConfig::new(title).with_size(self.width as f64, self.height as f64)
    }
}
