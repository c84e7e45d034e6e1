//! shadertoy: live preview of a WGSL fragment shader.

mod app;
mod cli;

use anyhow::Result;
use clap::Parser;
use cogwheel_engine::device::GpuInit;
use cogwheel_engine::logging::{init_logging, LoggingConfig};
use cogwheel_engine::window::Runtime;

use crate::app::ShaderToyApp;
use crate::cli::Args;

fn run(args: Args) -> Result<()> {
    let gpu_init = GpuInit::default();
    let app = ShaderToyApp::load(&args, &gpu_init)?;
    Runtime::run(args.runtime_config(), gpu_init, app)
}

fn main() {
    let args = Args::parse();
    init_logging(LoggingConfig::with_filter(args.log.clone()));

    if let Err(e) = run(args) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
