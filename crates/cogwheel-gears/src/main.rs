//! es2gears: the classic spinning gears on wgpu.

mod app;
mod cli;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use cogwheel_engine::logging::{init_logging, LoggingConfig};
use cogwheel_engine::mesh::GearMesh;
use cogwheel_engine::window::Runtime;

use crate::app::GearsApp;
use crate::cli::Args;
use crate::scene::GEARS;

fn run(args: Args) -> Result<()> {
    let meshes = GEARS
        .iter()
        .map(|spec| GearMesh::generate(&spec.params))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to build gear geometry")?;

    let app = GearsApp::new(meshes, args.benchmark_interval(), !args.opaque);
    Runtime::run(args.runtime_config(), args.gpu_init(), app)
}

fn main() {
    let args = Args::parse();
    init_logging(LoggingConfig::with_filter(args.log.clone()));

    if let Err(e) = run(args) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
