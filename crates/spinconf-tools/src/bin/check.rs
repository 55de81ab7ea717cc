//! Input Checker
//!
//! Loads a control file, and any material file it references, and reports
//! the first rejected directive.
//!
//! Usage: `check <input>`

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};

use spinconf_input::{load, Options};

#[derive(Parser, Debug)]
#[command(name = "check")]
#[command(about = "Load a spinconf control file and report diagnostics")]
struct Args {
    /// Path to the control file
    input: PathBuf,

    /// Capacity of the material table
    #[arg(long, default_value_t = spinconf_input::loader::DEFAULT_MAX_MATERIALS)]
    max_materials: usize,
}

fn main() {
    spinconf_tools::init_logging();

    let args = Args::parse();

    if !args.input.is_file() {
        error!("'{}' is not a file", args.input.display());
        process::exit(1);
    }

    let options = Options {
        max_materials: args.max_materials,
        ..Options::default()
    };

    let config = match load(&args.input, &options) {
        Ok(config) => config,
        Err(err) => {
            error!("{}: {}", err.severity(), err);
            process::exit(1);
        }
    };

    if config.materials.is_empty() {
        warn!("No materials defined, add a material:file statement");
    }

    info!("Input is valid");
    info!("  - Program: {}", config.sim.program.literal());
    info!("  - Integrator: {}", config.sim.integrator.literal());
    info!("  - Shape: {}", config.create.shape.literal());
    info!("  - Materials: {}", config.materials.len());
    for (index, material) in config.materials.iter().enumerate() {
        info!("      [{}] {}", index, material.name);
    }
    info!(
        "  - Outputs: {} file, {} screen, {} grain",
        config.output.file.len(),
        config.output.screen.len(),
        config.output.grain.len()
    );
}
