//! Configuration Dump
//!
//! Loads a control file and writes the resulting configuration as JSON.
//!
//! Usage: `dump <input> [--output <file>]`

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

use spinconf_input::{load, Options};

#[derive(Parser, Debug)]
#[command(name = "dump")]
#[command(about = "Write the configuration loaded from a control file as JSON")]
struct Args {
    /// Path to the control file
    input: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Capacity of the material table
    #[arg(long, default_value_t = spinconf_input::loader::DEFAULT_MAX_MATERIALS)]
    max_materials: usize,
}

fn main() {
    spinconf_tools::init_logging();

    let args = Args::parse();

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

    let json = match serde_json::to_string_pretty(&config) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize configuration: {}", e);
            process::exit(1);
        }
    };

    match args.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, json) {
                error!("Failed to write '{}': {}", path.display(), e);
                process::exit(1);
            }
            info!("Wrote configuration to {}", path.display());
        }
        None => println!("{}", json),
    }
}
