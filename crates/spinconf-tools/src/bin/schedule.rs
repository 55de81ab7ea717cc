//! Field-Cool Schedule
//!
//! Loads a control file and prints the temperature applied at every
//! sampling point of the field-cool program.
//!
//! Usage: `schedule <input> [--json]`

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

use spinconf_input::{load, Options};
use spinconf_tools::schedule::FieldCoolPlan;

#[derive(Parser, Debug)]
#[command(name = "schedule")]
#[command(about = "Print the field-cool temperature schedule of a control file")]
struct Args {
    /// Path to the control file
    input: PathBuf,

    /// Print samples as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() {
    spinconf_tools::init_logging();

    let args = Args::parse();

    let config = match load(&args.input, &Options::default()) {
        Ok(config) => config,
        Err(err) => {
            error!("{}: {}", err.severity(), err);
            process::exit(1);
        }
    };

    let plan = match FieldCoolPlan::from_config(&config) {
        Ok(plan) => plan,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let samples = plan.samples();
    info!(
        "{} samples over {} runs, cooling function {}",
        samples.len(),
        plan.runs,
        plan.schedule.function.literal()
    );

    if args.json {
        match serde_json::to_string_pretty(&samples) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize schedule: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("{:>5} {:>12} {:>14} {:>12}", "run", "step", "phase", "T [K]");
    for sample in &samples {
        let phase = match sample.phase {
            spinconf_tools::schedule::Phase::Equilibration => "equilibration",
            spinconf_tools::schedule::Phase::Cooling => "cooling",
        };
        println!(
            "{:>5} {:>12} {:>14} {:>12.4}",
            sample.run, sample.step, phase, sample.temperature
        );
    }
}
