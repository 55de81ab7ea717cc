//! spinconf tools
//!
//! CLI tools for checking and inspecting spinconf input files.

pub mod schedule;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
/// Default is `info` for spinconf crates and `warn` for others.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,spinconf_tools=info,spinconf_input=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
