//! Console output helpers
//!
//! User-facing messages go through the helpers below; diagnostic logging goes
//! through `tracing`, initialized once from the CLI verbosity.

use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Initialize tracing output on stderr.
/// Verbosity: 0 = warn only, 1 = debug (-v), 2 = trace (-vv).
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

pub fn success(message: &str) {
    println!("{} {}", "✔".green(), message);
}

pub fn info(message: &str) {
    println!("{}", message);
}
