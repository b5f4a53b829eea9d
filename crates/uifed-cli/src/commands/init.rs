//! The init command: write a starter declaration file

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::common::GlobalOpts;
use crate::logger;

const DEFAULT_FILENAME: &str = "plugin-ui.toml";

const DECLARATION_TEMPLATE: &str = r#"# Plugin UI capability declaration
# Each [[task]] block names one task and the UI modules it exposes.
# Allowed capabilities: topology-details, log-details

plugin = "com.example.plugin"

[[task]]
name = "example.Task"

[[task.expose]]
capability = "topology-details"
module = "./src/components/TopologyDetails.vue"

# Optional static parameters handed to the host as-is
[task.expose.static_config]
height = 80

[[task.expose]]
capability = "log-details"
module = "./src/components/LogDetails.vue"
"#;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// File to create (default: plugin-ui.toml)
    pub file: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn handle_init(args: InitArgs, opts: &GlobalOpts) -> Result<()> {
    let target = args.file.unwrap_or_else(|| PathBuf::from(DEFAULT_FILENAME));

    if target.exists() && !args.force {
        bail!(
            "'{}' already exists (use --force to overwrite)",
            target.display()
        );
    }

    fs::write(&target, DECLARATION_TEMPLATE)
        .with_context(|| format!("failed to write {}", target.display()))?;

    if !opts.quiet {
        logger::success(&format!("Created declaration file: {}", target.display()));
        println!();
        println!("Next steps:");
        println!("  1. Set {} to your plugin identifier", "plugin".bold());
        println!("  2. Declare each task and the UI modules it exposes");
        println!("  3. Validate the declaration: uifed check");
        println!("  4. Produce the artifacts: uifed build");
    }

    Ok(())
}
