//! The check command: validate a declaration without writing anything
//!
//! Intended as a CI gate; exits non-zero on the first invalid capability.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use uifed_config::BuildConfig;
use uifed_manifest::{normalize_declaration, PluginDeclaration};

use crate::common::GlobalOpts;
use crate::logger;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the declaration file (defaults from uifed.toml)
    #[arg(long)]
    pub declaration: Option<PathBuf>,

    /// Path to the uifed.toml build configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn handle_check(args: CheckArgs, opts: &GlobalOpts) -> Result<()> {
    let config = match args.config {
        Some(path) => BuildConfig::load_from_path(&path)?,
        None => BuildConfig::load()?,
    };
    let declaration_path = args.declaration.unwrap_or(config.declaration);

    debug!("Checking declaration {:?}", declaration_path);
    let declaration = PluginDeclaration::load(&declaration_path)
        .with_context(|| format!("failed to load declaration {}", declaration_path.display()))?;
    let normalized = normalize_declaration(&declaration)?;

    if !opts.quiet {
        logger::success(&format!(
            "{}: {} task(s), all capability names valid",
            declaration_path.display(),
            normalized.len()
        ));
        if opts.verbosity_level() > 0 {
            for task in &normalized {
                let capabilities: Vec<&str> = task
                    .capabilities
                    .iter()
                    .map(|cap| cap.capability.as_str())
                    .collect();
                logger::info(&format!(
                    "  {}: {}",
                    task.qualified_name.cyan(),
                    capabilities.join(", ")
                ));
            }
        }
    }

    Ok(())
}
