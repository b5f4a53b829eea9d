//! The build command: declaration in, both artifacts out

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use uifed_config::{settings, BuildConfig};
use uifed_manifest::{
    build_exposure_map, build_manifest, manifest_writer, normalize_declaration, FederationOptions,
    PluginDeclaration,
};

use crate::common::GlobalOpts;
use crate::logger;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the declaration file (defaults from uifed.toml)
    #[arg(long)]
    pub declaration: Option<PathBuf>,

    /// Path to the Gradle settings file supplying the project name
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Directory the artifacts are written to
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Path to the uifed.toml build configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the artifacts to stdout instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

pub fn handle_build(args: BuildArgs, opts: &GlobalOpts) -> Result<()> {
    let mut config = match args.config {
        Some(path) => BuildConfig::load_from_path(&path)?,
        None => BuildConfig::load()?,
    };
    if let Some(declaration) = args.declaration {
        config.declaration = declaration;
    }
    if let Some(settings) = args.settings {
        config.settings = settings;
    }
    if let Some(out_dir) = args.out_dir {
        config.out_dir = out_dir;
    }

    debug!("Loading declaration from {:?}", config.declaration);
    let declaration = PluginDeclaration::load(&config.declaration)
        .with_context(|| format!("failed to load declaration {}", config.declaration.display()))?;

    // Everything that can fail runs before the first byte is written, so a
    // broken declaration never clobbers a previous good manifest.
    let normalized = normalize_declaration(&declaration)?;
    let manifest = build_manifest(&normalized);
    let exposes = build_exposure_map(&normalized);
    let project = settings::project_name(&config.settings)?;
    let federation = FederationOptions::new(project, exposes);

    if args.dry_run {
        println!("{}", manifest.to_json_string()?);
        println!("{}", federation.to_json_string()?);
        return Ok(());
    }

    let manifest_path = config.manifest_path();
    manifest_writer::write_to_path(&manifest, &manifest_path)?;

    let federation_path = config.federation_path();
    manifest_writer::write_federation_to_path(&federation, &federation_path)?;

    if !opts.quiet {
        logger::success(&format!(
            "Wrote manifest for {} task(s) to {}",
            manifest.len(),
            manifest_path.display()
        ));
        logger::success(&format!(
            "Wrote federation options for \"{}\" ({} exposed module(s)) to {}",
            federation.name,
            federation.exposes.len(),
            federation_path.display()
        ));
    }

    Ok(())
}
