//! Artifact persistence
//!
//! Writes the manifest and the federation options document as JSON. Parent
//! directories are created as needed and files are written atomically (temp
//! file + rename), so a failed build never truncates a previous artifact.
//!
//! Callers run the whole transform first and persist last; nothing in this
//! module is reached while a declaration can still fail validation.

use anyhow::Result;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::federation::FederationOptions;
use crate::manifest::Manifest;

/// Write the manifest to `output_path`.
pub fn write_to_path(manifest: &Manifest, output_path: &Path) -> Result<()> {
    debug!("Writing manifest to: {:?}", output_path);

    let json = manifest.to_json_string()?;
    write_atomic(output_path, &json)?;

    info!("Manifest written successfully to: {:?}", output_path);
    info!("Total tasks: {}", manifest.len());

    Ok(())
}

/// Write the federation options document to `output_path`.
pub fn write_federation_to_path(options: &FederationOptions, output_path: &Path) -> Result<()> {
    debug!("Writing federation options to: {:?}", output_path);

    let json = options.to_json_string()?;
    write_atomic(output_path, &json)?;

    info!("Federation options written successfully to: {:?}", output_path);
    info!("Exposed modules: {}", options.exposes.len());

    Ok(())
}

/// Read a manifest back from disk (round-trips and testing).
pub fn read_from_path(manifest_path: &Path) -> Result<Manifest> {
    debug!("Reading manifest from: {:?}", manifest_path);

    let content = fs::read_to_string(manifest_path)?;
    let manifest = Manifest::from_json_str(&content)?;

    info!("Manifest loaded successfully ({} tasks)", manifest.len());

    Ok(manifest)
}

fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // Write to temp file then rename
    let temp_path = path.with_extension("json.tmp");
    {
        let file = fs::File::create(&temp_path)?;
        let mut writer = io::BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
    }
    fs::rename(&temp_path, path)
}
