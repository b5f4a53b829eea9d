//! Project identifier resolution
//!
//! The federation bundle must be registered under the host project's name,
//! which lives in the Gradle settings file as `rootProject.name = 'name'`.
//! The core transform receives the resolved name as a plain parameter; this
//! module is the only place that reads it from disk.

use std::fs;
use std::path::{Path, PathBuf};

/// Error type for project name resolution
#[derive(Debug, Clone)]
pub enum SettingsError {
    /// The settings file does not exist or could not be read
    SettingsNotFound(PathBuf),
    /// The settings file has no usable `rootProject.name` assignment
    MissingProjectName(PathBuf),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::SettingsNotFound(path) => {
                write!(f, "Settings file not found: {}", path.display())
            }
            SettingsError::MissingProjectName(path) => {
                write!(
                    f,
                    "Could not extract project name from {}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Resolve the project name from a Gradle settings file.
///
/// Scans line by line for `rootProject.name = '<name>'` (single or double
/// quotes) and returns the first match.
pub fn project_name(settings_path: &Path) -> Result<String, SettingsError> {
    let content = fs::read_to_string(settings_path)
        .map_err(|_| SettingsError::SettingsNotFound(settings_path.to_path_buf()))?;

    parse_project_name(&content)
        .ok_or_else(|| SettingsError::MissingProjectName(settings_path.to_path_buf()))
}

fn parse_project_name(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("rootProject.name")?;
        let value = rest.trim_start().strip_prefix('=')?.trim();
        let name = strip_quotes(value)?;
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    })
}

fn strip_quotes(value: &str) -> Option<&str> {
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
}
