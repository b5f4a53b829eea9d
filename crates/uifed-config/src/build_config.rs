//! Build configuration file
//!
//! An optional `uifed.toml` next to the UI sources tells the build where to
//! find the declaration and the Gradle settings file and where to place the
//! generated artifacts. Every key has a default matching the conventional
//! plugin layout, so the file is only needed to override one of them.
//!
//! ```toml
//! declaration = "plugin-ui.toml"
//! settings = "../settings.gradle"
//! out-dir = "../src/main/resources/plugin-ui"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILENAME: &str = "uifed.toml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "UIFED_CONFIG";

/// File name of the persisted manifest artifact
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// File name of the federation options artifact
pub const FEDERATION_FILENAME: &str = "plugin-ui.federation.json";

const DEFAULT_DECLARATION: &str = "plugin-ui.toml";
const DEFAULT_SETTINGS: &str = "../settings.gradle";
const DEFAULT_OUT_DIR: &str = "../src/main/resources/plugin-ui";

/// Error type for build configuration loading
#[derive(Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read
    Read(PathBuf),
    /// The config file is not valid TOML for this schema
    Parse(PathBuf, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read(path) => {
                write!(f, "Failed to read config file: {}", path.display())
            }
            ConfigError::Parse(path, message) => {
                write!(f, "Failed to parse {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Paths the build works with, all relative to the working directory unless
/// given as absolute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BuildConfig {
    /// The declaration file written by the plugin author
    #[serde(default = "default_declaration")]
    pub declaration: PathBuf,
    /// The Gradle settings file supplying the project name
    #[serde(default = "default_settings")]
    pub settings: PathBuf,
    /// Where the manifest and federation artifacts are written
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

fn default_declaration() -> PathBuf {
    PathBuf::from(DEFAULT_DECLARATION)
}

fn default_settings() -> PathBuf {
    PathBuf::from(DEFAULT_SETTINGS)
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUT_DIR)
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            declaration: default_declaration(),
            settings: default_settings(),
            out_dir: default_out_dir(),
        }
    }
}

impl BuildConfig {
    /// The config file location: `UIFED_CONFIG` if set, `uifed.toml`
    /// otherwise.
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME), PathBuf::from)
    }

    /// Load the config from the default location, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path())
    }

    /// Load the config from a specific path, falling back to defaults when
    /// the file does not exist.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(BuildConfig::default());
        }

        let content =
            fs::read_to_string(path).map_err(|_| ConfigError::Read(path.to_path_buf()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
    }

    /// Path of the manifest artifact under the configured output directory.
    pub fn manifest_path(&self) -> PathBuf {
        self.out_dir.join(MANIFEST_FILENAME)
    }

    /// Path of the federation options artifact under the configured output
    /// directory.
    pub fn federation_path(&self) -> PathBuf {
        self.out_dir.join(FEDERATION_FILENAME)
    }
}
