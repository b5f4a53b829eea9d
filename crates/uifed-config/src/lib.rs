//! Configuration for the uifed build
//!
//! Two concerns live here, both collaborators of the core transform rather
//! than part of it:
//!
//! - [`build_config`]: the optional `uifed.toml` file telling the build where
//!   the declaration, the settings file and the output directory are.
//! - [`settings`]: resolving the project identifier from the Gradle settings
//!   file, the name the federation bundle is registered under.

pub mod build_config;
pub mod settings;

pub use build_config::{
    BuildConfig, ConfigError, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILENAME, FEDERATION_FILENAME,
    MANIFEST_FILENAME,
};
pub use settings::{project_name, SettingsError};
