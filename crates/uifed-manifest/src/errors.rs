use std::io;
use thiserror::Error;

use crate::types::UiCapability;

/// Errors that can occur while building the plugin UI artifacts
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse declaration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The capability \"{capability}\" declared for task \"{task}\" is unknown. Allowed capabilities are: {}", UiCapability::allowed_names())]
    UnknownCapability { capability: String, task: String },

    #[error("Invalid expose key \"{0}\". It should contain at least one \"/\".")]
    MalformedKey(String),
}
