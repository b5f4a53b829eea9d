//! Declaration types for the plugin UI build
//!
//! A plugin author declares, per task, which UI capabilities the task exposes
//! and which module implements each of them. Capability names are a closed
//! set: [`UiCapability`] is the only extension point, caller input never is.
//!
//! Declarations are parsed here but validated in [`crate::normalize`], once,
//! at the boundary.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ManifestError;

/// Static configuration attached to a capability, passed through to the
/// manifest unmodified (arbitrary scalar or structured values).
pub type StaticConfig = serde_json::Map<String, serde_json::Value>;

/// The closed set of UI capabilities a task can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiCapability {
    TopologyDetails,
    LogDetails,
}

impl UiCapability {
    /// The full allow-list.
    pub const ALL: [UiCapability; 2] = [UiCapability::TopologyDetails, UiCapability::LogDetails];

    pub fn as_str(self) -> &'static str {
        match self {
            UiCapability::TopologyDetails => "topology-details",
            UiCapability::LogDetails => "log-details",
        }
    }

    /// Runtime lookup for capability names coming from a declaration file.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Comma-separated allow-list, used in validation errors.
    pub fn allowed_names() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for UiCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exposed UI capability of one task.
///
/// The capability name is kept raw here; unknown names are rejected during
/// normalization with an error naming the allowed set. The module path is
/// opaque and never checked for existence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityDeclaration {
    pub capability: String,
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_config: Option<StaticConfig>,
}

impl CapabilityDeclaration {
    /// Declaration built in-language, where the closed set is statically
    /// known at the call site.
    pub fn new(capability: UiCapability, module: impl Into<String>) -> Self {
        CapabilityDeclaration {
            capability: capability.as_str().to_string(),
            module: module.into(),
            static_config: None,
        }
    }

    pub fn with_static_config(mut self, static_config: StaticConfig) -> Self {
        self.static_config = Some(static_config);
        self
    }
}

/// One task block: the task-local name and its exposed capabilities, in
/// declaration order. Duplicate capability names are not rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDeclaration {
    pub name: String,
    #[serde(default)]
    pub expose: Vec<CapabilityDeclaration>,
}

/// Module path and static configuration of a path-keyed expose entry,
/// see [`PluginDeclaration::from_path_entries`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathEntry {
    pub module: String,
    pub static_config: Option<StaticConfig>,
}

/// The full declaration supplied by the plugin author: the plugin identifier
/// plus its task blocks. The fully-qualified name of a task is
/// `<plugin>.<task-local name>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDeclaration {
    pub plugin: String,
    #[serde(rename = "task", default)]
    pub tasks: Vec<TaskDeclaration>,
}

impl PluginDeclaration {
    /// Parse a declaration from its TOML form.
    pub fn from_toml_str(input: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(input)?)
    }

    /// Load a declaration file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Build a declaration from the flat, path-keyed form where each entry is
    /// keyed `<task-local name>/<capability>` (an optional leading `./` is
    /// ignored). Entries for the same task fold into one ordered block.
    ///
    /// A key without a `/` separator fails with
    /// [`ManifestError::MalformedKey`] before any entry is produced.
    pub fn from_path_entries<I>(plugin: impl Into<String>, entries: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = (String, PathEntry)>,
    {
        let mut tasks: Vec<TaskDeclaration> = Vec::new();

        for (key, entry) in entries {
            let trimmed = key.strip_prefix("./").unwrap_or(&key);
            let Some((task, capability)) = trimmed.rsplit_once('/') else {
                return Err(ManifestError::MalformedKey(key.clone()));
            };

            let declaration = CapabilityDeclaration {
                capability: capability.to_string(),
                module: entry.module,
                static_config: entry.static_config,
            };

            match tasks.iter_mut().find(|t| t.name == task) {
                Some(existing) => existing.expose.push(declaration),
                None => tasks.push(TaskDeclaration {
                    name: task.to_string(),
                    expose: vec![declaration],
                }),
            }
        }

        Ok(PluginDeclaration {
            plugin: plugin.into(),
            tasks,
        })
    }
}
