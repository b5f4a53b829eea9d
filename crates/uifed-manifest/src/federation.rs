//! Federation options for the bundler integration
//!
//! The exposure map is the one artifact that needs module paths: it tells the
//! module-federation layer which physical module implements which capability
//! slot. The surrounding [`FederationOptions`] document is handed to the
//! bundler as-is; its output is never inspected here.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::errors::ManifestError;
use crate::normalize::NormalizedTask;
use crate::types::UiCapability;

/// File name of the remote entry bundle produced by the bundler.
pub const PLUGIN_UI_FILENAME: &str = "plugin-ui.js";

/// Canonical exposure key for one capability of one task.
pub fn exposure_key(task: &str, capability: UiCapability) -> String {
    format!("./{}/{}", task, capability.as_str())
}

/// Ordered exposure table: `./<task-local name>/<capability>` to module path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureMap {
    entries: Vec<(String, String)>,
}

/// Derive the exposure map from the normalized declaration. Every capability
/// contributes exactly one entry, scoped by its task-local name.
pub fn build_exposure_map(normalized: &[NormalizedTask]) -> ExposureMap {
    let mut map = ExposureMap::default();
    for task in normalized {
        for cap in &task.capabilities {
            map.insert(exposure_key(&task.task, cap.capability), cap.module.clone());
        }
    }
    map
}

impl ExposureMap {
    /// Insert one exposure. A duplicate key keeps its original position and
    /// takes the latest module path (last write wins for a capability
    /// declared twice within one task).
    pub fn insert(&mut self, key: String, module: String) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.0 == key) {
            warn!(
                "exposure key \"{}\" declared more than once; keeping the latest module path",
                key
            );
            entry.1 = module;
        } else {
            self.entries.push((key, module));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, module)| module.as_str())
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, module)| (key.as_str(), module.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ExposureMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, module) in &self.entries {
            map.serialize_entry(key, module)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExposureMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ExposureMapVisitor;

        impl<'de> Visitor<'de> for ExposureMapVisitor {
            type Value = ExposureMap;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of exposure keys to module paths")
            }

            fn visit_map<A>(self, mut access: A) -> Result<ExposureMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, String>()? {
                    entries.push(entry);
                }
                Ok(ExposureMap { entries })
            }
        }

        deserializer.deserialize_map(ExposureMapVisitor)
    }
}

/// One shared dependency declaration for the federation runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedDependency {
    pub singleton: bool,
    #[serde(rename = "requiredVersion")]
    pub required_version: String,
}

/// The options document handed to the module-federation bundler plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FederationOptions {
    pub filename: String,
    pub name: String,
    pub exposes: ExposureMap,
    pub shared: BTreeMap<String, SharedDependency>,
}

impl FederationOptions {
    /// Assemble the bundler options. `name` is the project identifier
    /// resolved by the caller; the UI framework is shared as a singleton so
    /// host and remote agree on one instance.
    pub fn new(name: impl Into<String>, exposes: ExposureMap) -> Self {
        let mut shared = BTreeMap::new();
        shared.insert(
            "vue".to_string(),
            SharedDependency {
                singleton: true,
                required_version: "^3".to_string(),
            },
        );

        FederationOptions {
            filename: PLUGIN_UI_FILENAME.to_string(),
            name: name.into(),
            exposes,
            shared,
        }
    }

    pub fn to_json_string(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
