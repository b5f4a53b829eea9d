//! Manifest emission
//!
//! The manifest is the persisted description of which capabilities, with what
//! static parameters, each fully-qualified task exposes. It is what a host
//! application reads to know what to offer without loading component code.
//! Module paths are a build-time concern and are deliberately absent here.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ManifestError;
use crate::normalize::NormalizedTask;
use crate::types::{StaticConfig, UiCapability};

/// One persisted capability entry of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(rename = "uiModule")]
    pub ui_module: UiCapability,
    #[serde(rename = "staticInfo", default, skip_serializing_if = "Option::is_none")]
    pub static_info: Option<StaticConfig>,
}

/// The manifest: fully-qualified task name to capability entries.
///
/// Serializes as a JSON map whose key order is the declaration order, so the
/// persisted document is reproducible field for field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    tasks: Vec<(String, Vec<ManifestEntry>)>,
}

/// Derive the manifest from the normalized declaration: one entry per task,
/// capability order preserved, module paths stripped.
pub fn build_manifest(normalized: &[NormalizedTask]) -> Manifest {
    let tasks = normalized
        .iter()
        .map(|task| {
            let entries = task
                .capabilities
                .iter()
                .map(|cap| ManifestEntry {
                    ui_module: cap.capability,
                    static_info: cap.static_config.clone(),
                })
                .collect();
            (task.qualified_name.clone(), entries)
        })
        .collect();

    Manifest { tasks }
}

impl Manifest {
    /// Entries for one fully-qualified task name.
    pub fn get(&self, qualified_name: &str) -> Option<&[ManifestEntry]> {
        self.tasks
            .iter()
            .find(|(name, _)| name == qualified_name)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Tasks in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ManifestEntry])> {
        self.tasks
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Serialize this manifest to its persisted JSON form.
    pub fn to_json_string(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a manifest back from its persisted JSON form.
    pub fn from_json_str(input: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(input)?)
    }
}

impl Serialize for Manifest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.tasks.len()))?;
        for (name, entries) in &self.tasks {
            map.serialize_entry(name, entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ManifestVisitor;

        impl<'de> Visitor<'de> for ManifestVisitor {
            type Value = Manifest;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of fully-qualified task names to capability entries")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Manifest, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut tasks = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, Vec<ManifestEntry>>()? {
                    tasks.push(entry);
                }
                Ok(Manifest { tasks })
            }
        }

        deserializer.deserialize_map(ManifestVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_declaration;
    use crate::types::{CapabilityDeclaration, PluginDeclaration, TaskDeclaration, UiCapability};

    fn redis_declaration() -> PluginDeclaration {
        let mut static_config = StaticConfig::new();
        static_config.insert("height".to_string(), serde_json::json!(80));

        PluginDeclaration {
            plugin: "io.kestra.plugin.redis".to_string(),
            tasks: vec![TaskDeclaration {
                name: "list.ListPop".to_string(),
                expose: vec![
                    CapabilityDeclaration::new(UiCapability::TopologyDetails, "./T.vue")
                        .with_static_config(static_config),
                    CapabilityDeclaration::new(UiCapability::LogDetails, "./L.vue"),
                ],
            }],
        }
    }

    fn build(declaration: &PluginDeclaration) -> Manifest {
        normalize_declaration(declaration).map_or_else(|_| Manifest::default(), |n| build_manifest(&n))
    }

    #[test]
    fn test_manifest_document_shape() {
        let manifest = build(&redis_declaration());

        let expected = r#"{
  "io.kestra.plugin.redis.list.ListPop": [
    {
      "uiModule": "topology-details",
      "staticInfo": {
        "height": 80
      }
    },
    {
      "uiModule": "log-details"
    }
  ]
}"#;
        assert!(manifest.to_json_string().is_ok_and(|json| json == expected));
    }

    #[test]
    fn test_manifest_one_entry_per_task_in_order() {
        let declaration = PluginDeclaration {
            plugin: "io.kestra.plugin.redis".to_string(),
            tasks: vec![
                TaskDeclaration {
                    name: "list.ListPop".to_string(),
                    expose: vec![CapabilityDeclaration::new(
                        UiCapability::LogDetails,
                        "./L.vue",
                    )],
                },
                TaskDeclaration {
                    name: "string.Get".to_string(),
                    expose: vec![
                        CapabilityDeclaration::new(UiCapability::TopologyDetails, "./T.vue"),
                        CapabilityDeclaration::new(UiCapability::LogDetails, "./G.vue"),
                    ],
                },
            ],
        };

        let manifest = build(&declaration);
        assert_eq!(manifest.len(), 2);

        let names: Vec<&str> = manifest.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "io.kestra.plugin.redis.list.ListPop",
                "io.kestra.plugin.redis.string.Get"
            ]
        );

        let entries = manifest.get("io.kestra.plugin.redis.string.Get");
        assert!(entries.is_some_and(|entries| {
            entries.len() == 2
                && entries[0].ui_module == UiCapability::TopologyDetails
                && entries[1].ui_module == UiCapability::LogDetails
        }));
    }

    #[test]
    fn test_static_info_omitted_when_absent() {
        let manifest = build(&redis_declaration());
        let json = manifest.to_json_string().unwrap_or_default();
        assert_eq!(json.matches("staticInfo").count(), 1);
    }

    #[test]
    fn test_manifest_keeps_duplicate_capabilities_in_emission_order() {
        let declaration = PluginDeclaration {
            plugin: "io.kestra.plugin.redis".to_string(),
            tasks: vec![TaskDeclaration {
                name: "list.ListPop".to_string(),
                expose: vec![
                    CapabilityDeclaration::new(UiCapability::LogDetails, "./First.vue"),
                    CapabilityDeclaration::new(UiCapability::LogDetails, "./Second.vue"),
                ],
            }],
        };

        let manifest = build(&declaration);
        let entries = manifest.get("io.kestra.plugin.redis.list.ListPop");
        assert!(entries.is_some_and(|entries| entries.len() == 2));
    }

    #[test]
    fn test_round_trip_preserves_structure_and_order() {
        let declaration = PluginDeclaration {
            plugin: "io.kestra.plugin.redis".to_string(),
            tasks: vec![
                TaskDeclaration {
                    name: "z.Last".to_string(),
                    expose: vec![CapabilityDeclaration::new(
                        UiCapability::LogDetails,
                        "./Z.vue",
                    )],
                },
                TaskDeclaration {
                    name: "a.First".to_string(),
                    expose: vec![CapabilityDeclaration::new(
                        UiCapability::TopologyDetails,
                        "./A.vue",
                    )],
                },
            ],
        };

        let manifest = build(&declaration);
        let json = manifest.to_json_string().unwrap_or_default();
        let parsed = Manifest::from_json_str(&json);
        assert!(parsed.is_ok_and(|parsed| parsed == manifest));

        // Key order survives the round trip, not just the contents.
        let reparsed_json = Manifest::from_json_str(&json)
            .and_then(|m| m.to_json_string())
            .unwrap_or_default();
        assert_eq!(reparsed_json, json);
    }

    #[test]
    fn test_empty_manifest_serializes_to_empty_object() {
        let manifest = build_manifest(&[]);
        assert!(manifest.is_empty());
        assert!(manifest.to_json_string().is_ok_and(|json| json == "{}"));
    }
}
