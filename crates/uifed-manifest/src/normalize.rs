//! Declaration normalization
//!
//! Walks the plugin declaration in order, validates every capability name
//! against the closed allow-list and folds sibling blocks for the same task
//! into one ordered capability list. Both output artifacts are derived from
//! the structure produced here.

use smallvec::SmallVec;

use crate::errors::ManifestError;
use crate::types::{PluginDeclaration, StaticConfig, UiCapability};

/// A single validated capability of one task.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCapability {
    pub capability: UiCapability,
    pub module: String,
    pub static_config: Option<StaticConfig>,
}

/// One task with its validated capabilities, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTask {
    /// `<plugin identifier>.<task-local name>`, the manifest key
    pub qualified_name: String,
    /// Task-local name, used for exposure keys
    pub task: String,
    pub capabilities: SmallVec<[NormalizedCapability; 2]>,
}

/// Validate a declaration and produce the ordered structure both artifacts
/// are derived from.
///
/// Fails on the first capability name outside [`UiCapability::ALL`];
/// no partial structure is ever returned. Order is preserved for tasks and
/// capabilities alike, and duplicates are kept as declared.
pub fn normalize_declaration(
    declaration: &PluginDeclaration,
) -> Result<Vec<NormalizedTask>, ManifestError> {
    let mut tasks: Vec<NormalizedTask> = Vec::with_capacity(declaration.tasks.len());

    for block in &declaration.tasks {
        let mut capabilities: SmallVec<[NormalizedCapability; 2]> =
            SmallVec::with_capacity(block.expose.len());

        for declared in &block.expose {
            let capability = UiCapability::parse(&declared.capability).ok_or_else(|| {
                ManifestError::UnknownCapability {
                    capability: declared.capability.clone(),
                    task: block.name.clone(),
                }
            })?;

            capabilities.push(NormalizedCapability {
                capability,
                module: declared.module.clone(),
                static_config: declared.static_config.clone(),
            });
        }

        // The same task may appear in several blocks; fold them in order.
        match tasks.iter_mut().find(|t| t.task == block.name) {
            Some(existing) => existing.capabilities.extend(capabilities),
            None => tasks.push(NormalizedTask {
                qualified_name: format!("{}.{}", declaration.plugin, block.name),
                task: block.name.clone(),
                capabilities,
            }),
        }
    }

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CapabilityDeclaration, TaskDeclaration};

    fn declaration(tasks: Vec<TaskDeclaration>) -> PluginDeclaration {
        PluginDeclaration {
            plugin: "io.kestra.plugin.redis".to_string(),
            tasks,
        }
    }

    fn task(name: &str, expose: Vec<CapabilityDeclaration>) -> TaskDeclaration {
        TaskDeclaration {
            name: name.to_string(),
            expose,
        }
    }

    fn capability(name: &str, module: &str) -> CapabilityDeclaration {
        CapabilityDeclaration {
            capability: name.to_string(),
            module: module.to_string(),
            static_config: None,
        }
    }

    #[test]
    fn test_normalize_qualifies_task_names() {
        let input = declaration(vec![task(
            "list.ListPop",
            vec![capability("topology-details", "./T.vue")],
        )]);

        let normalized = normalize_declaration(&input);
        assert!(normalized.is_ok_and(|tasks| {
            tasks.len() == 1
                && tasks[0].qualified_name == "io.kestra.plugin.redis.list.ListPop"
                && tasks[0].task == "list.ListPop"
                && tasks[0].capabilities[0].capability == UiCapability::TopologyDetails
        }));
    }

    #[test]
    fn test_normalize_preserves_declaration_order() {
        let input = declaration(vec![
            task("b.Second", vec![capability("log-details", "./L.vue")]),
            task(
                "a.First",
                vec![
                    capability("log-details", "./L.vue"),
                    capability("topology-details", "./T.vue"),
                ],
            ),
        ]);

        let normalized = normalize_declaration(&input);
        assert!(normalized.is_ok_and(|tasks| {
            tasks[0].task == "b.Second"
                && tasks[1].task == "a.First"
                && tasks[1].capabilities[0].capability == UiCapability::LogDetails
                && tasks[1].capabilities[1].capability == UiCapability::TopologyDetails
        }));
    }

    #[test]
    fn test_normalize_folds_sibling_blocks_for_one_task() {
        let input = declaration(vec![
            task("list.ListPop", vec![capability("topology-details", "./T.vue")]),
            task("string.Get", vec![capability("log-details", "./G.vue")]),
            task("list.ListPop", vec![capability("log-details", "./L.vue")]),
        ]);

        let normalized = normalize_declaration(&input);
        assert!(normalized.is_ok_and(|tasks| {
            tasks.len() == 2
                && tasks[0].task == "list.ListPop"
                && tasks[0].capabilities.len() == 2
                && tasks[0].capabilities[1].module == "./L.vue"
                && tasks[1].task == "string.Get"
        }));
    }

    #[test]
    fn test_normalize_keeps_duplicate_capabilities() {
        let input = declaration(vec![task(
            "list.ListPop",
            vec![
                capability("log-details", "./First.vue"),
                capability("log-details", "./Second.vue"),
            ],
        )]);

        let normalized = normalize_declaration(&input);
        assert!(normalized.is_ok_and(|tasks| {
            tasks[0].capabilities.len() == 2
                && tasks[0].capabilities[0].module == "./First.vue"
                && tasks[0].capabilities[1].module == "./Second.vue"
        }));
    }

    #[test]
    fn test_normalize_rejects_unknown_capability_in_any_position() {
        let positions = [
            vec![
                capability("bad-key", "./B.vue"),
                capability("log-details", "./L.vue"),
            ],
            vec![
                capability("topology-details", "./T.vue"),
                capability("bad-key", "./B.vue"),
                capability("log-details", "./L.vue"),
            ],
            vec![
                capability("topology-details", "./T.vue"),
                capability("bad-key", "./B.vue"),
            ],
        ];

        for expose in positions {
            let input = declaration(vec![task("list.ListPop", expose)]);
            let result = normalize_declaration(&input);
            assert!(matches!(
                result,
                Err(ManifestError::UnknownCapability { capability, task })
                    if capability == "bad-key" && task == "list.ListPop"
            ));
        }
    }

    #[test]
    fn test_unknown_capability_error_names_allowed_set() {
        let input = declaration(vec![task(
            "list.ListPop",
            vec![capability("bad-key", "./B.vue")],
        )]);

        let message = match normalize_declaration(&input) {
            Err(err) => err.to_string(),
            Ok(_) => String::new(),
        };
        assert!(message.contains("bad-key"));
        assert!(message.contains("topology-details, log-details"));
    }

    #[test]
    fn test_normalize_empty_declaration() {
        let normalized = normalize_declaration(&declaration(Vec::new()));
        assert!(normalized.is_ok_and(|tasks| tasks.is_empty()));
    }
}
