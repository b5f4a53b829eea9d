//! Plugin UI manifest construction
//!
//! This crate turns a plugin author's declaration of per-task UI capabilities
//! into the two artifacts the build hands downstream: the persisted
//! `manifest.json` describing which capabilities each fully-qualified task
//! exposes, and the module-federation options document whose exposure map
//! tells the bundler which module implements which capability slot.
//!
//! The transform is a single pass with no I/O of its own: a declaration is
//! normalized once at the boundary ([`normalize_declaration`]) and both
//! artifacts are derived from the same normalized structure, so they can
//! never disagree about which (task, capability) pairs exist.

pub mod errors;
pub mod federation;
pub mod manifest;
pub mod manifest_writer;
pub mod normalize;
pub mod types;

pub use errors::ManifestError;
pub use federation::{
    build_exposure_map, exposure_key, ExposureMap, FederationOptions, SharedDependency,
    PLUGIN_UI_FILENAME,
};
pub use manifest::{build_manifest, Manifest, ManifestEntry};
pub use normalize::{normalize_declaration, NormalizedCapability, NormalizedTask};
pub use types::{
    CapabilityDeclaration, PathEntry, PluginDeclaration, StaticConfig, TaskDeclaration,
    UiCapability,
};

// Re-export writer utilities for custom paths (build pipeline and testing)
pub use manifest_writer::{read_from_path, write_federation_to_path, write_to_path};
