//! uifed library - expose modules for testing
//!
//! The binary in `main.rs` is a thin dispatcher; the command handlers live
//! here so integration tests can reach them.

pub mod commands;
pub mod common;
pub mod logger;
