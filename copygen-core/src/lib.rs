//! Core utilities and types for the copygen deep-copy generator.
//!
//! This crate provides fundamental types and utilities used across
//! the copygen workspace.

mod file;
mod utils;

// File operations
pub use file::{GeneratedFile, WriteResult, write_if_changed};
// String utilities
pub use utils::{is_go_identifier, is_go_keyword, to_go_identifier};

/// Marker line placed at the top of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by copygen. DO NOT EDIT.";
