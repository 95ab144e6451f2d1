//! Language-independent half of the copygen deep-copy generator.
//!
//! This crate decides *what* to generate; `copygen-codegen-go` decides how
//! it looks.
//!
//! # Module Organization
//!
//! - [`directive`] - `+tag=value` comment directives
//! - [`select`] - Eligibility rules and candidate selection
//! - [`pipeline`] - Validate → lower → select orchestration with plugins
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`generation`] - Per-file import tracking
//! - [`language`] - The trait target languages implement
//! - [`testing`] - Test utilities (feature-gated)

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
pub mod directive;
mod error;
pub mod generation;
pub mod language;
pub mod pipeline;
pub mod select;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::ConfigError;
