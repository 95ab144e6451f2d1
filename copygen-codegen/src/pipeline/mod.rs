//! Compilation pipeline for deep-copy generation.
//!
//! This module provides a [`Pipeline`] orchestrator that takes a parsed
//! universe manifest to the point where code can be emitted:
//!
//! - Explicit phase boundaries (validate → lower → select)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//! - Shared results via [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use copygen_codegen::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(manifest)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("warning: {}", diag.message);
//! }
//!
//! let generator = GoGenerator::from_context(ctx)?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
