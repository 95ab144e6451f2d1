//! Code generation outputs.
//!
//! - [`ImportTracker`] - Per-file package references and their local names

mod imports;

pub use imports::ImportTracker;
