//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs lints over the manifest
//! - [`LowerPhase`] - builds the type universe from the manifest
//! - [`SelectPhase`] - resolves directives and picks candidates

mod lower;
mod select;
mod validate;

pub use lower::{LowerPhase, lower_manifest};
pub use select::SelectPhase;
pub use validate::{
    DuplicateInterfaceLint, EmptyPackageLint, Lint, LintInfo, OptOutNonStructLint, ValidatePhase,
};
