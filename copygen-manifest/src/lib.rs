//! Universe manifest parsing and validation.
//!
//! A universe manifest (`universe.toml`) declares the packages, types,
//! members, methods and raw comment lines that the deep-copy generator
//! works from. Parsing validates identifiers and type expressions and
//! resolves every referenced name, so later stages can assume a
//! well-formed description.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod type_expr;

pub use error::{Error, Result, SourceContext};
pub use manifest::*;
pub use type_expr::{BUILTIN_TYPES, TypeExpr, TypeRef};
