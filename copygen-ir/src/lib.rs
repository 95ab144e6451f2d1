//! Type descriptor model for the copygen deep-copy generator.
//!
//! This crate holds the read-only type graph that every later stage consumes.
//! Types live in a [`Universe`] arena and refer to each other by [`TypeId`],
//! which lets self-referential shapes (a struct holding a pointer to itself)
//! be represented without reference cycles.
//!
//! # Architecture
//!
//! ```text
//! universe.toml → copygen-manifest (parsing) → copygen-ir (type graph) → codegen
//! ```
//!
//! The IR types are designed to be:
//! - Immutable once built (the lowering step is the only writer)
//! - Closed over a fixed set of shapes (see [`Shape`])
//! - Free of any target-language rendering concerns

mod node;
mod types;
mod universe;

pub use node::{Member, Receiver, Signature, TypeNode};
pub use types::{Kind, Shape, TypeName};
pub use universe::{Package, TypeId, Universe, UniverseBuilder, default_package_name};
