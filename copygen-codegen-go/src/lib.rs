//! Go deep-copy routine synthesizer.
//!
//! Turns the [`Selection`](copygen_codegen::select::Selection) produced by
//! the pipeline into one Go source file per package, holding
//! `DeepCopyInto`, `DeepCopy` and `DeepCopy<Interface>` methods for every
//! candidate type.
//!
//! ```text
//! Selection ─► Session (per package, in parallel) ─► Func ─► GoFile ─► DeepCopyGo
//! ```

mod ast;
mod generator;
mod go_file;

pub mod files;
pub mod synth;

pub use ast::Func;
pub use copygen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use generator::{Generator, Synthesis};
pub use go_file::GoFile;
pub use synth::Session;
