//! Language-agnostic code generation traits.

use std::path::{Path, PathBuf};

use eyre::Result;
use serde::Serialize;

use crate::pipeline::Diagnostic;

/// Trait for language-specific code generators.
pub trait LanguageCodegen {
    /// Language identifier (e.g. "go").
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g. "go").
    fn file_extension(&self) -> &'static str;

    /// Render every output file without touching the disk.
    ///
    /// # Errors
    ///
    /// Fails if a header file cannot be read.
    fn preview(&self) -> Result<Vec<PreviewFile>>;

    /// Generate all files into the specified output directory.
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation.
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files written (created or changed).
    pub written: Vec<PathBuf>,
    /// Files whose content was already up to date.
    pub unchanged: Vec<PathBuf>,
    /// Warnings raised while rendering, one per `FIXME` marker.
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerateResult {
    /// Number of files produced, changed or not.
    pub fn file_count(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }
}

/// A generated file for preview.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewFile {
    /// Path relative to the output directory.
    pub path: String,
    pub content: String,
}
