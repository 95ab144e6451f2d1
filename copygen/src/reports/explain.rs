//! Explain command report data structures.

use std::path::PathBuf;

use copygen_codegen::{
    pipeline::{Diagnostic, PhaseInfo, phases::LintInfo},
    select::SelectionSummary,
};
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from pipeline explanation.
#[derive(Debug, Serialize)]
pub struct ExplainReport {
    /// Path to the manifest file.
    pub manifest_path: PathBuf,
    pub generator: GeneratorInfo,
    /// Pipeline phases, in execution order.
    pub phases: Vec<PhaseInfo>,
    /// Validation lints.
    pub lints: Vec<LintInfo>,
    /// Types in the universe, builtins included.
    pub type_count: usize,
    /// Packages and types chosen for generation.
    pub selection: SelectionSummary,
    pub diagnostics: Vec<Diagnostic>,
}

/// Generator settings taken from the manifest.
#[derive(Debug, Serialize)]
pub struct GeneratorInfo {
    pub tag: String,
    pub output_file_base: String,
    pub build_tag: String,
    pub boilerplate: Option<String>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("copygen Pipeline Explanation");
        out.newline();

        out.key_value("Input", &self.manifest_path.display().to_string());
        out.key_value_indented("Tag", &format!("+{}", self.generator.tag));
        out.key_value_indented("File", &format!("{}.go", self.generator.output_file_base));
        if !self.generator.build_tag.is_empty() {
            out.key_value_indented("Build tag", &format!("!{}", self.generator.build_tag));
        }
        if let Some(boilerplate) = &self.generator.boilerplate {
            out.key_value_indented("Boilerplate", boilerplate);
        }
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Validation Lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
        out.newline();

        out.section("Selection");
        out.key_value_indented("Universe", &format!("{} types", self.type_count));
        out.key_value_indented("Bounding dirs", &self.selection.bounding_dirs.join(", "));
        out.newline();

        for package in &self.selection.packages {
            let mut flags = Vec::new();
            if package.generate_all {
                flags.push("package");
            }
            if package.register {
                flags.push("register");
            }
            let heading = if flags.is_empty() {
                package.path.clone()
            } else {
                format!("{} [{}]", package.path, flags.join(","))
            };
            out.section(&heading);
            for ty in &package.types {
                if ty.interfaces.is_empty() {
                    out.list_item(&ty.name);
                } else {
                    let receiver = if ty.non_pointer_interfaces { "value" } else { "pointer" };
                    out.list_item(&format!(
                        "{} -> {} ({} receiver)",
                        ty.name,
                        ty.interfaces.join(", "),
                        receiver
                    ));
                }
            }
            out.newline();
        }

        if !self.diagnostics.is_empty() {
            out.section("Diagnostics");
            for diag in &self.diagnostics {
                out.list_item(&diag.to_string());
            }
        }
    }
}
