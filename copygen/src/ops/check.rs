//! Check operation - manifest validation and directive resolution.

use std::path::Path;

use copygen_codegen::pipeline::{Pipeline, Severity};
use copygen_manifest::Manifest;
use eyre::{Context, Result};

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline up to candidate selection and returns its diagnostics.
/// Configuration errors in directives fail the whole operation.
pub fn check(manifest: &Manifest, manifest_path: &Path) -> Result<CheckReport> {
    let ctx = Pipeline::new()
        .run(manifest.clone())
        .wrap_err("Validation failed")?;

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = if let Some(loc) = &diag.location {
            format!("{}\n  --> {}", diag.message, loc)
        } else {
            diag.message.clone()
        };

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    let (package_count, type_count) = ctx
        .selection
        .as_ref()
        .map(|s| {
            let packages = s.plans.iter().filter(|p| !p.candidates.is_empty()).count();
            (packages, s.candidate_count())
        })
        .unwrap_or_default();

    Ok(CheckReport {
        manifest_path: manifest_path.to_path_buf(),
        errors,
        warnings,
        infos,
        package_count,
        type_count,
    })
}
