//! Explain operation - pipeline explanation.

use std::path::Path;

use copygen_codegen::pipeline::{Pipeline, phases::ValidatePhase};
use copygen_manifest::Manifest;
use eyre::{Context, Result};

use crate::reports::{ExplainReport, GeneratorInfo};

/// Execute the explain operation.
///
/// Runs the pipeline and returns information about what it does and what
/// it selected.
pub fn explain(manifest: &Manifest, manifest_path: &Path) -> Result<ExplainReport> {
    let pipeline = Pipeline::new();
    let phases = pipeline.phase_info();
    let lints = ValidatePhase::new().lint_info();

    let mut ctx = pipeline.run(manifest.clone()).wrap_err("Pipeline failed")?;
    let universe = ctx.take_universe()?;
    let selection = ctx.take_selection()?;

    let config = &manifest.generator;
    Ok(ExplainReport {
        manifest_path: manifest_path.to_path_buf(),
        generator: GeneratorInfo {
            tag: config.tag.clone(),
            output_file_base: config.output_file_base.clone(),
            build_tag: config.build_tag.clone(),
            boilerplate: config
                .boilerplate
                .as_ref()
                .map(|p| p.display().to_string()),
        },
        phases,
        lints,
        type_count: universe.len(),
        selection: selection.summary(&universe),
        diagnostics: ctx.diagnostics,
    })
}
