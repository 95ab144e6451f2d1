//! Generate operation - deep-copy files from a manifest.

use std::path::Path;

use copygen_codegen::{language::LanguageCodegen, pipeline::Pipeline};
use copygen_codegen_go::Generator;
use copygen_manifest::Manifest;
use eyre::{Context, Result};

use crate::reports::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Root that package directories are created under.
    pub output_dir: &'a Path,
    /// Directory a relative boilerplate path is resolved against.
    pub base_dir: &'a Path,
    /// Replaces `output_file_base` from the manifest.
    pub file_base: Option<&'a str>,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Runs the pipeline on the manifest and writes one Go file per package
/// that has something to copy.
pub fn generate(manifest: Manifest, opts: GenerateOptions) -> Result<GenerateReport> {
    let mut ctx = Pipeline::new().run(manifest).wrap_err("Pipeline failed")?;

    let mut warnings: Vec<String> = ctx.warnings().map(ToString::to_string).collect();

    let mut generator = Generator::from_context(&mut ctx)?.with_base_dir(opts.base_dir);
    if let Some(file_base) = opts.file_base {
        generator = generator.with_file_base(file_base);
    }
    let type_count = generator.selection().candidate_count();

    let result = if opts.dry_run {
        let synthesis = generator.synthesize()?;
        warnings.extend(synthesis.diagnostics.iter().map(ToString::to_string));
        let files = synthesis
            .files
            .into_iter()
            .map(|f| PreviewFile {
                path: f.relative_path(),
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let gen_result = generator
            .generate(opts.output_dir)
            .wrap_err("Failed to generate code")?;
        warnings.extend(gen_result.diagnostics.iter().map(ToString::to_string));

        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            written: gen_result.written,
            unchanged: gen_result.unchanged,
        })
    };

    Ok(GenerateReport {
        type_count,
        warnings,
        result,
    })
}
