use std::path::{Path, PathBuf};

use copygen_codegen::{
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    pipeline::{CompilationContext, Diagnostic},
    select::{PackagePlan, Selection},
};
use copygen_core::{GeneratedFile, WriteResult};
use copygen_ir::Universe;
use copygen_manifest::GeneratorConfig;
use eyre::{Result, WrapErr};
use rayon::prelude::*;

use crate::{GoFile, Session, files::DeepCopyGo};

/// Go code generator producing one deep-copy file per selected package.
///
/// Packages are synthesized in parallel. Each gets its own [`Session`], so
/// imports and warnings never leak between files, and results are kept in
/// package path order.
#[derive(Debug)]
pub struct Generator {
    universe: Universe,
    selection: Selection,
    config: GeneratorConfig,
    /// Directory a relative boilerplate path is resolved against.
    base_dir: PathBuf,
}

/// Output of [`Generator::synthesize`].
#[derive(Debug, Default)]
pub struct Synthesis {
    /// One file per package with at least one candidate, by package path.
    pub files: Vec<DeepCopyGo>,
    /// Warnings for every `FIXME` marker, in file order.
    pub diagnostics: Vec<Diagnostic>,
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "go"
    }

    fn file_extension(&self) -> &'static str {
        "go"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        let synthesis = self.synthesize()?;
        Ok(synthesis
            .files
            .into_iter()
            .map(|file| PreviewFile {
                path: file.relative_path(),
                content: file.content,
            })
            .collect())
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let synthesis = self.synthesize()?;
        let mut result = GenerateResult {
            diagnostics: synthesis.diagnostics,
            ..GenerateResult::default()
        };

        for file in &synthesis.files {
            let path = file.path(output_dir);
            match file.write(output_dir)? {
                WriteResult::Unchanged => result.unchanged.push(path),
                WriteResult::Written => result.written.push(path),
            }
        }

        tracing::info!(
            written = result.written.len(),
            unchanged = result.unchanged.len(),
            warnings = result.diagnostics.len(),
            "generation finished"
        );
        Ok(result)
    }
}

impl Generator {
    pub fn new(universe: Universe, selection: Selection, config: GeneratorConfig) -> Self {
        Self {
            universe,
            selection,
            config,
            base_dir: PathBuf::new(),
        }
    }

    /// Take the universe and selection out of a finished pipeline run.
    ///
    /// # Errors
    ///
    /// Fails if the pipeline stopped before the select phase.
    pub fn from_context(ctx: &mut CompilationContext) -> Result<Self> {
        let universe = ctx.take_universe()?;
        let selection = ctx.take_selection()?;
        Ok(Self::new(universe, selection, ctx.manifest.generator.clone()))
    }

    /// Override the generated file name (without `.go`).
    pub fn with_file_base(mut self, file_base: impl Into<String>) -> Self {
        self.config.output_file_base = file_base.into();
        self
    }

    /// Resolve a relative boilerplate path against `dir`, usually the
    /// directory of the manifest.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Render every package file in memory.
    ///
    /// Plans without candidates produce no file.
    ///
    /// # Errors
    ///
    /// Fails if the boilerplate file cannot be read.
    pub fn synthesize(&self) -> Result<Synthesis> {
        let boilerplate = self.boilerplate()?;

        let units: Vec<(DeepCopyGo, Vec<Diagnostic>)> = self
            .selection
            .plans
            .par_iter()
            .filter(|plan| !plan.candidates.is_empty())
            .map(|plan| self.package_file(plan, boilerplate.as_deref()))
            .collect();

        let mut synthesis = Synthesis::default();
        for (file, diagnostics) in units {
            synthesis.files.push(file);
            synthesis.diagnostics.extend(diagnostics);
        }
        Ok(synthesis)
    }

    fn package_file(
        &self,
        plan: &PackagePlan,
        boilerplate: Option<&str>,
    ) -> (DeepCopyGo, Vec<Diagnostic>) {
        let _span = tracing::debug_span!("package", path = %plan.path).entered();

        let mut session = Session::new(&self.universe, &self.selection, plan);
        let mut funcs = Vec::new();
        for candidate in &plan.candidates {
            funcs.extend(session.routines(candidate));
        }
        if plan.register {
            funcs.push(session.registration(&plan.candidates));
        }
        let (imports, diagnostics) = session.finish();

        let mut file = GoFile::new(&plan.name)
            .imports(imports.import_lines())
            .add_all(funcs);
        if !self.config.build_tag.is_empty() {
            file = file.build_tag(&self.config.build_tag);
        }
        if let Some(text) = boilerplate {
            file = file.boilerplate(text);
        }

        tracing::debug!(
            types = plan.candidates.len(),
            imports = imports.len(),
            "package rendered"
        );
        (
            DeepCopyGo::new(&plan.path, &self.config.output_file_base, file.render()),
            diagnostics,
        )
    }

    fn boilerplate(&self) -> Result<Option<String>> {
        let Some(path) = &self.config.boilerplate else {
            return Ok(None);
        };
        let path = self.base_dir.join(path);
        let text = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read boilerplate '{}'", path.display()))?;
        Ok(Some(text))
    }
}
