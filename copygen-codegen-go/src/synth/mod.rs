//! Per-package routine synthesis.
//!
//! A [`Session`] owns everything that changes while one package's output is
//! built: the import tracker, the warnings raised for unsupported shapes and
//! the location those warnings point at. The universe and selection are
//! shared read-only between sessions, so packages synthesize in parallel.
//!
//! - [`predicates`] - assignability, aliases and copy overrides
//! - `namer` - Go spelling of type references
//! - `kinds` - per-kind copy emitters
//! - `routines` - `DeepCopyInto`, `DeepCopy`, adapters and registration

mod kinds;
mod namer;
pub mod predicates;
mod routines;

use copygen_codegen::{
    builder::CodeFragment,
    generation::ImportTracker,
    pipeline::Diagnostic,
    select::{PackagePlan, Selection},
};
use copygen_ir::Universe;

/// Phase name attached to synthesis diagnostics.
pub const PHASE: &str = "generate";

/// State for synthesizing one package.
pub struct Session<'a> {
    universe: &'a Universe,
    selection: &'a Selection,
    imports: ImportTracker,
    diagnostics: Vec<Diagnostic>,
    /// Where markers are reported (`pkg.Type` or `pkg.Type.Member`).
    location: String,
}

impl<'a> Session<'a> {
    /// Start a session for `plan`.
    pub fn new(universe: &'a Universe, selection: &'a Selection, plan: &PackagePlan) -> Self {
        Self {
            universe,
            selection,
            imports: ImportTracker::new(plan.path.clone()),
            diagnostics: Vec::new(),
            location: plan.path.clone(),
        }
    }

    /// Imports recorded so far.
    pub fn imports(&self) -> &ImportTracker {
        &self.imports
    }

    /// Warnings recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Finish the session.
    pub fn finish(self) -> (ImportTracker, Vec<Diagnostic>) {
        (self.imports, self.diagnostics)
    }

    /// A `// FIXME:` line, also reported as a warning.
    fn marker(&mut self, message: String) -> CodeFragment {
        tracing::warn!(location = %self.location, "{}", message);
        self.diagnostics
            .push(Diagnostic::warning(PHASE, message.clone()).at(self.location.clone()));
        CodeFragment::comment(format!("FIXME: {}", message))
    }
}
