//! Pipeline plugin trait.

use eyre::Result;

use super::CompilationContext;

/// A plugin that can hook into the compilation pipeline.
///
/// Plugins receive callbacks before and after each phase runs and may
/// inspect or modify the context. Returning an error from a hook aborts
/// the pipeline.
///
/// # Example
///
/// ```ignore
/// struct StatsPlugin;
///
/// impl Plugin for StatsPlugin {
///     fn name(&self) -> &'static str { "stats" }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
///         if let Some(selection) = &ctx.selection {
///             println!("{}: {} candidates", phase, selection.candidate_count());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}
