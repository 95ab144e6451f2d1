//! Select phase - resolves directives into package plans.

use eyre::{Result, eyre};

use crate::{
    pipeline::{CompilationContext, Diagnostic, Phase},
    select::select,
};

/// Phase that resolves directives and selects the candidates to generate.
///
/// Every configuration error is fatal and aborts the pipeline.
pub struct SelectPhase;

impl Phase for SelectPhase {
    fn name(&self) -> &'static str {
        "select"
    }

    fn description(&self) -> &'static str {
        "Resolve directives and select candidate types"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let universe = ctx
            .universe
            .as_ref()
            .ok_or_else(|| eyre!("select phase needs a universe - did the lower phase run?"))?;
        let generator = &ctx.manifest.generator;

        let selection = select(universe, &generator.tag, &generator.bounding_dirs)?;

        for plan in &selection.plans {
            if plan.candidates.is_empty() {
                ctx.diagnostics.push(
                    Diagnostic::info(
                        "select",
                        "package requests generation but has no copyable types",
                    )
                    .at(plan.path.clone()),
                );
            }
        }
        tracing::info!(
            packages = selection.plans.len(),
            candidates = selection.candidate_count(),
            "selected"
        );

        ctx.selection = Some(selection);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use copygen_manifest::Manifest;

    use super::*;
    use crate::pipeline::phases::LowerPhase;

    fn context(manifest: &str) -> CompilationContext {
        let manifest: Manifest = manifest.parse().expect("valid manifest");
        let mut ctx = CompilationContext::new(manifest);
        LowerPhase.run(&mut ctx).expect("lower should succeed");
        ctx
    }

    #[test]
    fn test_select_phase() {
        let mut ctx = context(
            r#"
            [[packages]]
            path = "p/api"

            [[packages.types]]
            name = "Node"
            kind = "struct"
            comments = ["+k8s:deepcopy-gen=true"]
            members = [{ name = "Next", type = "*Node" }]
            "#,
        );

        SelectPhase.run(&mut ctx).expect("select should succeed");

        let selection = ctx.selection.expect("selection set");
        assert_eq!(selection.plans.len(), 1);
        assert_eq!(selection.plans[0].candidates[0].name.name, "Node");
    }

    #[test]
    fn test_empty_plan_is_reported() {
        let mut ctx = context(
            r#"
            [[packages]]
            path = "p/api"
            comments = ["+k8s:deepcopy-gen=package"]

            [[packages.types]]
            name = "Phase"
            kind = "alias"
            underlying = "string"
            "#,
        );

        SelectPhase.run(&mut ctx).expect("select should succeed");
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].location.as_deref(), Some("p/api"));
    }

    #[test]
    fn test_custom_tag() {
        let mut ctx = context(
            r#"
            [generator]
            tag = "copy"

            [[packages]]
            path = "p/api"
            comments = ["+copy=package"]

            [[packages.types]]
            name = "A"
            kind = "struct"
            "#,
        );

        SelectPhase.run(&mut ctx).expect("select should succeed");
        assert_eq!(ctx.selection.unwrap().candidate_count(), 1);
    }

    #[test]
    fn test_requires_universe() {
        let manifest: Manifest = "".parse().unwrap();
        let mut ctx = CompilationContext::new(manifest);
        assert!(SelectPhase.run(&mut ctx).is_err());
    }
}
