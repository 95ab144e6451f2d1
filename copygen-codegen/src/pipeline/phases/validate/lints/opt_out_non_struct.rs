//! Lint for opt-out directives that cannot have an effect.

use copygen_manifest::{Manifest, TypeKind};

use super::super::Lint;
use crate::{directive, pipeline::Diagnostic};

/// Lint that warns about `+<tag>=false` on types that are never generated
/// anyway (everything except structs).
pub struct OptOutNonStructLint;

impl Lint for OptOutNonStructLint {
    fn name(&self) -> &'static str {
        "opt-out-non-struct"
    }

    fn description(&self) -> &'static str {
        "Detect opt-out directives on types that are never copied"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let tag = manifest.generator.tag.as_str();
        for package in &manifest.packages {
            for ty in &package.types {
                if ty.kind == TypeKind::Struct {
                    continue;
                }
                let opted_out = directive::comment_tags(directive::MARKER, &ty.comments)
                    .get(tag)
                    .is_some_and(|values| values.iter().any(|v| v == directive::DISABLED_VALUE));
                if opted_out {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!(
                                "'+{}={}' has no effect on {} '{}'",
                                tag,
                                directive::DISABLED_VALUE,
                                ty.kind.as_str(),
                                ty.name
                            ),
                        )
                        .at(format!("{}.{}", package.path, ty.name)),
                    );
                }
            }
        }
    }
}
