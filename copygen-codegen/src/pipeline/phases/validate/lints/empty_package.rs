//! Lint for input packages without types.

use copygen_manifest::Manifest;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that notes input packages declaring no types.
pub struct EmptyPackageLint;

impl Lint for EmptyPackageLint {
    fn name(&self) -> &'static str {
        "empty-package"
    }

    fn description(&self) -> &'static str {
        "Report input packages that declare no types"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        for package in manifest.input_packages() {
            if package.types.is_empty() {
                diagnostics.push(
                    Diagnostic::info("validate", "input package declares no types")
                        .at(package.path.clone()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_input_packages_reported() {
        let manifest: Manifest = r#"
            [[packages]]
            path = "p/empty"

            [[packages]]
            path = "p/referenced"
            input = false
        "#
        .parse()
        .unwrap();

        let mut diagnostics = Vec::new();
        EmptyPackageLint.check(&manifest, &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("p/empty"));
        assert!(!diagnostics[0].severity.is_warning());
    }
}
