//! Lint for interfaces listed more than once on a type.

use std::collections::HashSet;

use copygen_manifest::Manifest;

use super::super::Lint;
use crate::{directive, pipeline::Diagnostic};

/// Lint that warns when a type lists the same interface twice.
///
/// Duplicates are harmless (one adapter is emitted per interface) but
/// usually point at a copy-paste slip.
pub struct DuplicateInterfaceLint;

impl Lint for DuplicateInterfaceLint {
    fn name(&self) -> &'static str {
        "duplicate-interface"
    }

    fn description(&self) -> &'static str {
        "Detect interfaces listed more than once in an interfaces directive"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let tag = manifest.generator.tag.as_str();
        for package in &manifest.packages {
            for ty in &package.types {
                let lines = ty.second_closest_comments.iter().chain(&ty.comments);
                let mut seen = HashSet::new();
                let mut reported = HashSet::new();
                for name in directive::extract_interfaces(tag, lines) {
                    if !seen.insert(name.clone()) && reported.insert(name.clone()) {
                        diagnostics.push(
                            Diagnostic::warning(
                                "validate",
                                format!("interface '{}' is listed more than once", name),
                            )
                            .at(format!("{}.{}", package.path, ty.name)),
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_across_blocks() {
        let manifest: Manifest = r#"
            [[packages]]
            path = "p/api"

            [[packages.types]]
            name = "Object"
            kind = "interface"

            [[packages.types]]
            name = "Pod"
            kind = "struct"
            second_closest_comments = ["+k8s:deepcopy-gen:interfaces=p/api.Object"]
            comments = [
                "+k8s:deepcopy-gen:interfaces=p/api.Object,p/api.Object",
            ]
        "#
        .parse()
        .unwrap();

        let mut diagnostics = Vec::new();
        DuplicateInterfaceLint.check(&manifest, &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("p/api.Object"));
    }

    #[test]
    fn test_distinct_interfaces() {
        let manifest: Manifest = r#"
            [[packages]]
            path = "p/api"

            [[packages.types]]
            name = "Pod"
            kind = "struct"
            comments = ["+k8s:deepcopy-gen:interfaces=a/b.I,c/d.J"]
        "#
        .parse()
        .unwrap();

        let mut diagnostics = Vec::new();
        DuplicateInterfaceLint.check(&manifest, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }
}
