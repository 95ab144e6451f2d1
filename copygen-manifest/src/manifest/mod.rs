mod generator;
mod package;
mod validate;

use std::{
    collections::{HashMap, HashSet},
    path::Path,
    str::FromStr,
};

pub use generator::{DEFAULT_BUILD_TAG, DEFAULT_OUTPUT_FILE_BASE, DEFAULT_TAG, GeneratorConfig};
pub use package::{MemberDecl, MethodDecl, PackageDecl, ReceiverKind, TypeDecl, TypeKind};
use serde::Deserialize;
pub use validate::ParseContext;

use crate::{Error, Result, TypeRef};

/// Default manifest filename.
pub const MANIFEST_FILENAME: &str = "universe.toml";

/// Root manifest describing the type universe
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Declared packages
    #[serde(default)]
    pub packages: Vec<PackageDecl>,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, MANIFEST_FILENAME)
    }
}

impl Manifest {
    /// Parse a manifest file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a manifest from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = ParseContext::new(content, filename);
        let manifest: Self = toml::from_str(content)
            .map_err(|e| ctx.source_context().parse_error(e))?;
        manifest.validate(&ctx)?;
        tracing::debug!(
            filename,
            packages = manifest.packages.len(),
            "parsed universe manifest"
        );
        Ok(manifest)
    }

    /// Get a package by import path
    pub fn package(&self, path: &str) -> Option<&PackageDecl> {
        self.packages.iter().find(|p| p.path == path)
    }

    /// Packages code is generated for
    pub fn input_packages(&self) -> impl Iterator<Item = &PackageDecl> {
        self.packages.iter().filter(|p| p.input)
    }

    /// Validate the manifest after parsing
    fn validate<'a>(&'a self, ctx: &ParseContext<'a>) -> Result<()> {
        let mut declared: HashMap<&str, HashSet<&str>> = HashMap::new();

        for package in &self.packages {
            if declared.contains_key(package.path.as_str()) {
                return Err(ctx.source_context().duplicate_error(
                    "package",
                    &package.path,
                    ctx.find_nth_span(&package.path, 0),
                    ctx.find_nth_span(&package.path, 1),
                ));
            }
            validate_package_path(ctx, &package.path)?;
            if let Some(name) = &package.name {
                ctx.validate_name(name, "package")?;
            }

            let names = declared.entry(package.path.as_str()).or_default();
            let pkg_ctx = ctx.push(&package.path);
            for ty in &package.types {
                pkg_ctx.validate_name(&ty.name, "type")?;
                if !names.insert(ty.name.as_str()) {
                    return Err(ctx.source_context().duplicate_error(
                        "type",
                        format!("{}.{}", package.path, ty.name),
                        ctx.find_nth_span(&ty.name, 0),
                        ctx.find_nth_span(&ty.name, 1),
                    ));
                }
            }
        }

        let resolver = Resolver { declared };
        for package in &self.packages {
            let pkg_ctx = ctx.push(&package.path);
            for ty in &package.types {
                let ty_ctx = pkg_ctx.push(&ty.name);
                validate_type(&ty_ctx, &resolver, &package.path, ty)?;
            }
        }

        Ok(())
    }
}

fn validate_package_path(ctx: &ParseContext<'_>, path: &str) -> Result<()> {
    let valid = !path.is_empty()
        && !path.starts_with('/')
        && !path.ends_with('/')
        && path
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '~'));
    if valid {
        Ok(())
    } else {
        Err(ctx
            .source_context()
            .validation_error_at(format!("invalid package path '{}'", path), ctx.find_span(path)))
    }
}

fn validate_type<'a>(
    ctx: &ParseContext<'a>,
    resolver: &Resolver<'_>,
    package: &str,
    ty: &'a TypeDecl,
) -> Result<()> {
    if ty.kind != TypeKind::Struct && !ty.members.is_empty() {
        return Err(ctx.source_context().validation_error_at(
            format!("{} '{}' cannot declare members", ty.kind.as_str(), ty.name),
            ctx.find_span(&ty.name),
        ));
    }
    match (ty.kind, &ty.underlying) {
        (TypeKind::Alias, None) => {
            return Err(ctx.source_context().validation_error_at(
                format!("alias '{}' needs an 'underlying' type", ty.name),
                ctx.find_span(&ty.name),
            ));
        }
        (TypeKind::Alias, Some(underlying)) => {
            resolver.check(ctx, package, underlying, "underlying type")?;
        }
        (_, Some(underlying)) => {
            return Err(ctx.source_context().validation_error_at(
                format!(
                    "only aliases have an underlying type, '{}' is a {}",
                    ty.name,
                    ty.kind.as_str()
                ),
                ctx.find_span(underlying),
            ));
        }
        (_, None) => {}
    }

    let mut member_names = HashSet::new();
    for member in &ty.members {
        ctx.validate_name(&member.name, "member")?;
        if !member_names.insert(member.name.as_str()) {
            return Err(ctx.source_context().duplicate_error(
                "member",
                format!("{}.{}", ty.name, member.name),
                ctx.find_nth_span(&member.name, 0),
                ctx.find_nth_span(&member.name, 1),
            ));
        }
        let member_ctx = ctx.push(&member.name);
        resolver.check(&member_ctx, package, &member.ty, "member type")?;
    }

    let mut method_names = HashSet::new();
    for method in &ty.methods {
        ctx.validate_name(&method.name, "method")?;
        if !method_names.insert(method.name.as_str()) {
            return Err(ctx.source_context().duplicate_error(
                "method",
                format!("{}.{}", ty.name, method.name),
                ctx.find_nth_span(&method.name, 0),
                ctx.find_nth_span(&method.name, 1),
            ));
        }
        let method_ctx = ctx.push(&method.name);
        for param in &method.params {
            resolver.check(&method_ctx, package, param, "parameter")?;
        }
        for result in &method.results {
            resolver.check(&method_ctx, package, result, "result")?;
        }
    }

    Ok(())
}

/// Resolves type references against the declared types.
struct Resolver<'m> {
    declared: HashMap<&'m str, HashSet<&'m str>>,
}

impl Resolver<'_> {
    fn check(&self, ctx: &ParseContext<'_>, package: &str, expr: &str, kind: &str) -> Result<()> {
        let parsed = ctx.parse_type(expr, kind)?;
        for reference in parsed.references() {
            if !self.resolves(package, reference) {
                return Err(ctx.source_context().unresolved_type_error(
                    reference.to_string(),
                    ctx.context_for(kind),
                    ctx.find_span(expr),
                ));
            }
        }
        Ok(())
    }

    fn resolves(&self, package: &str, reference: &TypeRef) -> bool {
        if reference.is_builtin() {
            return true;
        }
        let owner = reference.package.as_deref().unwrap_or(package);
        self.declared
            .get(owner)
            .is_some_and(|names| names.contains(reference.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = r#"
[generator]
tag = "k8s:deepcopy-gen"

[[packages]]
path = "example.com/app/api"
comments = ["+k8s:deepcopy-gen=package"]

[[packages.types]]
name = "Config"
kind = "struct"
members = [
    { name = "Name", type = "string" },
    { name = "Tags", type = "map[string]string" },
    { name = "Parent", type = "*Config" },
]

[[packages.types]]
name = "Phase"
kind = "alias"
underlying = "string"
"#;

    #[test]
    fn test_parse_basic_manifest() {
        let manifest: Manifest = BASIC.parse().unwrap();
        assert_eq!(manifest.generator.tag, "k8s:deepcopy-gen");
        assert_eq!(manifest.generator.output_file_base, DEFAULT_OUTPUT_FILE_BASE);
        assert_eq!(manifest.packages.len(), 1);

        let package = manifest.package("example.com/app/api").unwrap();
        assert!(package.input);
        assert_eq!(package.types.len(), 2);
        assert_eq!(package.types[0].members[1].ty, "map[string]string");
        assert_eq!(package.types[1].kind, TypeKind::Alias);
    }

    #[test]
    fn test_defaults_without_generator_table() {
        let manifest: Manifest = "".parse().unwrap();
        assert_eq!(manifest.generator.tag, DEFAULT_TAG);
        assert_eq!(manifest.generator.build_tag, DEFAULT_BUILD_TAG);
        assert!(manifest.packages.is_empty());
    }

    #[test]
    fn test_unresolved_member_type() {
        let src = r#"
[[packages]]
path = "example.com/app/api"

[[packages.types]]
name = "Config"
kind = "struct"
members = [{ name = "W", type = "*Widget" }]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        match *err {
            Error::UnresolvedType { name, span, .. } => {
                assert_eq!(name, "Widget");
                assert!(span.is_some());
            }
            other => panic!("expected unresolved type, got {other:?}"),
        }
    }

    #[test]
    fn test_qualified_reference_to_other_package() {
        let src = r#"
[[packages]]
path = "example.com/app/api"

[[packages.types]]
name = "Shape"
kind = "struct"
second_closest_comments = ["+k8s:deepcopy-gen:interfaces=example.com/app/iface.Cloneable"]
members = [{ name = "Next", type = "example.com/app/iface.Cloneable" }]

[[packages]]
path = "example.com/app/iface"
input = false

[[packages.types]]
name = "Cloneable"
kind = "interface"
"#;
        let manifest: Manifest = src.parse().unwrap();
        assert_eq!(manifest.input_packages().count(), 1);
    }

    #[test]
    fn test_duplicate_type() {
        let src = r#"
[[packages]]
path = "p"

[[packages.types]]
name = "A"
kind = "struct"

[[packages.types]]
name = "A"
kind = "struct"
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Duplicate { what: "type", .. }));
    }

    #[test]
    fn test_duplicate_package() {
        let src = r#"
[[packages]]
path = "p"

[[packages]]
path = "p"
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Duplicate { what: "package", .. }));
    }

    #[test]
    fn test_alias_requires_underlying() {
        let src = r#"
[[packages]]
path = "p"

[[packages.types]]
name = "Phase"
kind = "alias"
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_members_only_on_structs() {
        let src = r#"
[[packages]]
path = "p"

[[packages.types]]
name = "I"
kind = "interface"
members = [{ name = "X", type = "int" }]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_malformed_type_expression() {
        let src = r#"
[[packages]]
path = "p"

[[packages.types]]
name = "A"
kind = "struct"
members = [{ name = "M", type = "map[string" }]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::InvalidTypeExpr { .. }));
    }

    #[test]
    fn test_keyword_member_name() {
        let src = r#"
[[packages]]
path = "p"

[[packages.types]]
name = "A"
kind = "struct"
members = [{ name = "type", type = "int" }]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_method_signature_resolution() {
        let src = r#"
[[packages]]
path = "p"

[[packages.types]]
name = "A"
kind = "struct"
methods = [{ name = "DeepCopy", results = ["*A"] }]
"#;
        let manifest: Manifest = src.parse().unwrap();
        let method = &manifest.packages[0].types[0].methods[0];
        assert_eq!(method.receiver, ReceiverKind::Pointer);
        assert!(method.params.is_empty());
    }

    #[test]
    fn test_toml_syntax_error() {
        let err = "[[packages]\npath = ".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILENAME);
        std::fs::write(&path, BASIC).unwrap();

        let manifest = Manifest::from_file(&path).unwrap();
        assert_eq!(manifest.packages[0].path, "example.com/app/api");

        let missing = Manifest::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(*missing, Error::Io { .. }));
    }
}
