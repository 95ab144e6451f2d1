//! Lower phase - builds the type universe from the manifest.
//!
//! Every declared type is reserved before any shape is built, so members
//! can refer to types declared later in the file or to their own type.

use copygen_ir::{
    Member, Package, Receiver, Shape, Signature, TypeId, TypeName, Universe, UniverseBuilder,
    default_package_name,
};
use copygen_manifest::{
    Manifest, MethodDecl, PackageDecl, ReceiverKind, TypeDecl, TypeExpr, TypeKind, TypeRef,
};
use eyre::{Result, eyre};

use crate::pipeline::{CompilationContext, Phase};

/// The only predeclared interface type.
const ERROR_TYPE: &str = "error";

/// Phase that transforms the manifest into a [`Universe`].
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Build the type universe from the manifest"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let universe = lower_manifest(&ctx.manifest)?;
        tracing::debug!(nodes = universe.len(), "lowered universe");
        ctx.universe = Some(universe);
        Ok(())
    }
}

/// Lower a manifest into a type universe.
///
/// # Errors
///
/// Fails only on type expressions that do not parse, which manifest
/// validation already rules out.
pub fn lower_manifest(manifest: &Manifest) -> Result<Universe> {
    let mut lowering = Lowering {
        builder: UniverseBuilder::new(),
    };

    let declared: Vec<Vec<TypeId>> = manifest
        .packages
        .iter()
        .map(|package| {
            package
                .types
                .iter()
                .map(|ty| {
                    lowering
                        .builder
                        .declare(TypeName::new(&package.path, &ty.name))
                })
                .collect()
        })
        .collect();

    for (package, ids) in manifest.packages.iter().zip(declared) {
        for (ty, id) in package.types.iter().zip(&ids) {
            lowering.define(&package.path, *id, ty)?;
        }
        lowering.builder.add_package(lower_package(package, ids));
    }

    Ok(lowering.builder.build())
}

fn lower_package(package: &PackageDecl, types: Vec<TypeId>) -> Package {
    Package {
        path: package.path.clone(),
        name: package
            .name
            .clone()
            .unwrap_or_else(|| default_package_name(&package.path)),
        comment_lines: package.comments.clone(),
        types,
        input: package.input,
    }
}

struct Lowering {
    builder: UniverseBuilder,
}

impl Lowering {
    fn define(&mut self, package: &str, id: TypeId, ty: &TypeDecl) -> Result<()> {
        let shape = match ty.kind {
            TypeKind::Struct => {
                let members = ty
                    .members
                    .iter()
                    .map(|m| Ok(Member::new(&m.name, self.type_of(package, &m.ty)?)))
                    .collect::<Result<Vec<_>>>()?;
                Shape::Struct { members }
            }
            TypeKind::Interface => Shape::Interface,
            TypeKind::Alias => {
                let underlying = ty
                    .underlying
                    .as_deref()
                    .ok_or_else(|| eyre!("alias {}.{} has no underlying type", package, ty.name))?;
                Shape::Alias {
                    underlying: self.type_of(package, underlying)?,
                }
            }
            TypeKind::Unknown => Shape::Unknown,
        };
        self.builder.define(id, shape);

        for method in &ty.methods {
            let signature = self.signature(package, method)?;
            self.builder.add_method(id, &method.name, signature);
        }
        self.builder.set_comments(
            id,
            ty.comments.clone(),
            ty.second_closest_comments.clone(),
        );
        Ok(())
    }

    fn signature(&mut self, package: &str, method: &MethodDecl) -> Result<Signature> {
        let parameters = method
            .params
            .iter()
            .map(|p| self.type_of(package, p))
            .collect::<Result<Vec<_>>>()?;
        let results = method
            .results
            .iter()
            .map(|r| self.type_of(package, r))
            .collect::<Result<Vec<_>>>()?;
        Ok(Signature {
            receiver: match method.receiver {
                ReceiverKind::Pointer => Receiver::Pointer,
                ReceiverKind::Value => Receiver::Value,
            },
            parameters,
            results,
        })
    }

    fn type_of(&mut self, package: &str, expr: &str) -> Result<TypeId> {
        let parsed: TypeExpr = expr
            .parse()
            .map_err(|e| eyre!("invalid type expression '{}': {}", expr, e))?;
        Ok(self.lower_expr(package, &parsed))
    }

    fn lower_expr(&mut self, package: &str, expr: &TypeExpr) -> TypeId {
        match expr {
            TypeExpr::Named(reference) => self.named(package, reference),
            TypeExpr::Pointer(elem) => {
                let elem = self.lower_expr(package, elem);
                self.builder.anonymous(Shape::Pointer { elem })
            }
            TypeExpr::Slice(elem) => {
                let elem = self.lower_expr(package, elem);
                self.builder.anonymous(Shape::Slice { elem })
            }
            TypeExpr::Map { key, value } => {
                let key = self.lower_expr(package, key);
                let elem = self.lower_expr(package, value);
                self.builder.anonymous(Shape::Map { key, elem })
            }
            TypeExpr::EmptyStruct => self.builder.anonymous(Shape::Struct {
                members: Vec::new(),
            }),
            TypeExpr::Interface => self.builder.anonymous(Shape::Interface),
            // Functions, channels and arrays keep their source text as a
            // name so markers can show what was skipped.
            TypeExpr::Opaque(text) => {
                let id = self.builder.declare(TypeName::builtin(text.as_str()));
                self.builder.define(id, Shape::Unknown);
                id
            }
        }
    }

    fn named(&mut self, package: &str, reference: &TypeRef) -> TypeId {
        if reference.is_builtin() {
            if reference.name == ERROR_TYPE {
                let id = self.builder.declare(TypeName::builtin(ERROR_TYPE));
                self.builder.define(id, Shape::Interface);
                return id;
            }
            return self.builder.builtin(&reference.name);
        }
        let owner = reference.package.as_deref().unwrap_or(package);
        self.builder
            .declare(TypeName::new(owner, reference.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use copygen_ir::{Kind, Receiver};

    use super::*;

    fn lower(content: &str) -> Universe {
        let manifest: Manifest = content.parse().expect("valid manifest");
        lower_manifest(&manifest).expect("lower should succeed")
    }

    fn lookup(universe: &Universe, package: &str, name: &str) -> TypeId {
        universe
            .lookup(&TypeName::new(package, name))
            .unwrap_or_else(|| panic!("{package}.{name} not declared"))
    }

    #[test]
    fn test_lower_phase() {
        let manifest: Manifest = r#"
        [[packages]]
        path = "p/api"
        "#
        .parse()
        .unwrap();
        let mut ctx = CompilationContext::new(manifest);

        LowerPhase.run(&mut ctx).expect("lower should succeed");

        let universe = ctx.universe.as_ref().expect("universe set");
        let package = universe.package("p/api").expect("package lowered");
        assert_eq!(package.name, "api");
        assert!(package.input);
    }

    #[test]
    fn test_lower_struct_members() {
        let universe = lower(
            r#"
            [[packages]]
            path = "p/api"
            comments = ["+k8s:deepcopy-gen=package"]

            [[packages.types]]
            name = "Config"
            kind = "struct"
            comments = ["Config is a config."]
            second_closest_comments = ["+k8s:deepcopy-gen:interfaces=p/api.Object"]
            members = [
                { name = "Tags", type = "map[string]string" },
                { name = "Owner", type = "*string" },
                { name = "Next", type = "*Config" },
            ]

            [[packages.types]]
            name = "Object"
            kind = "interface"
            "#,
        );

        let config = universe.get(lookup(&universe, "p/api", "Config"));
        assert_eq!(config.kind(), Kind::Struct);
        assert_eq!(config.comment_lines, vec!["Config is a config."]);
        assert_eq!(config.second_closest_comment_lines.len(), 1);

        let members = config.shape.members();
        assert_eq!(members.len(), 3);
        match universe.get(members[0].ty).shape {
            Shape::Map { key, elem } => {
                assert_eq!(key, elem);
                assert_eq!(universe.get(key).kind(), Kind::Primitive);
            }
            ref other => panic!("expected map, got {other:?}"),
        }
        assert_eq!(
            universe.get(members[2].ty).shape,
            Shape::Pointer {
                elem: lookup(&universe, "p/api", "Config")
            }
        );

        let package = universe.package("p/api").unwrap();
        assert_eq!(package.comment_lines, vec!["+k8s:deepcopy-gen=package"]);
        assert_eq!(package.types.len(), 2);
    }

    #[test]
    fn test_lower_forward_and_cross_package_references() {
        let universe = lower(
            r#"
            [[packages]]
            path = "p/api"

            [[packages.types]]
            name = "Holder"
            kind = "struct"
            members = [{ name = "Ext", type = "q/ext.Thing" }, { name = "Later", type = "Later" }]

            [[packages.types]]
            name = "Later"
            kind = "struct"

            [[packages]]
            path = "q/ext"
            input = false

            [[packages.types]]
            name = "Thing"
            kind = "struct"
            "#,
        );

        let holder = universe.get(lookup(&universe, "p/api", "Holder"));
        let members = holder.shape.members();
        assert_eq!(members[0].ty, lookup(&universe, "q/ext", "Thing"));
        assert_eq!(members[1].ty, lookup(&universe, "p/api", "Later"));
        assert_eq!(universe.get(members[1].ty).kind(), Kind::Struct);
        assert!(!universe.package("q/ext").unwrap().input);
    }

    #[test]
    fn test_lower_alias_and_methods() {
        let universe = lower(
            r#"
            [[packages]]
            path = "p/api"

            [[packages.types]]
            name = "Labels"
            kind = "alias"
            underlying = "[]string"

            [[packages.types]]
            name = "Quantity"
            kind = "struct"
            methods = [{ name = "DeepCopy", receiver = "value", results = ["Quantity"] }]
            "#,
        );

        let labels = universe.get(lookup(&universe, "p/api", "Labels"));
        let Shape::Alias { underlying } = labels.shape else {
            panic!("expected alias");
        };
        assert_eq!(universe.get(underlying).kind(), Kind::Slice);

        let quantity_id = lookup(&universe, "p/api", "Quantity");
        let method = universe.get(quantity_id).method("DeepCopy").unwrap();
        assert_eq!(method.receiver, Receiver::Value);
        assert!(method.parameters.is_empty());
        assert_eq!(method.results, vec![quantity_id]);
    }

    #[test]
    fn test_lower_special_types() {
        let universe = lower(
            r#"
            [[packages]]
            path = "p/api"

            [[packages.types]]
            name = "Odd"
            kind = "struct"
            members = [
                { name = "Err", type = "error" },
                { name = "Any", type = "interface{}" },
                { name = "Set", type = "map[string]struct{}" },
                { name = "Fn", type = "func()" },
            ]
            "#,
        );

        let odd = universe.get(lookup(&universe, "p/api", "Odd"));
        let members = odd.shape.members();

        let err = universe.get(members[0].ty);
        assert_eq!(err.kind(), Kind::Interface);
        assert_eq!(err.name, Some(TypeName::builtin("error")));

        let any = universe.get(members[1].ty);
        assert_eq!(any.kind(), Kind::Interface);
        assert!(any.name.is_none());

        let Shape::Map { elem, .. } = universe.get(members[2].ty).shape else {
            panic!("expected map");
        };
        assert_eq!(universe.get(elem).shape, Shape::Struct { members: vec![] });

        let func = universe.get(members[3].ty);
        assert_eq!(func.kind(), Kind::Unknown);
        assert_eq!(func.name, Some(TypeName::builtin("func()")));
    }

    #[test]
    fn test_anonymous_types_shared() {
        let universe = lower(
            r#"
            [[packages]]
            path = "p/api"

            [[packages.types]]
            name = "A"
            kind = "struct"
            members = [{ name = "X", type = "[]int" }, { name = "Y", type = "[]int" }]
            "#,
        );
        let a = universe.get(lookup(&universe, "p/api", "A"));
        let members = a.shape.members();
        assert_eq!(members[0].ty, members[1].ty);
    }
}
