//! Top-level routines for one candidate.

use copygen_codegen::{builder::CodeFragment, select::Candidate};

use super::{
    Session,
    predicates::{CopyOverride, DEEP_COPY, DEEP_COPY_INTO, copy_override},
};
use crate::ast::Func;

/// Name of the registration function emitted for `register` packages.
pub const REGISTER_FUNC: &str = "RegisterDeepCopies";

impl Session<'_> {
    /// `DeepCopyInto`, `DeepCopy` and one `DeepCopy<I>` per interface.
    ///
    /// Routines the type already declares are left out.
    pub fn routines(&mut self, candidate: &Candidate) -> Vec<Func> {
        let universe = self.universe;
        let node = universe.get(candidate.id);
        let owner = candidate.name.to_string();
        self.location = owner.clone();
        tracing::debug!(ty = %owner, "synthesizing");

        let ty = self.type_ref(candidate.id);
        let mut funcs = Vec::new();

        if node.has_method(DEEP_COPY_INTO) {
            tracing::debug!(ty = %owner, "DeepCopyInto is declared, skipping");
        } else {
            let mut body = match copy_override(universe, candidate.id) {
                Some(CopyOverride::Value) => vec![CodeFragment::line("*out = in.DeepCopy()")],
                Some(CopyOverride::Pointer) => vec![
                    CodeFragment::line("clone := in.DeepCopy()"),
                    CodeFragment::line("*out = *clone"),
                ],
                Some(CopyOverride::Unsupported) => vec![self.marker(format!(
                    "DeepCopy method of {} has an unsupported signature",
                    ty
                ))],
                None => self.struct_body(candidate.id, &owner),
            };
            body.push(CodeFragment::line("return"));
            funcs.push(
                Func::method(format!("in *{}", ty), DEEP_COPY_INTO)
                    .doc(format!(
                        "{} is a generated deepcopy function, copying the receiver, writing into out. in must be non-nil.",
                        DEEP_COPY_INTO
                    ))
                    .param(format!("out *{}", ty))
                    .body(body),
            );
        }

        if node.has_method(DEEP_COPY) {
            tracing::debug!(ty = %owner, "DeepCopy is declared, skipping");
        } else {
            funcs.push(
                Func::method(format!("in *{}", ty), DEEP_COPY)
                    .doc(format!(
                        "{} is a generated deepcopy function, copying the receiver, creating a new {}.",
                        DEEP_COPY, ty
                    ))
                    .returns(format!("*{}", ty))
                    .body(vec![
                        CodeFragment::braced(
                            "if in == nil",
                            vec![CodeFragment::line("return nil")],
                        ),
                        CodeFragment::line(format!("out := new({})", ty)),
                        CodeFragment::line("in.DeepCopyInto(out)"),
                        CodeFragment::line("return out"),
                    ]),
            );
        }

        for interface in &candidate.interfaces {
            // Selection rejects builtin interfaces.
            let Some(method) = self.interface_method(*interface) else {
                continue;
            };
            let interface_ref = self.type_ref(*interface);
            let doc = format!(
                "{} is a generated deepcopy function, copying the receiver, creating a new {}.",
                method, interface_ref
            );
            let func = if candidate.non_pointer_interfaces {
                Func::method(format!("in {}", ty), method)
                    .body(vec![CodeFragment::line("return *in.DeepCopy()")])
            } else {
                Func::method(format!("in *{}", ty), method).body(vec![
                    CodeFragment::braced(
                        "if c := in.DeepCopy(); c != nil",
                        vec![CodeFragment::line("return c")],
                    ),
                    CodeFragment::line("return nil"),
                ])
            };
            funcs.push(func.doc(doc).returns(interface_ref));
        }

        funcs
    }

    /// `RegisterDeepCopies`, handing every candidate's `DeepCopyInto` to a
    /// caller-supplied registry.
    pub fn registration(&mut self, candidates: &[Candidate]) -> Func {
        let mut body = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let ty = self.type_ref(candidate.id);
            body.push(CodeFragment::line(format!(
                "register(&{ty}{{}}, func(in, out interface{{}}) {{ in.(*{ty}).DeepCopyInto(out.(*{ty})) }})"
            )));
        }
        Func::new(REGISTER_FUNC)
            .doc(format!(
                "{} hands the deepcopy function of every generated type in this package to register.",
                REGISTER_FUNC
            ))
            .param("register func(prototype interface{}, deepCopyInto func(in, out interface{}))")
            .body(body)
    }
}
