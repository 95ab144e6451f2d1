//! Per-kind copy emitters.
//!
//! Every emitter writes statements that copy `*in` into `*out`, where `in`
//! and `out` are pointers to the type being copied. Nested structs are never
//! expanded; they are copied through their own `DeepCopyInto`, which keeps
//! self-referential types finite.

use copygen_codegen::builder::CodeFragment;
use copygen_ir::{Member, Shape, TypeId};

use super::{
    Session,
    predicates::{has_copy_override, is_anonymous_struct, is_assignable, underlying},
};
use crate::ast::if_else;

fn line(s: impl Into<String>) -> CodeFragment {
    CodeFragment::line(s)
}

/// Statements copying `*in` into `*out`, or a lone marker when the shape is
/// unsupported somewhere below.
///
/// A marker never mentions `in` or `out`, so callers must not declare them
/// for it: Go rejects unused variables.
enum Emitted {
    Code(Vec<CodeFragment>),
    Marker(CodeFragment),
}

impl Session<'_> {
    /// `*out = *in` followed by fix-ups for members that share memory.
    pub(crate) fn struct_body(&mut self, id: TypeId, owner: &str) -> Vec<CodeFragment> {
        let universe = self.universe;
        let mut body = vec![line("*out = *in")];
        for member in universe.get(underlying(universe, id)).shape.members() {
            self.location = format!("{}.{}", owner, member.name);
            body.extend(self.member(member));
        }
        self.location = owner.to_string();
        body
    }

    fn member(&mut self, member: &Member) -> Vec<CodeFragment> {
        let universe = self.universe;
        let name = &member.name;
        let ty = member.ty;
        let has_override = has_copy_override(universe, ty);

        match &universe.get(underlying(universe, ty)).shape {
            Shape::Primitive => {
                if has_override {
                    vec![line(format!("out.{name} = in.{name}.DeepCopy()"))]
                } else {
                    Vec::new()
                }
            }
            Shape::Map { .. } | Shape::Slice { .. } | Shape::Pointer { .. } => {
                let body = if has_override {
                    vec![line(format!("out.{name} = in.{name}.DeepCopy()"))]
                } else {
                    match self.copy_into(ty) {
                        Emitted::Code(code) => {
                            let mut body =
                                vec![line(format!("in, out := &in.{name}, &out.{name}"))];
                            body.extend(code);
                            body
                        }
                        Emitted::Marker(marker) => return vec![marker],
                    }
                };
                vec![CodeFragment::braced(format!("if in.{name} != nil"), body)]
            }
            Shape::Struct { .. } => {
                if has_override {
                    vec![line(format!("out.{name} = in.{name}.DeepCopy()"))]
                } else if is_assignable(universe, ty) {
                    vec![line(format!("out.{name} = in.{name}"))]
                } else if universe.get(ty).name.is_none() {
                    let described = self.describe(ty);
                    vec![self.marker(format!(
                        "Copying anonymous struct {described} is unsupported"
                    ))]
                } else {
                    vec![line(format!("in.{name}.DeepCopyInto(&out.{name})"))]
                }
            }
            Shape::Interface => match self.interface_method(ty) {
                Some(method) => vec![CodeFragment::braced(
                    format!("if in.{name} != nil"),
                    vec![line(format!("out.{name} = in.{name}.{method}()"))],
                )],
                None => vec![self.unsupported(ty)],
            },
            Shape::Alias { .. } | Shape::Unknown => vec![self.unsupported(ty)],
        }
    }

    /// Copy `*in` into `*out` for a type with reference semantics.
    fn copy_into(&mut self, ty: TypeId) -> Emitted {
        let universe = self.universe;
        match &universe.get(underlying(universe, ty)).shape {
            Shape::Primitive => Emitted::Code(vec![line("*out = *in")]),
            Shape::Pointer { elem } => self.pointer(*elem),
            Shape::Slice { elem } => self.slice(ty, *elem),
            Shape::Map { key, elem } => self.map(ty, *key, *elem),
            Shape::Struct { .. } => Emitted::Code(vec![line("in.DeepCopyInto(out)")]),
            Shape::Interface | Shape::Alias { .. } | Shape::Unknown => {
                Emitted::Marker(self.unsupported(ty))
            }
        }
    }

    fn pointer(&mut self, elem: TypeId) -> Emitted {
        let universe = self.universe;
        let copy = if has_copy_override(universe, elem) {
            line("**out = (*in).DeepCopy()")
        } else if is_assignable(universe, elem) {
            line("**out = **in")
        } else {
            match &universe.get(underlying(universe, elem)).shape {
                Shape::Map { .. } | Shape::Slice { .. } | Shape::Pointer { .. } => {
                    let code = match self.copy_into(elem) {
                        Emitted::Code(code) => code,
                        marker => return marker,
                    };
                    let mut body = vec![line("in, out := *in, *out")];
                    body.extend(code);
                    CodeFragment::braced("if **in != nil", body)
                }
                Shape::Struct { .. } => line("(*in).DeepCopyInto(*out)"),
                _ => return Emitted::Marker(self.unsupported(elem)),
            }
        };
        let elem_ref = self.type_ref(elem);
        Emitted::Code(vec![line(format!("*out = new({elem_ref})")), copy])
    }

    fn slice(&mut self, ty: TypeId, elem: TypeId) -> Emitted {
        let universe = self.universe;
        if has_copy_override(universe, ty) {
            return Emitted::Code(vec![line("*out = in.DeepCopy()")]);
        }

        let copy = if has_copy_override(universe, elem) {
            CodeFragment::braced(
                "for i := range *in",
                vec![line("(*out)[i] = (*in)[i].DeepCopy()")],
            )
        } else if is_assignable(universe, elem) {
            line("copy(*out, *in)")
        } else {
            let body = match &universe.get(underlying(universe, elem)).shape {
                Shape::Map { .. } | Shape::Slice { .. } | Shape::Pointer { .. } => {
                    let code = match self.copy_into(elem) {
                        Emitted::Code(code) => code,
                        marker => return marker,
                    };
                    let mut body = vec![line("in, out := &(*in)[i], &(*out)[i]")];
                    body.extend(code);
                    CodeFragment::braced("if (*in)[i] != nil", body)
                }
                Shape::Interface => match self.interface_method(elem) {
                    Some(method) => CodeFragment::braced(
                        "if (*in)[i] != nil",
                        vec![line(format!("(*out)[i] = (*in)[i].{method}()"))],
                    ),
                    None => return Emitted::Marker(self.unsupported(elem)),
                },
                Shape::Struct { .. } => line("(*in)[i].DeepCopyInto(&(*out)[i])"),
                _ => return Emitted::Marker(self.unsupported(elem)),
            };
            CodeFragment::braced("for i := range *in", vec![body])
        };

        let ty_ref = self.type_ref(ty);
        Emitted::Code(vec![line(format!("*out = make({ty_ref}, len(*in))")), copy])
    }

    fn map(&mut self, ty: TypeId, key: TypeId, elem: TypeId) -> Emitted {
        let universe = self.universe;
        if !is_assignable(universe, key) {
            // The fresh map keeps the clone from sharing entries with the source.
            let described = self.describe(key);
            let marker = self.marker(format!("Copying unassignable keys unsupported {described}"));
            let ty_ref = self.type_ref(ty);
            return Emitted::Code(vec![
                line(format!("*out = make({ty_ref}, len(*in))")),
                CodeFragment::braced("for range *in", vec![marker]),
            ]);
        }

        let copy = if has_copy_override(universe, elem) {
            CodeFragment::braced(
                "for key, val := range *in",
                vec![line("(*out)[key] = val.DeepCopy()")],
            )
        } else if is_anonymous_struct(universe, elem) {
            CodeFragment::braced("for key := range *in", vec![line("(*out)[key] = struct{}{}")])
        } else if is_assignable(universe, elem) {
            CodeFragment::braced("for key, val := range *in", vec![line("(*out)[key] = val")])
        } else {
            let body = match &universe.get(underlying(universe, elem)).shape {
                Shape::Interface => match self.interface_method(elem) {
                    Some(method) => vec![if_else(
                        "val == nil",
                        vec![line("(*out)[key] = nil")],
                        vec![line(format!("(*out)[key] = val.{method}()"))],
                    )],
                    None => return Emitted::Marker(self.unsupported(elem)),
                },
                Shape::Struct { .. } if self.selection.is_copyable_in_bounds(elem) => {
                    let elem_ref = self.type_ref(elem);
                    vec![
                        line(format!("newVal := new({elem_ref})")),
                        line("val.DeepCopyInto(newVal)"),
                        line("(*out)[key] = *newVal"),
                    ]
                }
                Shape::Struct { .. } => vec![line("(*out)[key] = *val.DeepCopy()")],
                Shape::Map { .. } | Shape::Slice { .. } | Shape::Pointer { .. } => {
                    let code = match self.copy_into(elem) {
                        Emitted::Code(code) => code,
                        marker => return marker,
                    };
                    let elem_ref = self.type_ref(elem);
                    let mut copy = vec![line("in, out := &val, &outVal")];
                    copy.extend(code);
                    vec![
                        line(format!("var outVal {elem_ref}")),
                        if_else("val == nil", vec![line("(*out)[key] = nil")], copy),
                        line("(*out)[key] = outVal"),
                    ]
                }
                _ => return Emitted::Marker(self.unsupported(elem)),
            };
            CodeFragment::braced("for key, val := range *in", body)
        };

        let ty_ref = self.type_ref(ty);
        Emitted::Code(vec![line(format!("*out = make({ty_ref}, len(*in))")), copy])
    }

    fn unsupported(&mut self, ty: TypeId) -> CodeFragment {
        let described = self.describe(ty);
        self.marker(format!("Type {described} is unsupported."))
    }
}
