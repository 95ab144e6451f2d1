//! Structural questions the emitters ask about a type.

use std::collections::HashSet;

use copygen_ir::{Shape, TypeId, Universe};

/// The name of the method a type declares to copy itself.
pub const DEEP_COPY: &str = "DeepCopy";

/// The name of the method copying a value into an existing one.
pub const DEEP_COPY_INTO: &str = "DeepCopyInto";

/// A declared `DeepCopy` method, classified by what it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOverride {
    /// `DeepCopy() T`
    Value,
    /// `DeepCopy() *T`
    Pointer,
    /// Parameters, several results or an unrelated result type.
    Unsupported,
}

/// Follow alias links down to the first non-alias type.
///
/// A cyclic alias chain stops at the type where the cycle is detected.
pub fn underlying(universe: &Universe, id: TypeId) -> TypeId {
    let mut current = id;
    for _ in 0..universe.len() {
        match universe.get(current).shape {
            Shape::Alias { underlying } => current = underlying,
            _ => return current,
        }
    }
    current
}

/// Builtins and aliases of builtins.
pub fn is_primitive(universe: &Universe, id: TypeId) -> bool {
    matches!(universe.get(underlying(universe, id)).shape, Shape::Primitive)
}

/// Whether plain assignment produces an independent copy.
///
/// True for primitives and for structs whose members are all assignable.
pub fn is_assignable(universe: &Universe, id: TypeId) -> bool {
    assignable(universe, id, &mut HashSet::new())
}

fn assignable(universe: &Universe, id: TypeId, visiting: &mut HashSet<TypeId>) -> bool {
    let id = underlying(universe, id);
    if !visiting.insert(id) {
        return false;
    }
    let result = match &universe.get(id).shape {
        Shape::Primitive => true,
        Shape::Struct { members } => members
            .iter()
            .all(|member| assignable(universe, member.ty, visiting)),
        _ => false,
    };
    visiting.remove(&id);
    result
}

/// `struct{}` or an alias of it.
pub fn is_anonymous_struct(universe: &Universe, id: TypeId) -> bool {
    let node = universe.get(underlying(universe, id));
    node.name.is_none() && matches!(&node.shape, Shape::Struct { members } if members.is_empty())
}

/// Classify the `DeepCopy` method declared on `id`, if any.
pub fn copy_override(universe: &Universe, id: TypeId) -> Option<CopyOverride> {
    let signature = universe.get(id).method(DEEP_COPY)?;
    if !signature.parameters.is_empty() {
        return Some(CopyOverride::Unsupported);
    }
    let kind = match signature.results.as_slice() {
        [result] if *result == id => CopyOverride::Value,
        [result] => match universe.get(*result).shape {
            Shape::Pointer { elem } if elem == id => CopyOverride::Pointer,
            _ => CopyOverride::Unsupported,
        },
        _ => CopyOverride::Unsupported,
    };
    Some(kind)
}

/// Whether `id` declares `DeepCopy() T`, which emitters call instead of
/// recursing.
pub fn has_copy_override(universe: &Universe, id: TypeId) -> bool {
    copy_override(universe, id) == Some(CopyOverride::Value)
}

#[cfg(test)]
mod tests {
    use copygen_ir::{Member, Receiver, Signature, TypeName, UniverseBuilder};

    use super::*;

    struct Ids {
        string: TypeId,
        name: TypeId,
        plain: TypeId,
        holder: TypeId,
        empty: TypeId,
        set: TypeId,
    }

    fn universe() -> (Universe, Ids) {
        let mut builder = UniverseBuilder::new();
        let string = builder.builtin("string");
        let name = builder.declare(TypeName::new("p", "Name"));
        builder.define(name, Shape::Alias { underlying: string });

        let plain = builder.declare(TypeName::new("p", "Plain"));
        builder.define(
            plain,
            Shape::Struct {
                members: vec![Member::new("A", string), Member::new("B", name)],
            },
        );

        let ptr = builder.anonymous(Shape::Pointer { elem: string });
        let holder = builder.declare(TypeName::new("p", "Holder"));
        builder.define(
            holder,
            Shape::Struct {
                members: vec![Member::new("Plain", plain), Member::new("P", ptr)],
            },
        );

        let empty = builder.anonymous(Shape::Struct { members: vec![] });
        let set = builder.declare(TypeName::new("p", "Set"));
        builder.define(set, Shape::Alias { underlying: empty });

        let ids = Ids {
            string,
            name,
            plain,
            holder,
            empty,
            set,
        };
        (builder.build(), ids)
    }

    #[test]
    fn test_underlying_follows_aliases() {
        let (u, ids) = universe();
        assert_eq!(underlying(&u, ids.name), ids.string);
        assert_eq!(underlying(&u, ids.plain), ids.plain);
        assert!(is_primitive(&u, ids.name));
        assert!(!is_primitive(&u, ids.plain));
    }

    #[test]
    fn test_assignable_structs() {
        let (u, ids) = universe();
        assert!(is_assignable(&u, ids.string));
        assert!(is_assignable(&u, ids.plain));
        assert!(!is_assignable(&u, ids.holder));
        assert!(is_assignable(&u, ids.empty));
    }

    #[test]
    fn test_anonymous_struct() {
        let (u, ids) = universe();
        assert!(is_anonymous_struct(&u, ids.empty));
        assert!(is_anonymous_struct(&u, ids.set));
        assert!(!is_anonymous_struct(&u, ids.plain));
    }

    #[test]
    fn test_self_referential_struct_terminates() {
        let mut builder = UniverseBuilder::new();
        let node = builder.declare(TypeName::new("p", "Node"));
        let alias = builder.declare(TypeName::new("p", "Loop"));
        builder.define(alias, Shape::Alias { underlying: node });
        builder.define(
            node,
            Shape::Struct {
                members: vec![Member::new("Inner", alias)],
            },
        );
        let u = builder.build();
        assert!(!is_assignable(&u, node));
    }

    #[test]
    fn test_copy_override_kinds() {
        let mut builder = UniverseBuilder::new();
        let int = builder.builtin("int");
        let value = builder.declare(TypeName::new("p", "Value"));
        let pointer = builder.declare(TypeName::new("p", "Pointer"));
        let odd = builder.declare(TypeName::new("p", "Odd"));
        let plain = builder.declare(TypeName::new("p", "Plain"));
        for id in [value, pointer, odd, plain] {
            builder.define(id, Shape::Struct { members: vec![] });
        }
        let pointer_ref = builder.anonymous(Shape::Pointer { elem: pointer });

        let sig = |results: Vec<TypeId>, parameters: Vec<TypeId>| Signature {
            receiver: Receiver::Pointer,
            parameters,
            results,
        };
        builder.add_method(value, DEEP_COPY, sig(vec![value], vec![]));
        builder.add_method(pointer, DEEP_COPY, sig(vec![pointer_ref], vec![]));
        builder.add_method(odd, DEEP_COPY, sig(vec![odd], vec![int]));
        let u = builder.build();

        assert_eq!(copy_override(&u, value), Some(CopyOverride::Value));
        assert_eq!(copy_override(&u, pointer), Some(CopyOverride::Pointer));
        assert_eq!(copy_override(&u, odd), Some(CopyOverride::Unsupported));
        assert_eq!(copy_override(&u, plain), None);
        assert!(has_copy_override(&u, value));
        assert!(!has_copy_override(&u, pointer));
    }
}
