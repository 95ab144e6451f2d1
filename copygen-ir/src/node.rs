//! Type nodes and their members and methods.

use indexmap::IndexMap;

use crate::{Kind, Shape, TypeId, TypeName};

/// A struct member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    /// Field name (for embedded fields, the embedded type's local name).
    pub name: String,
    /// Field type.
    pub ty: TypeId,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// How a method receives its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// `func (t *T) ...`
    Pointer,
    /// `func (t T) ...`
    Value,
}

/// A method signature, detailed enough to evaluate copy overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub receiver: Receiver,
    pub parameters: Vec<TypeId>,
    pub results: Vec<TypeId>,
}

/// One type in the universe.
///
/// Nodes are built once by the lowering step and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    /// Declared name. Anonymous types (`*T`, `[]T`, `map[K]V`, `struct{}`)
    /// have none.
    pub name: Option<TypeName>,
    /// Kind and kind-specific data.
    pub shape: Shape,
    /// Declared methods by name, in declaration order.
    pub methods: IndexMap<String, Signature>,
    /// Raw comment lines directly above the declaration.
    pub comment_lines: Vec<String>,
    /// Raw comment lines of the block before the closest one.
    pub second_closest_comment_lines: Vec<String>,
}

impl TypeNode {
    /// Create an anonymous node with no methods or comments.
    pub fn anonymous(shape: Shape) -> Self {
        Self {
            name: None,
            shape,
            methods: IndexMap::new(),
            comment_lines: Vec::new(),
            second_closest_comment_lines: Vec::new(),
        }
    }

    /// Create a named node with no methods or comments.
    pub fn named(name: TypeName, shape: Shape) -> Self {
        Self {
            name: Some(name),
            ..Self::anonymous(shape)
        }
    }

    /// The kind of this node.
    pub fn kind(&self) -> Kind {
        self.shape.kind()
    }

    /// Look up a declared method.
    pub fn method(&self, name: &str) -> Option<&Signature> {
        self.methods.get(name)
    }

    /// Returns true if the node declares a method with this name.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Returns true if the node is declared in the given package.
    pub fn is_in_package(&self, package: &str) -> bool {
        self.name.as_ref().is_some_and(|n| n.package == package)
    }

    /// Comment lines from both the second-closest and the closest block.
    pub fn all_comment_lines(&self) -> impl Iterator<Item = &String> {
        self.second_closest_comment_lines
            .iter()
            .chain(self.comment_lines.iter())
    }
}
