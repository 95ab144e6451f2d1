//! Core type definitions.

use std::fmt;

use serde::Serialize;

use crate::{Member, TypeId};

/// A package-qualified type name.
///
/// Builtin types (`string`, `int64`, ...) have an empty package.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TypeName {
    /// Import path of the declaring package.
    pub package: String,
    /// Local name within the package.
    pub name: String,
}

impl TypeName {
    /// Create a new qualified name.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Create a builtin name (no package).
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::new("", name)
    }

    /// Parse a fully-qualified name such as `example.com/app/api.Cloneable`.
    ///
    /// The package is everything before the last `.` that follows the last
    /// `/`, so dotted hosts in import paths are kept intact.
    pub fn parse_qualified(s: &str) -> Self {
        let tail_start = s.rfind('/').map(|i| i + 1).unwrap_or(0);
        match s[tail_start..].rfind('.') {
            Some(dot) => {
                let split = tail_start + dot;
                Self::new(&s[..split], &s[split + 1..])
            }
            None => Self::builtin(s),
        }
    }

    /// Returns true for builtin names.
    pub fn is_builtin(&self) -> bool {
        self.package.is_empty()
    }

    /// Returns true if the name is visible outside its package.
    ///
    /// Follows the Go convention: exported names start with an upper-case
    /// letter.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

/// The structural category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Primitive,
    Pointer,
    Slice,
    Map,
    Struct,
    Interface,
    Alias,
    Unknown,
}

impl Kind {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Primitive => "primitive",
            Kind::Pointer => "pointer",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Struct => "struct",
            Kind::Interface => "interface",
            Kind::Alias => "alias",
            Kind::Unknown => "unknown",
        }
    }

    /// Returns true for kinds whose values share storage when assigned.
    pub fn is_reference(&self) -> bool {
        matches!(self, Kind::Pointer | Kind::Slice | Kind::Map)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shape of a type: its kind plus the data that kind carries.
///
/// The variant alone decides whether a type has an element, a key or
/// members, so a node can never carry data its kind does not use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Builtin value type (`string`, `int`, `bool`, ...).
    Primitive,
    /// `*Elem`
    Pointer { elem: TypeId },
    /// `[]Elem`
    Slice { elem: TypeId },
    /// `map[Key]Elem`
    Map { key: TypeId, elem: TypeId },
    /// Struct with ordered members.
    Struct { members: Vec<Member> },
    /// Dynamically typed value.
    Interface,
    /// Named type over another shape (`type Phase string`).
    Alias { underlying: TypeId },
    /// Anything else (functions, channels, ...).
    Unknown,
}

impl Shape {
    /// The kind of this shape.
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Primitive => Kind::Primitive,
            Shape::Pointer { .. } => Kind::Pointer,
            Shape::Slice { .. } => Kind::Slice,
            Shape::Map { .. } => Kind::Map,
            Shape::Struct { .. } => Kind::Struct,
            Shape::Interface => Kind::Interface,
            Shape::Alias { .. } => Kind::Alias,
            Shape::Unknown => Kind::Unknown,
        }
    }

    /// Struct members, empty for every other shape.
    pub fn members(&self) -> &[Member] {
        match self {
            Shape::Struct { members } => members,
            _ => &[],
        }
    }
}
