use serde::Deserialize;

/// A package declaration
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDecl {
    /// Import path
    pub path: String,

    /// Name used in the package clause (defaults to the last path segment)
    pub name: Option<String>,

    /// Raw package-level comment lines
    #[serde(default)]
    pub comments: Vec<String>,

    /// Whether code is generated for this package; referenced-only
    /// packages set this to false
    #[serde(default = "default_true")]
    pub input: bool,

    /// Declared types, in declaration order
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// A named type declaration
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDecl {
    pub name: String,

    pub kind: TypeKind,

    /// Comment lines directly above the declaration
    #[serde(default)]
    pub comments: Vec<String>,

    /// Comment lines of the block before the closest one
    #[serde(default)]
    pub second_closest_comments: Vec<String>,

    /// Struct members (struct only)
    #[serde(default)]
    pub members: Vec<MemberDecl>,

    /// Underlying type expression (alias only)
    pub underlying: Option<String>,

    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Struct,
    Interface,
    Alias,
    Unknown,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Alias => "alias",
            TypeKind::Unknown => "unknown",
        }
    }
}

/// A struct member
#[derive(Debug, Clone, Deserialize)]
pub struct MemberDecl {
    pub name: String,

    /// Type expression
    #[serde(rename = "type")]
    pub ty: String,
}

/// A method declaration
#[derive(Debug, Clone, Deserialize)]
pub struct MethodDecl {
    pub name: String,

    #[serde(default)]
    pub receiver: ReceiverKind,

    /// Parameter type expressions
    #[serde(default)]
    pub params: Vec<String>,

    /// Result type expressions
    #[serde(default)]
    pub results: Vec<String>,
}

/// Method receiver kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiverKind {
    #[default]
    Pointer,
    Value,
}

fn default_true() -> bool {
    true
}
