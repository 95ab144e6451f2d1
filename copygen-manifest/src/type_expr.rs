//! Go type expressions as written in the universe manifest.

use std::{fmt, str::FromStr};

use copygen_core::is_go_identifier;

/// Predeclared Go types. `error` is the only interface among them.
pub const BUILTIN_TYPES: &[&str] = &[
    "bool",
    "byte",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

/// A reference to a named type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Import path, or `None` for builtins and names local to the
    /// declaring package.
    pub package: Option<String>,
    pub name: String,
}

impl TypeRef {
    /// Returns true if this names a predeclared type.
    pub fn is_builtin(&self) -> bool {
        self.package.is_none() && BUILTIN_TYPES.contains(&self.name.as_str())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{}.{}", package, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named(TypeRef),
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `struct{}`
    EmptyStruct,
    /// `interface{...}` or `any`
    Interface,
    /// Functions, channels and arrays, kept verbatim.
    Opaque(String),
}

impl TypeExpr {
    /// Every named type this expression refers to, outermost first.
    pub fn references(&self) -> Vec<&TypeRef> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references<'a>(&'a self, refs: &mut Vec<&'a TypeRef>) {
        match self {
            TypeExpr::Named(r) => refs.push(r),
            TypeExpr::Pointer(elem) | TypeExpr::Slice(elem) => elem.collect_references(refs),
            TypeExpr::Map { key, value } => {
                key.collect_references(refs);
                value.collect_references(refs);
            }
            TypeExpr::EmptyStruct | TypeExpr::Interface | TypeExpr::Opaque(_) => {}
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(r) => write!(f, "{}", r),
            TypeExpr::Pointer(elem) => write!(f, "*{}", elem),
            TypeExpr::Slice(elem) => write!(f, "[]{}", elem),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::EmptyStruct => f.write_str("struct{}"),
            TypeExpr::Interface => f.write_str("interface{}"),
            TypeExpr::Opaque(text) => f.write_str(text),
        }
    }
}

impl FromStr for TypeExpr {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.trim())
    }
}

fn parse(s: &str) -> Result<TypeExpr, &'static str> {
    if s.is_empty() {
        return Err("type is empty");
    }
    if let Some(rest) = s.strip_prefix('*') {
        return Ok(TypeExpr::Pointer(Box::new(parse(rest.trim_start())?)));
    }
    if let Some(rest) = s.strip_prefix("[]") {
        return Ok(TypeExpr::Slice(Box::new(parse(rest.trim_start())?)));
    }
    if s.starts_with('[') {
        // Fixed-size array; only checked for balance.
        closing_bracket(&s[1..]).ok_or("unbalanced '[' in array type")?;
        return Ok(TypeExpr::Opaque(s.to_string()));
    }
    if let Some(rest) = s.strip_prefix("map[") {
        let close = closing_bracket(rest).ok_or("unbalanced '[' in map type")?;
        let key = parse(rest[..close].trim())?;
        let value = parse(rest[close + 1..].trim())?;
        return Ok(TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        });
    }
    if is_keyword_type(s, "func") || is_keyword_type(s, "chan") || s.starts_with("<-chan") {
        return Ok(TypeExpr::Opaque(s.to_string()));
    }
    if let Some(body) = braced_body(s, "struct") {
        if body.trim().is_empty() {
            return Ok(TypeExpr::EmptyStruct);
        }
        return Err("anonymous structs with members must be declared as named types");
    }
    if s == "any" || braced_body(s, "interface").is_some() {
        return Ok(TypeExpr::Interface);
    }
    parse_named(s).map(TypeExpr::Named)
}

/// Position of the `]` closing a bracket that was opened just before `s`.
fn closing_bracket(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_keyword_type(s: &str, keyword: &str) -> bool {
    s.strip_prefix(keyword)
        .is_some_and(|rest| rest.starts_with(['(', ' ', '<']))
}

fn braced_body<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    s.strip_prefix(keyword)?
        .trim_start()
        .strip_prefix('{')?
        .strip_suffix('}')
}

fn parse_named(s: &str) -> Result<TypeRef, &'static str> {
    let tail_start = s.rfind('/').map(|i| i + 1).unwrap_or(0);
    let (package, name) = match s[tail_start..].rfind('.') {
        Some(dot) => {
            let split = tail_start + dot;
            (Some(&s[..split]), &s[split + 1..])
        }
        None if tail_start > 0 => return Err("qualified names need a '.Name' suffix"),
        None => (None, s),
    };

    if let Some(package) = package {
        let valid_path = !package.is_empty()
            && package
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '~'));
        if !valid_path {
            return Err("invalid package path");
        }
    }
    if !is_go_identifier(name) {
        return Err("type name is not a Go identifier");
    }

    Ok(TypeRef {
        package: package.map(str::to_string),
        name: name.to_string(),
    })
}
