//! Shared utility functions for code generation.

/// Go keywords, which cannot be used as identifiers.
const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Turn an arbitrary string into a Go identifier
/// (e.g., "go-yaml" -> "goyaml", "v1.2" -> "v12", "1api" -> "_1api").
pub fn to_go_identifier(s: &str) -> String {
    let mut result: String = s
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    if GO_KEYWORDS.contains(&result.as_str()) {
        result.push('_');
    }
    result
}

/// Check if a string is a Go keyword.
pub fn is_go_keyword(s: &str) -> bool {
    GO_KEYWORDS.contains(&s)
}

/// Check if a string is a valid Go identifier.
pub fn is_go_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_') && !GO_KEYWORDS.contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_go_identifier() {
        assert_eq!(to_go_identifier("api"), "api");
        assert_eq!(to_go_identifier("go-yaml"), "goyaml");
        assert_eq!(to_go_identifier("v1.2"), "v12");
        assert_eq!(to_go_identifier("1api"), "_1api");
        assert_eq!(to_go_identifier("type"), "type_");
        assert_eq!(to_go_identifier(""), "_");
    }

    #[test]
    fn test_is_go_identifier() {
        assert!(is_go_identifier("Config"));
        assert!(is_go_identifier("_x1"));
        assert!(!is_go_identifier("1x"));
        assert!(!is_go_identifier("a-b"));
        assert!(!is_go_identifier("func"));
        assert!(!is_go_identifier(""));
    }

    #[test]
    fn test_is_go_keyword() {
        assert!(is_go_keyword("range"));
        assert!(!is_go_keyword("Range"));
    }
}
