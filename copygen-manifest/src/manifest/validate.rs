//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use copygen_core::{is_go_identifier, is_go_keyword};
use miette::SourceSpan;

use crate::{Result, TypeExpr, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the manifest hierarchy, making it easier to pass validation
/// context through nested declarations.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "universe.toml");
/// let nested = ctx.push("example.com/app/api").push("Config");
/// nested.validate_name("Spec", "member")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["example.com/app/api", "Config"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "member in 'example.com/app/api.Config'" or just "type".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a quoted string value in the source.
    pub fn find_span(&self, text: &str) -> Option<SourceSpan> {
        find_quoted_span(self.source.src(), text, 0)
    }

    /// Find the span of the `nth` (zero-based) occurrence of a quoted value.
    pub fn find_nth_span(&self, text: &str, nth: usize) -> Option<SourceSpan> {
        find_quoted_span(self.source.src(), text, nth)
    }

    /// Validate that a name is a valid Go identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_go_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }

    /// Parse a type expression, reporting failures against its position.
    pub fn parse_type(&self, expr: &str, kind: &str) -> Result<TypeExpr> {
        expr.parse().map_err(|reason| {
            self.source.invalid_type_error(
                expr,
                self.context_for(kind),
                reason,
                self.find_span(expr),
            )
        })
    }
}

/// Find the span of the text between the quotes of `"text"` or `'text'`.
pub(crate) fn find_quoted_span(src: &str, text: &str, nth: usize) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{text}{quote}");
        if let Some((pos, _)) = src.match_indices(&pattern).nth(nth) {
            return Some(SourceSpan::from((pos + 1, text.len())));
        }
    }
    None
}

/// Validate that a name is a valid Go identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name cannot be empty");
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Some("name must start with a letter or underscore");
    }
    if !is_go_identifier(name) {
        return Some("name must contain only letters, digits and underscores");
    }
    None
}
