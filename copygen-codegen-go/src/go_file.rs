//! Structured Go source files.
//!
//! Provides a high-level API for generating a Go file with build
//! constraints, a header, a package clause, imports and body content.

use copygen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};
use copygen_core::GENERATED_HEADER;

/// A structured representation of a generated Go file.
///
/// # Example
///
/// ```
/// use copygen_codegen_go::{Func, GoFile};
///
/// let content = GoFile::new("api")
///     .build_tag("ignore_autogenerated")
///     .add(Func::new("Noop"))
///     .render();
///
/// assert!(content.starts_with("//go:build !ignore_autogenerated\n"));
/// assert!(content.contains("package api\n"));
/// assert!(content.ends_with("func Noop() {\n}\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GoFile {
    package: String,
    build_tag: Option<String>,
    boilerplate: Option<String>,
    imports: Vec<String>,
    body: Vec<Vec<CodeFragment>>,
}

impl GoFile {
    /// Create an empty file for package `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Exclude the file from builds that set `tag`.
    pub fn build_tag(mut self, tag: impl Into<String>) -> Self {
        self.build_tag = Some(tag.into());
        self
    }

    /// Text placed above the generated-code header, usually a license.
    pub fn boilerplate(mut self, text: impl Into<String>) -> Self {
        self.boilerplate = Some(text.into());
        self
    }

    /// Import lines in `name "path"` form.
    pub fn imports(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.imports.extend(lines);
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add multiple body elements.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    /// Check if the file has no body.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Render the file with tab indentation.
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new(Indent::GO);

        if let Some(tag) = &self.build_tag {
            builder
                .push_line(&format!("//go:build !{}", tag))
                .push_line(&format!("// +build !{}", tag))
                .push_blank();
        }

        if let Some(text) = self.boilerplate.as_deref().map(str::trim_end)
            && !text.is_empty()
        {
            for line in text.lines() {
                builder.push_line(line);
            }
            builder.push_blank();
        }

        builder
            .push_line(GENERATED_HEADER)
            .push_blank()
            .push_line(&format!("package {}", self.package));

        if !self.imports.is_empty() {
            builder.push_blank().push_line("import (").push_indent();
            for import in &self.imports {
                builder.push_line(import);
            }
            builder.push_dedent().push_line(")");
        }

        for fragments in &self.body {
            builder.push_blank();
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }
}
