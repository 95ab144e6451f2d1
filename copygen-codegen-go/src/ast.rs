//! Minimal Go declarations used by the synthesizer.

use copygen_codegen::builder::{CodeFragment, Renderable};

/// A Go function or method declaration.
///
/// # Example
///
/// ```
/// use copygen_codegen::builder::{CodeBuilder, CodeFragment};
/// use copygen_codegen_go::Func;
///
/// let func = Func::method("in *Config", "DeepCopy")
///     .returns("*Config")
///     .body(vec![CodeFragment::line("return nil")]);
///
/// let mut builder = CodeBuilder::go();
/// builder.emit(&func);
/// assert_eq!(
///     builder.build(),
///     "func (in *Config) DeepCopy() *Config {\n\treturn nil\n}\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    doc: Vec<String>,
    receiver: Option<String>,
    name: String,
    params: Vec<String>,
    result: Option<String>,
    body: Vec<CodeFragment>,
}

impl Func {
    /// A free function.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            doc: Vec::new(),
            receiver: None,
            name: name.into(),
            params: Vec::new(),
            result: None,
            body: Vec::new(),
        }
    }

    /// A method on `receiver` (e.g. `in *Config`).
    pub fn method(receiver: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            receiver: Some(receiver.into()),
            ..Self::new(name)
        }
    }

    /// Add a doc comment line.
    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }

    /// Add a parameter (e.g. `out *Config`).
    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Set the result type.
    pub fn returns(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Replace the body.
    pub fn body(mut self, body: Vec<CodeFragment>) -> Self {
        self.body = body;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn header(&self) -> String {
        let mut header = String::from("func ");
        if let Some(receiver) = &self.receiver {
            header.push_str(&format!("({}) ", receiver));
        }
        header.push_str(&format!("{}({})", self.name, self.params.join(", ")));
        if let Some(result) = &self.result {
            header.push(' ');
            header.push_str(result);
        }
        header
    }
}

impl Renderable for Func {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> =
            self.doc.iter().map(CodeFragment::comment).collect();
        fragments.push(CodeFragment::braced(self.header(), self.body.clone()));
        fragments
    }
}

/// `if <cond> { then } else { otherwise }` in gofmt layout.
pub(crate) fn if_else(
    condition: &str,
    then: Vec<CodeFragment>,
    otherwise: Vec<CodeFragment>,
) -> CodeFragment {
    CodeFragment::sequence(vec![
        CodeFragment::block(format!("if {} {{", condition), then, None),
        CodeFragment::block("} else {", otherwise, Some("}".to_string())),
    ])
}

#[cfg(test)]
mod tests {
    use copygen_codegen::builder::CodeBuilder;

    use super::*;

    fn render(node: &impl Renderable) -> String {
        let mut builder = CodeBuilder::go();
        builder.emit(node);
        builder.build()
    }

    #[test]
    fn test_free_function_with_params_and_doc() {
        let func = Func::new("Register")
            .doc("Register does things.")
            .param("a int")
            .param("b string");
        assert_eq!(
            render(&func),
            "// Register does things.\nfunc Register(a int, b string) {\n}\n"
        );
    }

    #[test]
    fn test_if_else_layout() {
        let fragment = if_else(
            "val == nil",
            vec![CodeFragment::line("x = nil")],
            vec![CodeFragment::line("x = val")],
        );
        let mut builder = CodeBuilder::go();
        builder.apply_fragment(fragment);
        assert_eq!(
            builder.build(),
            "if val == nil {\n\tx = nil\n} else {\n\tx = val\n}\n"
        );
    }
}
