//! Configuration errors raised while resolving directives.
//!
//! Every variant is fatal: a run that hits one produces no output. Each
//! names the owning package or type and the directive text at fault.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConfigError {
    #[error("{owner}: found {count} '+{tag}' directives: {values:?}")]
    #[diagnostic(
        code(copygen::duplicate_directive),
        help("keep a single '+{tag}=...' line per comment block")
    )]
    DuplicateDirective {
        owner: String,
        tag: String,
        count: usize,
        values: Vec<String>,
    },

    #[error("{owner}: unsupported '+{tag}' option '{option}'")]
    #[diagnostic(
        code(copygen::unsupported_option),
        help("the only supported option is 'register' (e.g. '+{tag}=package,register')")
    )]
    UnsupportedOption {
        owner: String,
        tag: String,
        option: String,
    },

    #[error("{owner}: unsupported '+{tag}' value '{value}'")]
    #[diagnostic(code(copygen::unsupported_value), help("expected {expected}"))]
    UnsupportedValue {
        owner: String,
        tag: String,
        value: String,
        expected: &'static str,
    },

    #[error("{owner}: contradicting '+{tag}' value '{value}' found after previous value {previous}")]
    #[diagnostic(code(copygen::contradicting_receiver))]
    ContradictingReceiver {
        owner: String,
        tag: String,
        value: String,
        previous: bool,
    },

    #[error("type {owner} has '+{tag}=true' but is not copyable")]
    #[diagnostic(
        code(copygen::not_copyable),
        help("only exported struct types can be copied")
    )]
    NotCopyable { owner: String, tag: String },

    #[error("unknown type '{name}' in '+{tag}' tag of type {owner}")]
    #[diagnostic(
        code(copygen::unknown_interface),
        help("interface names are fully qualified, e.g. 'example.com/app/api.Object'")
    )]
    UnknownInterface {
        owner: String,
        tag: String,
        name: String,
    },

    #[error("type '{name}' in '+{tag}' tag of type {owner} is not an interface, but: {kind}")]
    #[diagnostic(code(copygen::not_an_interface))]
    NotAnInterface {
        owner: String,
        tag: String,
        name: String,
        kind: String,
    },

    #[error("interface '{name}' in '+{tag}' tag of type {owner} has no DeepCopy method name")]
    #[diagnostic(
        code(copygen::unnamed_interface),
        help("adapters are named DeepCopy<Name>; declare a named interface in a package instead")
    )]
    UnnamedInterface {
        owner: String,
        tag: String,
        name: String,
    },
}
