//! Comment directives.
//!
//! Directives are comment lines of the form `+<tag>=<value>[,<option>...]`.
//! Three tags are recognized, all derived from one base tag
//! (`k8s:deepcopy-gen` by default):
//!
//! | Tag | Where | Meaning |
//! |-----|-------|---------|
//! | `+<tag>=package[,register]` | package | generate for every eligible type |
//! | `+<tag>=true\|false[,register]` | type | opt in or out |
//! | `+<tag>:interfaces=a/b.I,...` | type | emit `DeepCopy<I>` adapters |
//! | `+<tag>:nonpointer-interfaces=true` | type | adapters use a value receiver |

use indexmap::IndexMap;

use crate::error::ConfigError;

/// Prefix marking a directive line.
pub const MARKER: &str = "+";

/// Primary directive value selecting whole-package generation.
pub const PACKAGE_VALUE: &str = "package";

/// Primary directive value opting a type in.
pub const ENABLED_VALUE: &str = "true";

/// Primary directive value opting a type out.
pub const DISABLED_VALUE: &str = "false";

const REGISTER_OPTION: &str = "register";
const INTERFACES_SUFFIX: &str = ":interfaces";
const NON_POINTER_SUFFIX: &str = ":nonpointer-interfaces";

/// Collect `+key=value` lines, grouped by key in first-seen order.
///
/// Lines are trimmed before matching. A line without `=` yields an empty
/// value. Values for a repeated key are kept in order.
///
/// ```
/// use copygen_codegen::directive::comment_tags;
///
/// let tags = comment_tags("+", ["  +a=1", "plain text", "+b", "+a=2"]);
/// assert_eq!(tags["a"], vec!["1", "2"]);
/// assert_eq!(tags["b"], vec![""]);
/// ```
pub fn comment_tags<I, S>(marker: &str, lines: I) -> IndexMap<String, Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: IndexMap<String, Vec<String>> = IndexMap::new();
    for line in lines {
        let Some(body) = line.as_ref().trim().strip_prefix(marker) else {
            continue;
        };
        let (key, value) = body.split_once('=').unwrap_or((body, ""));
        tags.entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }
    tags
}

/// A parsed primary directive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directive {
    /// First comma-separated segment (`package`, `true`, `false`, ...).
    pub value: String,
    /// Whether the `register` option was given and not set to `false`.
    pub register: bool,
}

impl Directive {
    /// `+<tag>=package`
    pub fn is_package(&self) -> bool {
        self.value == PACKAGE_VALUE
    }

    /// `+<tag>=true`
    pub fn is_opt_in(&self) -> bool {
        self.value == ENABLED_VALUE
    }

    /// `+<tag>=false`
    pub fn is_opt_out(&self) -> bool {
        self.value == DISABLED_VALUE
    }
}

/// Resolve the primary directive from a comment block.
///
/// `owner` names the package or type the block belongs to and only appears
/// in errors.
///
/// # Errors
///
/// Fails when the tag occurs more than once or carries an option other than
/// `register`.
pub fn resolve<S: AsRef<str>>(
    tag: &str,
    owner: &str,
    lines: &[S],
) -> Result<Option<Directive>, ConfigError> {
    let mut tags = comment_tags(MARKER, lines);
    let Some(values) = tags.swap_remove(tag) else {
        return Ok(None);
    };
    if values.len() > 1 {
        return Err(ConfigError::DuplicateDirective {
            owner: owner.to_string(),
            tag: tag.to_string(),
            count: values.len(),
            values,
        });
    }

    let raw = values.into_iter().next().unwrap_or_default();
    let mut segments = raw.split(',');
    let value = segments.next().unwrap_or_default().to_string();

    let mut register = false;
    for option in segments {
        let (key, option_value) = match option.split_once('=') {
            Some((key, v)) => (key, Some(v)),
            None => (option, None),
        };
        if key != REGISTER_OPTION {
            return Err(ConfigError::UnsupportedOption {
                owner: owner.to_string(),
                tag: tag.to_string(),
                option: option.to_string(),
            });
        }
        register = option_value != Some(DISABLED_VALUE);
    }

    Ok(Some(Directive { value, register }))
}

/// Interface names listed by every `+<tag>:interfaces=` line.
///
/// Entries are split on commas and empty entries are dropped. Order and
/// duplicates are kept.
pub fn extract_interfaces<I, S>(tag: &str, lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let key = format!("{}{}", tag, INTERFACES_SUFFIX);
    comment_tags(MARKER, lines)
        .swap_remove(&key)
        .unwrap_or_default()
        .iter()
        .flat_map(|value| value.split(','))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether interface adapters use a value receiver.
///
/// The first `+<tag>:nonpointer-interfaces=` line decides. Later lines may
/// repeat it but must not contradict it.
pub fn extract_non_pointer_interfaces<I, S>(
    tag: &str,
    owner: &str,
    lines: I,
) -> Result<bool, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let key = format!("{}{}", tag, NON_POINTER_SUFFIX);
    let values = comment_tags(MARKER, lines)
        .swap_remove(&key)
        .unwrap_or_default();

    let mut decided: Option<bool> = None;
    for value in values {
        let current = value == ENABLED_VALUE;
        match decided {
            None => decided = Some(current),
            Some(previous) if previous != current => {
                return Err(ConfigError::ContradictingReceiver {
                    owner: owner.to_string(),
                    tag: key,
                    value,
                    previous,
                });
            }
            Some(_) => {}
        }
    }
    Ok(decided.unwrap_or(false))
}
