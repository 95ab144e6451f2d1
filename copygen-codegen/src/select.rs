//! Candidate selection.
//!
//! Decides which packages get a generated file and which of their types
//! get copy routines, based on the package and type directives plus the
//! structural rules in [`is_copyable`].

use std::collections::{BTreeMap, HashSet};

use copygen_ir::{Kind, TypeId, TypeName, TypeNode, Universe};
use serde::Serialize;

use crate::{
    directive::{self, Directive},
    error::ConfigError,
};

/// A type confirmed eligible for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: TypeId,
    pub name: TypeName,
    /// Interfaces to emit `DeepCopy<I>` adapters for, deduplicated and
    /// sorted by qualified name.
    pub interfaces: Vec<TypeId>,
    /// Adapters take a value receiver instead of a pointer receiver.
    pub non_pointer_interfaces: bool,
}

/// Everything needed to generate one package's output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePlan {
    /// Import path.
    pub path: String,
    /// Package clause name.
    pub name: String,
    /// Set by `+<tag>=package`.
    pub generate_all: bool,
    /// Set by the `register` option of the package directive.
    pub register: bool,
    /// Candidates in declaration order.
    pub candidates: Vec<Candidate>,
}

/// The outcome of selection over a whole universe.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Plans sorted by package path.
    pub plans: Vec<PackagePlan>,
    /// Package roots whose structs may be copied through `DeepCopyInto`.
    pub bounding_dirs: Vec<String>,
    copyable_in_bounds: HashSet<TypeId>,
}

impl Selection {
    /// Returns true if the type is copyable and declared under one of the
    /// bounding directories, so a generated `DeepCopyInto` can be relied on.
    pub fn is_copyable_in_bounds(&self, id: TypeId) -> bool {
        self.copyable_in_bounds.contains(&id)
    }

    /// Total number of candidates across all plans.
    pub fn candidate_count(&self) -> usize {
        self.plans.iter().map(|p| p.candidates.len()).sum()
    }

    /// Serializable overview of the selection.
    pub fn summary(&self, universe: &Universe) -> SelectionSummary {
        SelectionSummary {
            bounding_dirs: self.bounding_dirs.clone(),
            packages: self
                .plans
                .iter()
                .map(|plan| PackageSummary {
                    path: plan.path.clone(),
                    name: plan.name.clone(),
                    generate_all: plan.generate_all,
                    register: plan.register,
                    types: plan
                        .candidates
                        .iter()
                        .map(|c| TypeSummary {
                            name: c.name.name.clone(),
                            interfaces: c
                                .interfaces
                                .iter()
                                .filter_map(|id| universe.get(*id).name.as_ref())
                                .map(ToString::to_string)
                                .collect(),
                            non_pointer_interfaces: c.non_pointer_interfaces,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// JSON-friendly view of a [`Selection`].
#[derive(Debug, Clone, Serialize)]
pub struct SelectionSummary {
    pub bounding_dirs: Vec<String>,
    pub packages: Vec<PackageSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PackageSummary {
    pub path: String,
    pub name: String,
    pub generate_all: bool,
    pub register: bool,
    pub types: Vec<TypeSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub interfaces: Vec<String>,
    pub non_pointer_interfaces: bool,
}

/// Select the packages and types to generate for.
///
/// `bounding_dirs` defaults to the input packages when empty. Trailing
/// slashes are ignored.
///
/// # Errors
///
/// Returns the first configuration error found. Packages are visited in
/// path order, so the error reported for a given universe is stable.
pub fn select(
    universe: &Universe,
    tag: &str,
    bounding_dirs: &[String],
) -> Result<Selection, ConfigError> {
    let inputs = universe.input_packages();

    let bounding_dirs: Vec<String> = if bounding_dirs.is_empty() {
        inputs.iter().map(|p| p.path.clone()).collect()
    } else {
        bounding_dirs
            .iter()
            .map(|d| d.trim_end_matches('/').to_string())
            .collect()
    };

    let mut copyable_in_bounds = HashSet::new();
    for package in universe.packages() {
        if !is_rooted_under(&package.path, &bounding_dirs) {
            continue;
        }
        for id in &package.types {
            let node = universe.get(*id);
            if is_copyable(node, type_directive(tag, node)?.as_ref()) {
                copyable_in_bounds.insert(*id);
            }
        }
    }

    let mut plans = Vec::new();
    for package in inputs {
        tracing::debug!(package = %package.path, "considering package");

        let package_directive = directive::resolve(tag, &package.path, &package.comment_lines)?;
        if let Some(d) = &package_directive
            && !d.is_package()
        {
            return Err(ConfigError::UnsupportedValue {
                owner: format!("package {}", package.path),
                tag: tag.to_string(),
                value: d.value.clone(),
                expected: "'package'",
            });
        }
        let generate_all = package_directive.is_some();
        let register = package_directive.as_ref().is_some_and(|d| d.register);

        // Without a package directive, one opt-in type is enough to give the
        // package an output file.
        let mut needed = generate_all;
        if !generate_all {
            for id in &package.types {
                let node = universe.get(*id);
                let directive = type_directive(tag, node)?;
                if directive.as_ref().is_some_and(Directive::is_opt_in) {
                    if !is_copyable(node, directive.as_ref()) {
                        return Err(ConfigError::NotCopyable {
                            owner: owner_name(node),
                            tag: tag.to_string(),
                        });
                    }
                    needed = true;
                }
            }
        }
        if !needed {
            tracing::debug!(package = %package.path, "no directives, skipping");
            continue;
        }

        let mut candidates = Vec::new();
        for id in &package.types {
            let node = universe.get(*id);
            let directive = type_directive(tag, node)?;
            let enabled = generate_all || directive.as_ref().is_some_and(Directive::is_opt_in);
            if !enabled {
                continue;
            }
            if !is_copyable(node, directive.as_ref()) {
                tracing::debug!(ty = %owner_name(node), "type is not copyable");
                continue;
            }
            if !needs_generation(node, directive.as_ref(), generate_all, tag)? {
                continue;
            }
            candidates.push(candidate(universe, tag, *id)?);
        }

        tracing::debug!(
            package = %package.path,
            generate_all,
            register,
            candidates = candidates.len(),
            "package needs generation"
        );
        plans.push(PackagePlan {
            path: package.path.clone(),
            name: package.name.clone(),
            generate_all,
            register,
            candidates,
        });
    }

    Ok(Selection {
        plans,
        bounding_dirs,
        copyable_in_bounds,
    })
}

/// Structural eligibility.
///
/// An explicit opt-out wins over everything. Otherwise the type must be an
/// exported struct.
pub fn is_copyable(node: &TypeNode, directive: Option<&Directive>) -> bool {
    if directive.is_some_and(Directive::is_opt_out) {
        return false;
    }
    if node.kind() != Kind::Struct {
        return false;
    }
    node.name.as_ref().is_some_and(TypeName::is_exported)
}

/// Whether a copyable type gets routines in its package's mode.
///
/// # Errors
///
/// Fails when the type directive has a value other than `true` or `false`.
pub fn needs_generation(
    node: &TypeNode,
    directive: Option<&Directive>,
    all_types: bool,
    tag: &str,
) -> Result<bool, ConfigError> {
    let value = directive.map(|d| d.value.as_str()).unwrap_or_default();
    if directive.is_some()
        && value != directive::ENABLED_VALUE
        && value != directive::DISABLED_VALUE
    {
        return Err(ConfigError::UnsupportedValue {
            owner: format!("type {}", owner_name(node)),
            tag: tag.to_string(),
            value: value.to_string(),
            expected: "'true' or 'false'",
        });
    }
    if all_types && value == directive::DISABLED_VALUE {
        tracing::debug!(ty = %owner_name(node), "type opted out");
        return Ok(false);
    }
    if !all_types && value != directive::ENABLED_VALUE {
        tracing::debug!(ty = %owner_name(node), "type did not opt in");
        return Ok(false);
    }
    Ok(true)
}

/// Returns true if `package` is one of `roots` or lives below one.
///
/// Matching is by whole path segments: `foo/barn` is not under `foo/bar`.
pub fn is_rooted_under(package: &str, roots: &[String]) -> bool {
    let package = format!("{}/", package);
    roots
        .iter()
        .any(|root| package.starts_with(&format!("{}/", root)))
}

fn type_directive(tag: &str, node: &TypeNode) -> Result<Option<Directive>, ConfigError> {
    directive::resolve(tag, &owner_name(node), &node.comment_lines)
}

fn candidate(universe: &Universe, tag: &str, id: TypeId) -> Result<Candidate, ConfigError> {
    let node = universe.get(id);
    let owner = owner_name(node);

    // Keyed by qualified name for deduplication and a stable order.
    let mut interfaces: BTreeMap<String, TypeId> = BTreeMap::new();
    for raw in directive::extract_interfaces(tag, node.all_comment_lines()) {
        let name = TypeName::parse_qualified(&raw);
        let interface_tag = format!("{}:interfaces", tag);
        let Some(interface) = universe.lookup(&name) else {
            return Err(ConfigError::UnknownInterface {
                owner: owner.clone(),
                tag: interface_tag,
                name: raw,
            });
        };
        let kind = universe.get(interface).kind();
        if kind != Kind::Interface {
            return Err(ConfigError::NotAnInterface {
                owner: owner.clone(),
                tag: interface_tag,
                name: raw,
                kind: kind.to_string(),
            });
        }
        if name.is_builtin() {
            return Err(ConfigError::UnnamedInterface {
                owner: owner.clone(),
                tag: interface_tag,
                name: raw,
            });
        }
        interfaces.insert(name.to_string(), interface);
    }
    let non_pointer_interfaces =
        directive::extract_non_pointer_interfaces(tag, &owner, node.all_comment_lines())?;

    tracing::debug!(
        ty = %owner,
        interfaces = interfaces.len(),
        non_pointer_interfaces,
        "selected"
    );
    Ok(Candidate {
        id,
        name: node.name.clone().unwrap_or_else(|| TypeName::builtin("")),
        interfaces: interfaces.into_values().collect(),
        non_pointer_interfaces,
    })
}

fn owner_name(node: &TypeNode) -> String {
    node.name
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "<anonymous>".to_string())
}
