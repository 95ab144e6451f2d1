//! The type universe: an arena of type nodes plus the packages declaring them.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{Shape, Signature, TypeName, TypeNode};

/// Index of a node in a [`Universe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(usize);

impl TypeId {
    /// The raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A package in the universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Import path.
    pub path: String,
    /// Name used in the package clause.
    pub name: String,
    /// Raw package-level comment lines.
    pub comment_lines: Vec<String>,
    /// Declared types, in declaration order.
    pub types: Vec<TypeId>,
    /// Whether generation was requested for this package. Packages that are
    /// only referenced (e.g. to resolve interface names) are not inputs.
    pub input: bool,
}

impl Package {
    /// Create an input package named after the last segment of its path.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = default_package_name(&path);
        Self {
            path,
            name,
            comment_lines: Vec::new(),
            types: Vec::new(),
            input: true,
        }
    }
}

/// Derive a package clause name from an import path.
///
/// Uses the last path segment up to its first `.` (so `gopkg.in/yaml.v2`
/// becomes `yaml`).
pub fn default_package_name(path: &str) -> String {
    let base = path.rsplit('/').next().unwrap_or(path);
    base.split('.').next().unwrap_or(base).to_string()
}

/// The read-only type graph consumed by code generation.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    nodes: Vec<TypeNode>,
    by_name: HashMap<TypeName, TypeId>,
    packages: IndexMap<String, Package>,
}

impl Universe {
    /// Get a node by id.
    ///
    /// Ids are only handed out by the builder of this universe, so every id
    /// is in bounds.
    pub fn get(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.0]
    }

    /// Look up a named type.
    pub fn lookup(&self, name: &TypeName) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Get a package by import path.
    pub fn package(&self, path: &str) -> Option<&Package> {
        self.packages.get(path)
    }

    /// Iterate over packages in insertion order.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Input packages sorted by import path.
    pub fn input_packages(&self) -> Vec<&Package> {
        let mut inputs: Vec<&Package> = self.packages.values().filter(|p| p.input).collect();
        inputs.sort_by(|a, b| a.path.cmp(&b.path));
        inputs
    }

    /// Number of nodes, including anonymous and builtin ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the universe holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Incremental builder for a [`Universe`].
///
/// Named types are declared before they are defined so that members may
/// refer to types declared later (or to the type itself).
#[derive(Debug, Default)]
pub struct UniverseBuilder {
    universe: Universe,
    anonymous: HashMap<Shape, TypeId>,
}

impl UniverseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a node for a named type, or return the existing one.
    ///
    /// A freshly declared node has an `Unknown` shape until [`define`] runs.
    ///
    /// [`define`]: UniverseBuilder::define
    pub fn declare(&mut self, name: TypeName) -> TypeId {
        if let Some(id) = self.universe.by_name.get(&name) {
            return *id;
        }
        let id = self.push(TypeNode::named(name.clone(), Shape::Unknown));
        self.universe.by_name.insert(name, id);
        id
    }

    /// Declare a builtin primitive.
    pub fn builtin(&mut self, name: &str) -> TypeId {
        let id = self.declare(TypeName::builtin(name));
        self.universe.nodes[id.0].shape = Shape::Primitive;
        id
    }

    /// Intern an anonymous type. Structurally equal shapes share one node.
    pub fn anonymous(&mut self, shape: Shape) -> TypeId {
        if let Some(id) = self.anonymous.get(&shape) {
            return *id;
        }
        let id = self.push(TypeNode::anonymous(shape.clone()));
        self.anonymous.insert(shape, id);
        id
    }

    /// Set the shape of a declared node.
    pub fn define(&mut self, id: TypeId, shape: Shape) {
        self.universe.nodes[id.0].shape = shape;
    }

    /// Add a method to a declared node.
    pub fn add_method(&mut self, id: TypeId, name: impl Into<String>, signature: Signature) {
        self.universe.nodes[id.0]
            .methods
            .insert(name.into(), signature);
    }

    /// Set the comment blocks of a declared node.
    pub fn set_comments(&mut self, id: TypeId, closest: Vec<String>, second_closest: Vec<String>) {
        let node = &mut self.universe.nodes[id.0];
        node.comment_lines = closest;
        node.second_closest_comment_lines = second_closest;
    }

    /// Look up a named type declared so far.
    pub fn lookup(&self, name: &TypeName) -> Option<TypeId> {
        self.universe.lookup(name)
    }

    /// Add a package. A package with the same path is replaced.
    pub fn add_package(&mut self, package: Package) {
        self.universe
            .packages
            .insert(package.path.clone(), package);
    }

    /// Finish building.
    pub fn build(self) -> Universe {
        self.universe
    }

    fn push(&mut self, node: TypeNode) -> TypeId {
        let id = TypeId(self.universe.nodes.len());
        self.universe.nodes.push(node);
        id
    }
}
