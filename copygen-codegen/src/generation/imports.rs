//! Import tracking for generated files.

use std::collections::HashSet;

use copygen_core::to_go_identifier;
use indexmap::IndexMap;

/// Tracks the packages an output file refers to and assigns each a local
/// name.
///
/// Local names are taken from the last path segment. When two packages end
/// in the same segment, the later one gets progressively more trailing
/// segments joined together (`a/v1` and `b/v1` become `v1` and `bv1`).
/// Assigned names never change once handed out.
///
/// # Example
///
/// ```
/// use copygen_codegen::generation::ImportTracker;
///
/// let mut imports = ImportTracker::new("example.com/app/api");
/// assert_eq!(imports.add("example.com/app/api"), None);
/// assert_eq!(imports.add("example.com/app/iface").as_deref(), Some("iface"));
///
/// let lines = imports.import_lines();
/// assert_eq!(lines, vec!["iface \"example.com/app/iface\""]);
/// ```
#[derive(Debug, Clone)]
pub struct ImportTracker {
    /// Import path of the package the file belongs to
    local_package: String,
    /// Package path -> local name (insertion order)
    imports: IndexMap<String, String>,
    taken: HashSet<String>,
}

impl ImportTracker {
    /// Create a tracker for a file in `local_package`.
    pub fn new(local_package: impl Into<String>) -> Self {
        Self {
            local_package: local_package.into(),
            imports: IndexMap::new(),
            taken: HashSet::new(),
        }
    }

    /// Record a referenced package and return its local name.
    ///
    /// Returns `None` for builtins (empty path) and for the file's own
    /// package, which are referenced unqualified.
    pub fn add(&mut self, package: &str) -> Option<String> {
        if package.is_empty() || package == self.local_package {
            return None;
        }
        if let Some(name) = self.imports.get(package) {
            return Some(name.clone());
        }

        let name = self.unique_name(package);
        tracing::trace!(package, name = %name, "import");
        self.taken.insert(name.clone());
        self.imports.insert(package.to_string(), name.clone());
        Some(name)
    }

    /// Local name of an already recorded package.
    pub fn local_name(&self, package: &str) -> Option<&str> {
        self.imports.get(package).map(String::as_str)
    }

    /// Import lines (`name "path"`), sorted by path.
    pub fn import_lines(&self) -> Vec<String> {
        let mut imports: Vec<(&String, &String)> = self.imports.iter().collect();
        imports.sort_by(|a, b| a.0.cmp(b.0));
        imports
            .into_iter()
            .map(|(path, name)| format!("{} \"{}\"", name, path))
            .collect()
    }

    /// Iterate over `(path, local name)` pairs in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.imports.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// Check if no package has been recorded.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of recorded packages.
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    fn unique_name(&self, package: &str) -> String {
        let segments: Vec<&str> = package.split('/').filter(|s| !s.is_empty()).collect();
        for start in (0..segments.len()).rev() {
            let candidate = to_go_identifier(&segments[start..].concat());
            if !self.taken.contains(&candidate) {
                return candidate;
            }
        }

        // Every suffix is taken: number the full-path name.
        let base = to_go_identifier(&segments.concat());
        (2..)
            .map(|n| format!("{}{}", base, n))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or(base)
    }
}
