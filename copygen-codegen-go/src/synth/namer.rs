//! Go spelling of type references.

use copygen_ir::{Shape, TypeId, TypeName};

use super::Session;

impl Session<'_> {
    /// The Go expression for `id` as seen from the package being generated.
    ///
    /// Every package the expression mentions is recorded as an import, so
    /// only call this for text that ends up in code.
    pub(crate) fn type_ref(&mut self, id: TypeId) -> String {
        let universe = self.universe;
        let node = universe.get(id);
        if let Some(name) = &node.name {
            return match self.imports.add(&name.package) {
                Some(local) => format!("{}.{}", local, name.name),
                None => name.name.clone(),
            };
        }
        match &node.shape {
            Shape::Pointer { elem } => format!("*{}", self.type_ref(*elem)),
            Shape::Slice { elem } => format!("[]{}", self.type_ref(*elem)),
            Shape::Map { key, elem } => {
                let key = self.type_ref(*key);
                format!("map[{}]{}", key, self.type_ref(*elem))
            }
            Shape::Struct { members } => {
                let fields: Vec<String> = members
                    .iter()
                    .map(|m| format!("{} {}", m.name, self.type_ref(m.ty)))
                    .collect();
                anonymous_struct(&fields)
            }
            Shape::Interface => "interface{}".to_string(),
            Shape::Alias { underlying } => self.type_ref(*underlying),
            Shape::Primitive | Shape::Unknown => "invalid".to_string(),
        }
    }

    /// A fully qualified spelling of `id` for comments and diagnostics.
    ///
    /// Records no imports.
    pub(crate) fn describe(&self, id: TypeId) -> String {
        let node = self.universe.get(id);
        if let Some(name) = &node.name {
            return qualified(name);
        }
        match &node.shape {
            Shape::Pointer { elem } => format!("*{}", self.describe(*elem)),
            Shape::Slice { elem } => format!("[]{}", self.describe(*elem)),
            Shape::Map { key, elem } => {
                format!("map[{}]{}", self.describe(*key), self.describe(*elem))
            }
            Shape::Struct { members } => {
                let fields: Vec<String> = members
                    .iter()
                    .map(|m| format!("{} {}", m.name, self.describe(m.ty)))
                    .collect();
                anonymous_struct(&fields)
            }
            Shape::Interface => "interface{}".to_string(),
            Shape::Alias { underlying } => self.describe(*underlying),
            Shape::Primitive | Shape::Unknown => "invalid".to_string(),
        }
    }

    /// The interface name used in `DeepCopy<Name>` calls.
    ///
    /// Anonymous and builtin interfaces have none.
    pub(crate) fn interface_method(&self, id: TypeId) -> Option<String> {
        self.universe
            .get(id)
            .name
            .as_ref()
            .filter(|name| !name.is_builtin())
            .map(|name| format!("DeepCopy{}", name.name))
    }
}

fn qualified(name: &TypeName) -> String {
    if name.is_builtin() {
        name.name.clone()
    } else {
        format!("{}.{}", name.package, name.name)
    }
}

fn anonymous_struct(fields: &[String]) -> String {
    if fields.is_empty() {
        "struct{}".to_string()
    } else {
        format!("struct{{ {} }}", fields.join("; "))
    }
}
