//! Flat id catalogs for registries that carry no per-entry data here
//! (items, biomes, entity types).

use std::collections::HashSet;

/// Namespace used for ids written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Lookup key for a registry name: trimmed, lower-cased, and namespaced.
/// `Stone`, `stone` and `minecraft:stone` share one key.
pub fn name_key(name: &str) -> String {
    let name = name.trim().to_ascii_lowercase();
    if name.contains(':') {
        name
    } else {
        format!("{DEFAULT_NAMESPACE}:{name}")
    }
}

/// An ordered, append-only set of string ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    label: &'static str,
    ids: Vec<String>,
    index: HashSet<String>,
}

impl Catalog {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            ids: Vec::new(),
            index: HashSet::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Add `id`. Returns `false` if it was already present under any
    /// spelling with the same [`name_key`].
    pub fn register(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if !self.index.insert(name_key(&id)) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(&name_key(id))
    }

    /// Ids in registration order, as registered.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for Catalog {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for id in iter {
            self.register(id);
        }
    }
}
