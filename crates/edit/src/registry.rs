//! Additive, concurrent registries keyed by [`Identifier`].
//!
//! Entries are only ever added. Once an identifier maps to a value, that
//! value is what every later lookup sees.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::error::{EditError, Result};
use crate::identifier::Identifier;

pub struct NamespacedRegistry<T> {
    name: &'static str,
    entries: DashMap<Identifier, Arc<T>>,
}

impl<T> NamespacedRegistry<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: DashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, id: &Identifier) -> Option<Arc<T>> {
        self.entries.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Parse `id` and look it up. Malformed ids are simply absent.
    pub fn get_str(&self, id: &str) -> Option<Arc<T>> {
        Identifier::parse(id).ok().and_then(|id| self.get(&id))
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.entries.contains_key(id)
    }

    /// Add a new entry. Fails if `id` is already taken; the existing entry
    /// is left untouched.
    pub fn register(&self, id: Identifier, value: T) -> Result<Arc<T>> {
        match self.entries.entry(id) {
            Entry::Occupied(entry) => {
                tracing::debug!("Refusing to replace {} '{}'", self.name, entry.key());
                Err(EditError::DuplicateEntry {
                    registry: self.name,
                    id: entry.key().to_string(),
                })
            }
            Entry::Vacant(entry) => {
                let value = Arc::new(value);
                entry.insert(Arc::clone(&value));
                Ok(value)
            }
        }
    }

    /// Return the entry for `id`, creating it with `create` if absent.
    ///
    /// The flag is `true` when this call created the entry. Concurrent
    /// callers for the same id all observe the single published value.
    /// `create` runs under the shard lock and must not touch this registry.
    pub fn get_or_register_with(&self, id: Identifier, create: impl FnOnce() -> T) -> (Arc<T>, bool) {
        match self.entries.entry(id) {
            Entry::Occupied(entry) => (Arc::clone(entry.get()), false),
            Entry::Vacant(entry) => {
                let value = Arc::new(create());
                entry.insert(Arc::clone(&value));
                (value, true)
            }
        }
    }

    /// Snapshot of every key, sorted.
    pub fn keys(&self) -> Vec<Identifier> {
        let mut keys: Vec<Identifier> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn values(&self) -> Vec<Arc<T>> {
        self.entries.iter().map(|e| Arc::clone(e.value())).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> std::fmt::Debug for NamespacedRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespacedRegistry")
            .field("name", &self.name)
            .field("len", &self.entries.len())
            .finish()
    }
}
