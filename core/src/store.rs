use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::Pokemon;

/// Ordered in-memory collection of catalog entries.
///
/// Iteration order is insertion order. Clones share the same underlying
/// collection, so a store handed to the ingestion task and one held by the
/// HTTP layer observe each other's writes.
#[derive(Debug, Clone, Default)]
pub struct PokemonStore {
    entries: Arc<RwLock<Vec<Pokemon>>>,
}

impl PokemonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Pokemon>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of every entry in store order.
    pub fn list(&self) -> Vec<Pokemon> {
        self.entries.read().clone()
    }

    pub fn get(&self, id: u32) -> Option<Pokemon> {
        self.entries.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn insert(&self, pokemon: Pokemon) {
        self.entries.write().push(pokemon);
    }

    pub fn remove(&self, id: u32) -> Option<Pokemon> {
        let mut entries = self.entries.write();
        let index = entries.iter().position(|p| p.id == id)?;
        Some(entries.remove(index))
    }

    pub fn max_id(&self) -> Option<u32> {
        self.entries.read().iter().map(|p| p.id).max()
    }

    /// Runs `f` against the current entries under a shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&[Pokemon]) -> R) -> R {
        f(&self.entries.read())
    }

    /// Runs `f` under the exclusive lock. Check-then-write sequences go
    /// through here so they cannot interleave with other writers.
    pub fn write<R>(&self, f: impl FnOnce(&mut Vec<Pokemon>) -> R) -> R {
        f(&mut self.entries.write())
    }
}
