//! Per-environment function tables
//!
//! Each table guards its own map with a read-write lock so lookups in one
//! environment never serialize against defines in another. The registry
//! holds one table for the root environment plus one per named environment.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard};

use super::function::FunctionMetadata;

/// Concurrency-safe mapping from function name to metadata.
pub struct FunctionTable {
    entries: RwLock<HashMap<String, FunctionMetadata>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store metadata under its name, returning any displaced entry.
    pub fn insert(&self, meta: FunctionMetadata) -> Option<FunctionMetadata> {
        self.entries
            .write()
            .unwrap()
            .insert(meta.name().to_string(), meta)
    }

    pub fn get(&self, name: &str) -> Option<FunctionMetadata> {
        self.entries.read().unwrap().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().unwrap().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    /// Read guard over the raw map, for merged-view computation spanning
    /// two tables. Lock order is root first, then the environment table.
    pub(crate) fn read_guard(&self) -> RwLockReadGuard<'_, HashMap<String, FunctionMetadata>> {
        self.entries.read().unwrap()
    }
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::new()
    }
}
