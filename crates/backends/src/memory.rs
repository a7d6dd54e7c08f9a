//! In-memory backend
//!
//! A concurrent map keyed by string, holding the tagged value directly.
//! Supports every value kind, never fails to construct, and is therefore
//! the terminal entry of the automatic-resolution fallback chain.
//!
//! DashMap gives lock-free reads and sharded writes; no external locking
//! is needed for concurrent callers.

use dashmap::DashMap;
use kvcache_core::{CacheBackend, CacheResult, Value, ValueKind};

/// Map-backed cache; nothing persists beyond the process
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: DashMap<String, Value>,
}

impl MemoryBackend {
    /// Provider identity string
    pub const PROVIDER: &'static str = "memory";

    /// Create an empty in-memory backend; cannot fail
    pub fn new() -> Self {
        MemoryBackend {
            entries: DashMap::new(),
        }
    }

    /// Number of live entries (test and diagnostics aid)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheBackend for MemoryBackend {
    fn provider(&self) -> &'static str {
        Self::PROVIDER
    }

    fn put(&self, key: &str, value: Value) -> CacheResult<()> {
        if value.is_null() {
            return self.remove(key);
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str, kind: ValueKind) -> Option<Value> {
        let entry = self.entries.get(key)?;
        if entry.value().kind() == Some(kind) {
            Some(entry.value().clone())
        } else {
            None
        }
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> CacheResult<()> {
        self.entries.clear();
        Ok(())
    }
}
