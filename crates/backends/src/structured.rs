//! Structured-preference backend
//!
//! Wraps a native typed store (redb) with full support for every value
//! kind, including bytes and structured records. Values are stored
//! bincode-encoded under the literal key; the engine owns the on-disk
//! layout.
//!
//! Construction opens (or creates) the database file and fails if the
//! engine cannot initialize. That failure propagates to the resolver:
//! the caller decides whether to fall back, never this module.

use kvcache_core::{CacheBackend, CacheError, CacheResult, Value, ValueKind};
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use tracing::warn;

const ENTRIES: TableDefinition<&str, &[u8]> = TableDefinition::new("entries");

/// Persistent typed backend over a redb database
pub struct StructuredBackend {
    db: Database,
}

impl StructuredBackend {
    /// Provider identity string
    pub const PROVIDER: &'static str = "structured";

    /// Database file name inside the data directory
    pub const FILE_NAME: &'static str = "cache.redb";

    /// Open (or create) the store under `dir`
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created or the database file
    /// cannot be opened (locked, corrupt, path is a file, ...).
    pub fn open(dir: &Path) -> CacheResult<Self> {
        std::fs::create_dir_all(dir)?;
        let db = Database::create(dir.join(Self::FILE_NAME))
            .map_err(|e| CacheError::engine(e.to_string()))?;
        Ok(StructuredBackend { db })
    }

    fn read_raw(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| CacheError::engine(e.to_string()))?;
        let table = match txn.open_table(ENTRIES) {
            Ok(table) => table,
            // Nothing written yet
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(CacheError::engine(e.to_string())),
        };
        let guard = table
            .get(key)
            .map_err(|e| CacheError::engine(e.to_string()))?;
        Ok(guard.map(|g| g.value().to_vec()))
    }

    fn write_raw(&self, key: &str, bytes: &[u8]) -> CacheResult<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| CacheError::engine(e.to_string()))?;
        {
            let mut table = txn
                .open_table(ENTRIES)
                .map_err(|e| CacheError::engine(e.to_string()))?;
            table
                .insert(key, bytes)
                .map_err(|e| CacheError::engine(e.to_string()))?;
        }
        txn.commit().map_err(|e| CacheError::engine(e.to_string()))
    }
}

impl CacheBackend for StructuredBackend {
    fn provider(&self) -> &'static str {
        Self::PROVIDER
    }

    fn put(&self, key: &str, value: Value) -> CacheResult<()> {
        if value.is_null() {
            return self.remove(key);
        }
        let bytes = bincode::serialize(&value)?;
        self.write_raw(key, &bytes)
    }

    fn get(&self, key: &str, kind: ValueKind) -> Option<Value> {
        let bytes = match self.read_raw(key) {
            Ok(bytes) => bytes?,
            Err(e) => {
                warn!(key, error = %e, "structured store read failed");
                return None;
            }
        };
        let value: Value = match bincode::deserialize(&bytes) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "undecodable entry in structured store");
                return None;
            }
        };
        if value.kind() == Some(kind) {
            Some(value)
        } else {
            None
        }
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| CacheError::engine(e.to_string()))?;
        {
            let mut table = txn
                .open_table(ENTRIES)
                .map_err(|e| CacheError::engine(e.to_string()))?;
            table
                .remove(key)
                .map_err(|e| CacheError::engine(e.to_string()))?;
        }
        txn.commit().map_err(|e| CacheError::engine(e.to_string()))
    }

    fn clear(&self) -> CacheResult<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| CacheError::engine(e.to_string()))?;
        txn.delete_table(ENTRIES)
            .map_err(|e| CacheError::engine(e.to_string()))?;
        txn.commit().map_err(|e| CacheError::engine(e.to_string()))
    }
}
