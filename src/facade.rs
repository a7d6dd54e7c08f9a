//! The cache facade
//!
//! `KvCache` is the process-facing entry point: it owns the currently
//! bound backend and delegates every typed operation to it. It is an
//! explicit, injectable object — the composition root constructs one and
//! passes it around; there is no hidden global.
//!
//! ## Lifecycle
//!
//! Two phases. *Uninitialized*: queries degrade to the caller's default,
//! `provider()` returns the empty sentinel, and mutations fail with
//! `NotInitialized`. *Initialized*: everything delegates to the bound
//! backend. `initialize` is idempotent-by-replacement: calling it again
//! rebinds, discarding the previous backend handle (not its on-disk
//! data). Rebinding is not atomic with respect to in-flight operations
//! on the old backend; re-initialization belongs at process startup.

use crate::config::CacheConfig;
use crate::dispatch::CacheValue;
use crate::resolver;
use kvcache_core::{codec, validate_key, CacheBackend, CacheError, CacheResult, Value, ValueKind};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Typed key-value facade over an interchangeable backend
pub struct KvCache {
    backend: RwLock<Option<Arc<dyn CacheBackend>>>,
}

impl KvCache {
    /// Create an uninitialized facade
    pub const fn new() -> Self {
        KvCache {
            backend: RwLock::new(None),
        }
    }

    /// Resolve a backend per `config` and bind it
    ///
    /// # Errors
    ///
    /// Fails only when the config explicitly requests a provider whose
    /// backend cannot construct; automatic resolution always succeeds.
    pub fn initialize(&self, config: &CacheConfig) -> CacheResult<()> {
        let backend = resolver::resolve(config)?;
        self.bind(backend);
        Ok(())
    }

    /// Bind a caller-supplied backend directly, bypassing resolution
    ///
    /// Escape hatch for custom engines and test doubles.
    pub fn bind(&self, backend: Arc<dyn CacheBackend>) {
        info!(provider = backend.provider(), "cache backend bound");
        *self.backend.write() = Some(backend);
    }

    /// Whether a backend is currently bound
    pub fn is_initialized(&self) -> bool {
        self.backend.read().is_some()
    }

    /// The bound backend's provider identity, or `""` when uninitialized
    pub fn provider(&self) -> String {
        self.bound()
            .map(|b| b.provider().to_string())
            .unwrap_or_default()
    }

    fn bound(&self) -> Option<Arc<dyn CacheBackend>> {
        self.backend.read().clone()
    }

    fn require_bound(&self) -> CacheResult<Arc<dyn CacheBackend>> {
        self.bound().ok_or(CacheError::NotInitialized)
    }

    // Reads stay total: an invalid key or an unbound facade both look
    // like absence.
    fn get_kind(&self, key: &str, kind: ValueKind) -> Option<Value> {
        if validate_key(key).is_err() {
            return None;
        }
        self.bound()?.get(key, kind)
    }

    // ========== Writes ==========

    /// Store `value` under `key`
    ///
    /// A null value (e.g. `None` via the `Option` conversion) is defined
    /// as `remove(key)`.
    ///
    /// # Errors
    ///
    /// `NotInitialized` before any `initialize`/`bind`; `InvalidKey` on a
    /// bad key; otherwise whatever the backend raises.
    pub fn put(&self, key: &str, value: impl Into<Value>) -> CacheResult<()> {
        validate_key(key)?;
        self.require_bound()?.put(key, value.into())
    }

    /// Encode a structured record and store it under `key`
    ///
    /// # Errors
    ///
    /// As [`put`](Self::put), plus `Codec` when encoding fails.
    pub fn put_record<T: Serialize>(&self, key: &str, record: &T) -> CacheResult<()> {
        let bytes = codec::encode(record)?;
        self.put(key, Value::Record(bytes))
    }

    /// Delete the entry for `key`; no-op if absent
    ///
    /// # Errors
    ///
    /// `NotInitialized` before any `initialize`/`bind`.
    pub fn remove(&self, key: &str) -> CacheResult<()> {
        validate_key(key)?;
        self.require_bound()?.remove(key)
    }

    /// Delete every entry held by the bound backend
    ///
    /// # Errors
    ///
    /// `NotInitialized` before any `initialize`/`bind`.
    pub fn clear(&self) -> CacheResult<()> {
        self.require_bound()?.clear()
    }

    // ========== Typed getters ==========

    /// Stored float for `key`, or `default`
    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        self.get_kind(key, ValueKind::Float)
            .and_then(|v| v.as_float())
            .unwrap_or(default)
    }

    /// Stored int for `key`, or `default`
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        self.get_kind(key, ValueKind::Int)
            .and_then(|v| v.as_int())
            .unwrap_or(default)
    }

    /// Stored double for `key`, or `default`
    pub fn get_double(&self, key: &str, default: f64) -> f64 {
        self.get_kind(key, ValueKind::Double)
            .and_then(|v| v.as_double())
            .unwrap_or(default)
    }

    /// Stored long for `key`, or `default`
    pub fn get_long(&self, key: &str, default: i64) -> i64 {
        self.get_kind(key, ValueKind::Long)
            .and_then(|v| v.as_long())
            .unwrap_or(default)
    }

    /// Stored bool for `key`, or `default`
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_kind(key, ValueKind::Bool)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    /// Stored string for `key`, if any
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get_kind(key, ValueKind::String)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Stored string for `key`, or `default`
    pub fn get_string_or(&self, key: &str, default: impl Into<String>) -> String {
        self.get_string(key).unwrap_or_else(|| default.into())
    }

    /// Stored string set for `key`, if any
    pub fn get_string_set(&self, key: &str) -> Option<HashSet<String>> {
        match self.get_kind(key, ValueKind::StringSet)? {
            Value::StringSet(s) => Some(s),
            _ => None,
        }
    }

    /// Stored string set for `key`, or `default`
    pub fn get_string_set_or(&self, key: &str, default: HashSet<String>) -> HashSet<String> {
        self.get_string_set(key).unwrap_or(default)
    }

    /// Stored bytes for `key`, if any
    pub fn get_bytes(&self, key: &str) -> Option<Vec<u8>> {
        match self.get_kind(key, ValueKind::Bytes)? {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Stored bytes for `key`, or `default`
    pub fn get_bytes_or(&self, key: &str, default: Vec<u8>) -> Vec<u8> {
        self.get_bytes(key).unwrap_or(default)
    }

    /// Decode the structured record stored under `key`, if any
    ///
    /// An entry that fails to decode into `T` reads as absent.
    pub fn get_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.get_kind(key, ValueKind::Record)? {
            Value::Record(b) => b,
            _ => return None,
        };
        match codec::decode(&bytes) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key, error = %e, "stored record does not decode into the requested type");
                None
            }
        }
    }

    /// Decode the structured record stored under `key`, or `default`
    pub fn get_record_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get_record(key).unwrap_or(default)
    }

    // ========== Type dispatch ==========

    /// Get-with-default, dispatching on the default's variant tag
    ///
    /// Branches on the runtime variant of `default` and calls the
    /// matching typed getter with it. A `Null` default carries no kind to
    /// dispatch on; that is reported as a diagnostic and the default is
    /// returned unchanged.
    pub fn get_value(&self, key: &str, default: Value) -> Value {
        match default {
            Value::Bool(d) => Value::Bool(self.get_bool(key, d)),
            Value::Int(d) => Value::Int(self.get_int(key, d)),
            Value::Long(d) => Value::Long(self.get_long(key, d)),
            Value::Float(d) => Value::Float(self.get_float(key, d)),
            Value::Double(d) => Value::Double(self.get_double(key, d)),
            Value::String(d) => Value::String(self.get_string_or(key, d)),
            Value::StringSet(d) => Value::StringSet(self.get_string_set_or(key, d)),
            Value::Bytes(d) => Value::Bytes(self.get_bytes_or(key, d)),
            Value::Record(d) => self
                .get_kind(key, ValueKind::Record)
                .unwrap_or(Value::Record(d)),
            Value::Null => {
                warn!(key, "cannot infer a value kind from a null default");
                Value::Null
            }
        }
    }

    /// Get-with-default, dispatching on the default's static type
    ///
    /// `get_or_default(key, 5i32)` behaves identically to
    /// `get_int(key, 5)`.
    pub fn get_or_default<T: CacheValue>(&self, key: &str, default: T) -> T {
        self.get_kind(key, T::KIND)
            .and_then(T::from_value)
            .unwrap_or(default)
    }

    /// Get with the requested type's zero default
    pub fn get_or_zero<T: CacheValue>(&self, key: &str) -> T {
        self.get_or_default(key, T::zero())
    }
}

impl Default for KvCache {
    fn default() -> Self {
        KvCache::new()
    }
}
