//! Backend abstraction for the cache facade
//!
//! This module defines the `CacheBackend` trait that every storage engine
//! must satisfy. It is the seam that lets the facade swap engines without
//! client code changes.
//!
//! Thread safety: all methods must be safe to call concurrently from
//! multiple threads (requires Send + Sync).

use crate::error::CacheResult;
use crate::value::{Value, ValueKind};

/// Typed storage contract implemented by every backend variant
///
/// A backend is stateless beyond its store handle once constructed; the
/// handle lives for the process lifetime (or until the facade rebinds).
///
/// ## Read contract
///
/// `get` is total: absence and kind mismatch both yield `None`, never an
/// error. When `Some(v)` is returned, `v.kind() == Some(kind)` holds.
///
/// ## Write contract
///
/// `put` with [`Value::Null`] is defined as `remove`. A backend that does
/// not support a value kind must be consistent between its own `put` and
/// `get`: if `put` rejects the kind, `get` for that kind returns `None`.
pub trait CacheBackend: Send + Sync {
    /// The backend's provider identity string
    ///
    /// Part of the wire contract with callers: stable, case-sensitive,
    /// never reused for a different variant.
    fn provider(&self) -> &'static str;

    /// Store `value` under `key`, replacing any prior variant
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying engine rejects the write or the
    /// value kind is unsupported by this backend.
    fn put(&self, key: &str, value: Value) -> CacheResult<()>;

    /// Read the value stored under `key` if present and of the given kind
    fn get(&self, key: &str, kind: ValueKind) -> Option<Value>;

    /// Delete the logical entry for `key` across every encoding this
    /// backend may have used for it; no-op if absent
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying engine rejects the write.
    fn remove(&self, key: &str) -> CacheResult<()>;

    /// Delete all entries held by this backend's store
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying engine rejects the write.
    fn clear(&self) -> CacheResult<()>;
}
