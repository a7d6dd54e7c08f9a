//! Type dispatch for the generic get-with-default entry points
//!
//! Two branches, mirroring the facade's convenience getters:
//!
//! - Runtime branch: [`KvCache::get_value`](crate::KvCache::get_value)
//!   matches on the default's variant tag.
//! - Static branch: [`CacheValue`] maps a Rust type to its variant tag at
//!   compile time, so `get_or_default(key, 5i32)` and `get_int(key, 5)`
//!   are the same call.
//!
//! The trait is sealed: the set of storable primitive types is closed.
//! Structured records are deliberately not `CacheValue`; they go through
//! the serde-generic record getters instead.

use kvcache_core::{Value, ValueKind};
use std::collections::HashSet;

mod sealed {
    pub trait Sealed {}
    impl Sealed for bool {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
    impl Sealed for std::collections::HashSet<String> {}
    impl Sealed for Vec<u8> {}
}

/// A primitive Rust type with a fixed value kind
///
/// Values travel into storage through the `From` ladder on [`Value`];
/// this trait covers the read direction plus the per-type zero.
pub trait CacheValue: sealed::Sealed + Sized {
    /// The variant tag this type maps to
    const KIND: ValueKind;

    /// Unwrap from the tagged union; `None` on any other variant
    fn from_value(value: Value) -> Option<Self>;

    /// The variant-specific zero default
    fn zero() -> Self;
}

impl CacheValue for bool {
    const KIND: ValueKind = ValueKind::Bool;
    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
    fn zero() -> Self {
        false
    }
}

impl CacheValue for i32 {
    const KIND: ValueKind = ValueKind::Int;
    fn from_value(value: Value) -> Option<Self> {
        value.as_int()
    }
    fn zero() -> Self {
        0
    }
}

impl CacheValue for i64 {
    const KIND: ValueKind = ValueKind::Long;
    fn from_value(value: Value) -> Option<Self> {
        value.as_long()
    }
    fn zero() -> Self {
        0
    }
}

impl CacheValue for f32 {
    const KIND: ValueKind = ValueKind::Float;
    fn from_value(value: Value) -> Option<Self> {
        value.as_float()
    }
    fn zero() -> Self {
        0.0
    }
}

impl CacheValue for f64 {
    const KIND: ValueKind = ValueKind::Double;
    fn from_value(value: Value) -> Option<Self> {
        value.as_double()
    }
    fn zero() -> Self {
        0.0
    }
}

impl CacheValue for String {
    const KIND: ValueKind = ValueKind::String;
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
    fn zero() -> Self {
        String::new()
    }
}

impl CacheValue for HashSet<String> {
    const KIND: ValueKind = ValueKind::StringSet;
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::StringSet(s) => Some(s),
            _ => None,
        }
    }
    fn zero() -> Self {
        HashSet::new()
    }
}

impl CacheValue for Vec<u8> {
    const KIND: ValueKind = ValueKind::Bytes;
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
    fn zero() -> Self {
        Vec::new()
    }
}
