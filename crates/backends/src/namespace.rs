//! Derived-key convention for text-only stores
//!
//! Engines without native byte-sequence or structured-record types store
//! those payloads as base64 text under a derived key, so the literal key's
//! own possible other-variant entry is never clobbered. The derived key is
//! a fixed prefix joined to the original key with `_`.
//!
//! The two prefixes are part of the at-rest format of the affected
//! backends: changing them orphans existing entries.

/// Prefix for byte-sequence payloads stored as text
pub const BYTES_PREFIX: &str = "bytes";

/// Prefix for structured-record payloads stored as text
pub const RECORD_PREFIX: &str = "record";

/// Derived key for a byte-sequence payload
pub fn bytes_key(key: &str) -> String {
    format!("{BYTES_PREFIX}_{key}")
}

/// Derived key for a structured-record payload
pub fn record_key(key: &str) -> String {
    format!("{RECORD_PREFIX}_{key}")
}
