//! Structured-record byte codec
//!
//! Backends without native structured-value support store records as
//! opaque bytes. The byte layout is delegated entirely to this codec;
//! the rest of the system only needs `encode` and `decode`.
//!
//! Decoding is type-indexed through the caller's target type; no runtime
//! reflection is involved.

use crate::error::CacheResult;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a structured record to bytes
pub fn encode<T: Serialize>(record: &T) -> CacheResult<Vec<u8>> {
    Ok(bincode::serialize(record)?)
}

/// Decode a structured record from bytes
///
/// # Errors
///
/// Returns [`CacheError::Codec`](crate::CacheError::Codec) when the bytes
/// do not decode into `T` — typically because the key holds a record of a
/// different type.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CacheResult<T> {
    Ok(bincode::deserialize(bytes)?)
}
