//! Error types for the cache facade
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations. Read-side conditions (absent key, kind mismatch,
//! undecodable at-rest payload) are never errors: typed getters recover
//! locally and return the caller's default instead.

use crate::key::KeyError;
use crate::value::ValueKind;
use std::io;
use thiserror::Error;

/// Result type alias for cache operations
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Error types for the cache facade
#[derive(Debug, Error)]
pub enum CacheError {
    /// A facade mutation was invoked before `initialize`
    #[error("cache is not initialized")]
    NotInitialized,

    /// An explicitly requested provider failed to construct
    ///
    /// Never raised from automatic resolution, which swallows probe
    /// failures and tries the next candidate.
    #[error("backend construction failed for provider {provider:?}: {reason}")]
    BackendConstruction {
        /// The provider identity string that was requested
        provider: String,
        /// Why construction failed
        reason: String,
    },

    /// The backend does not support this value kind
    #[error("provider {provider:?} does not support {} values", kind.name())]
    UnsupportedValueType {
        /// The backend's provider identity string
        provider: &'static str,
        /// The rejected value kind
        kind: ValueKind,
    },

    /// Key failed validation
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    /// Structured-record codec error
    #[error("record codec error: {0}")]
    Codec(String),

    /// Wrapped storage engine error
    #[error("storage engine error: {0}")]
    Engine(String),

    /// I/O error (store files, directories)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CacheError {
    /// Build an [`CacheError::Engine`] from any displayable engine failure
    pub fn engine(reason: impl Into<String>) -> Self {
        CacheError::Engine(reason.into())
    }

    /// Check if this is the not-initialized error
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, CacheError::NotInitialized)
    }

    /// Check if this is an explicit-construction failure
    pub fn is_construction_failure(&self) -> bool {
        matches!(self, CacheError::BackendConstruction { .. })
    }

    /// Check if this is an unsupported-value-type rejection
    pub fn is_unsupported_value_type(&self) -> bool {
        matches!(self, CacheError::UnsupportedValueType { .. })
    }
}

impl From<bincode::Error> for CacheError {
    fn from(e: bincode::Error) -> Self {
        CacheError::Codec(e.to_string())
    }
}
