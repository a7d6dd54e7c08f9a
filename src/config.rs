//! Cache configuration
//!
//! An explicit, injectable configuration object: whatever composition
//! root the surrounding application uses owns one of these and hands it
//! to [`KvCache::initialize`](crate::KvCache::initialize). There is no
//! ambient global to look up.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration handed to `initialize`
///
/// # Example
///
/// ```
/// use kvcache::CacheConfig;
/// use kvcache::backends::MemoryBackend;
///
/// let config = CacheConfig::new("/var/lib/myapp/cache")
///     .with_provider(MemoryBackend::PROVIDER);
/// assert_eq!(config.provider.as_deref(), Some("memory"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory the disk-backed backends put their store files in
    pub data_dir: PathBuf,
    /// Requested provider identity, or `None` for automatic resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl CacheConfig {
    /// Config with automatic provider resolution
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        CacheConfig {
            data_dir: data_dir.into(),
            provider: None,
        }
    }

    /// Request a specific provider
    ///
    /// An explicitly requested provider fails loudly if its backend
    /// cannot construct; an unknown identity falls back to automatic
    /// resolution.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_automatic_resolution() {
        let config = CacheConfig::new("/tmp/x");
        assert!(config.provider.is_none());
        assert_eq!(config.data_dir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn with_provider_sets_identity() {
        let config = CacheConfig::new("/tmp/x").with_provider("memory");
        assert_eq!(config.provider.as_deref(), Some("memory"));
    }

    #[test]
    fn serde_round_trip_omits_absent_provider() {
        let config = CacheConfig::new("/tmp/x");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("provider"));
        let back: CacheConfig = serde_json::from_str(&json).unwrap();
        assert!(back.provider.is_none());
    }
}
