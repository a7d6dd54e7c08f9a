//! Provider resolution
//!
//! Turns an optional provider identity into a constructed backend.
//!
//! - An explicitly requested, known provider is constructed exactly, and
//!   any construction failure propagates as
//!   [`CacheError::BackendConstruction`] — no silent substitution when
//!   the caller was explicit.
//! - An absent or unrecognized identity probes the fixed priority list
//!   `structured → datastore → prefs → memory`; each probe failure is
//!   swallowed (logged at debug) and the next candidate is tried. The
//!   in-memory backend never fails, so probing always terminates with a
//!   bound backend.
//!
//! The priority list is an explicit value rather than nested fallback
//! control flow, so tests can fold over their own candidate lists.

use crate::config::CacheConfig;
use kvcache_backends::{DataStoreBackend, MemoryBackend, PreferenceBackend, StructuredBackend};
use kvcache_core::{CacheBackend, CacheError, CacheResult};
use std::sync::Arc;
use tracing::debug;

/// A named fallible backend constructor
#[derive(Clone, Copy)]
pub struct Candidate {
    /// Provider identity this candidate constructs
    pub name: &'static str,
    /// Constructor; failures are swallowed during probing and surfaced
    /// verbatim on explicit request
    pub construct: fn(&CacheConfig) -> CacheResult<Arc<dyn CacheBackend>>,
}

fn construct_structured(config: &CacheConfig) -> CacheResult<Arc<dyn CacheBackend>> {
    Ok(Arc::new(StructuredBackend::open(&config.data_dir)?))
}

fn construct_datastore(config: &CacheConfig) -> CacheResult<Arc<dyn CacheBackend>> {
    Ok(Arc::new(DataStoreBackend::open(&config.data_dir)?))
}

fn construct_prefs(config: &CacheConfig) -> CacheResult<Arc<dyn CacheBackend>> {
    Ok(Arc::new(PreferenceBackend::open(&config.data_dir)?))
}

fn construct_memory(_config: &CacheConfig) -> CacheResult<Arc<dyn CacheBackend>> {
    Ok(Arc::new(MemoryBackend::new()))
}

/// Fixed priority order for automatic resolution
///
/// Best available fidelity first; the terminal in-memory entry never
/// fails to construct.
pub const PRIORITY: [Candidate; 4] = [
    Candidate {
        name: StructuredBackend::PROVIDER,
        construct: construct_structured,
    },
    Candidate {
        name: DataStoreBackend::PROVIDER,
        construct: construct_datastore,
    },
    Candidate {
        name: PreferenceBackend::PROVIDER,
        construct: construct_prefs,
    },
    Candidate {
        name: MemoryBackend::PROVIDER,
        construct: construct_memory,
    },
];

/// Resolve a backend per the config's provider request
///
/// # Errors
///
/// Only [`CacheError::BackendConstruction`], and only when a known
/// provider was requested explicitly and failed to construct.
pub fn resolve(config: &CacheConfig) -> CacheResult<Arc<dyn CacheBackend>> {
    let Some(requested) = config.provider.as_deref() else {
        return Ok(probe(&PRIORITY, config));
    };
    match PRIORITY.iter().find(|c| c.name == requested) {
        Some(candidate) => {
            (candidate.construct)(config).map_err(|e| CacheError::BackendConstruction {
                provider: requested.to_string(),
                reason: e.to_string(),
            })
        }
        None => {
            debug!(provider = requested, "unknown provider identity, probing");
            Ok(probe(&PRIORITY, config))
        }
    }
}

/// Fold over `candidates` in order, returning the first that constructs
///
/// Probe failures are swallowed; if every candidate fails the in-memory
/// backend is returned, keeping resolution total.
pub fn probe(candidates: &[Candidate], config: &CacheConfig) -> Arc<dyn CacheBackend> {
    for candidate in candidates {
        match (candidate.construct)(config) {
            Ok(backend) => return backend,
            Err(e) => {
                debug!(provider = candidate.name, error = %e, "backend probe failed, trying next candidate");
            }
        }
    }
    Arc::new(MemoryBackend::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn failing(_: &CacheConfig) -> CacheResult<Arc<dyn CacheBackend>> {
        Err(CacheError::engine("native library load failure"))
    }

    #[test]
    fn priority_order_is_fixed() {
        let names: Vec<_> = PRIORITY.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["structured", "datastore", "prefs", "memory"]);
    }

    #[test]
    fn automatic_resolution_picks_first_constructible() {
        let dir = TempDir::new().unwrap();
        let config = CacheConfig::new(dir.path());
        let backend = resolve(&config).unwrap();
        assert_eq!(backend.provider(), StructuredBackend::PROVIDER);
    }

    #[test]
    fn probe_skips_failing_candidates_in_order() {
        let dir = TempDir::new().unwrap();
        let config = CacheConfig::new(dir.path());

        let candidates = [
            Candidate { name: "structured", construct: failing },
            Candidate { name: "datastore", construct: failing },
            Candidate { name: "prefs", construct: construct_prefs },
            Candidate { name: "memory", construct: construct_memory },
        ];
        let backend = probe(&candidates, &config);
        assert_eq!(backend.provider(), PreferenceBackend::PROVIDER);
    }

    #[test]
    fn probe_with_all_failing_still_yields_memory() {
        let dir = TempDir::new().unwrap();
        let config = CacheConfig::new(dir.path());
        let candidates = [
            Candidate { name: "structured", construct: failing },
            Candidate { name: "datastore", construct: failing },
            Candidate { name: "prefs", construct: failing },
            Candidate { name: "memory", construct: failing },
        ];
        let backend = probe(&candidates, &config);
        assert_eq!(backend.provider(), MemoryBackend::PROVIDER);
    }

    #[test]
    fn all_real_backends_failing_degrades_to_memory() {
        // Point the data dir at a regular file: every disk-backed
        // constructor fails, memory wins.
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();

        let config = CacheConfig::new(&file);
        let backend = resolve(&config).unwrap();
        assert_eq!(backend.provider(), MemoryBackend::PROVIDER);
    }

    #[test]
    fn explicit_request_constructs_exactly_that_backend() {
        let dir = TempDir::new().unwrap();
        let config = CacheConfig::new(dir.path()).with_provider(PreferenceBackend::PROVIDER);
        let backend = resolve(&config).unwrap();
        assert_eq!(backend.provider(), PreferenceBackend::PROVIDER);
    }

    #[test]
    fn explicit_request_failure_is_loud() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();

        let config = CacheConfig::new(&file).with_provider(StructuredBackend::PROVIDER);
        let err = resolve(&config).err().unwrap();
        assert!(err.is_construction_failure());
    }

    #[test]
    fn unknown_identity_falls_back_to_probing() {
        let dir = TempDir::new().unwrap();
        let config = CacheConfig::new(dir.path()).with_provider("sqlite");
        let backend = resolve(&config).unwrap();
        assert_eq!(backend.provider(), StructuredBackend::PROVIDER);
    }
}
