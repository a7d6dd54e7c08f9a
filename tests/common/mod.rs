//! Shared fixtures for the integration suites
#![allow(dead_code)]

use kvcache::backends::{DataStoreBackend, MemoryBackend, PreferenceBackend, StructuredBackend};
use kvcache::CacheBackend;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A representative structured record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: u64,
    pub token: String,
    pub scopes: Vec<String>,
}

impl Session {
    pub fn sample() -> Self {
        Session {
            user_id: 42,
            token: "abc123".into(),
            scopes: vec!["read".into(), "write".into()],
        }
    }
}

/// Construct one backend of every provider against `dir`
///
/// Each disk-backed store gets its own subdirectory so the suites can
/// exercise all of them side by side.
pub fn all_backends(dir: &Path) -> Vec<Arc<dyn CacheBackend>> {
    vec![
        Arc::new(StructuredBackend::open(&dir.join("structured")).unwrap()),
        Arc::new(DataStoreBackend::open(&dir.join("datastore")).unwrap()),
        Arc::new(PreferenceBackend::open(&dir.join("prefs")).unwrap()),
        Arc::new(MemoryBackend::new()),
    ]
}
