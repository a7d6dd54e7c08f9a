//! Built-in storage backends for the kvcache facade
//!
//! Four engines, all satisfying the same [`CacheBackend`] contract:
//!
//! - [`MemoryBackend`]: concurrent in-memory map; never fails to construct
//! - [`StructuredBackend`]: persistent typed store (redb); full variant support
//! - [`DataStoreBackend`]: synchronous facade over an asynchronous typed-slot
//!   engine
//! - [`PreferenceBackend`]: flag-file store; lossy double narrowing and
//!   base64 derived keys for binary payloads
//!
//! [`CacheBackend`]: kvcache_core::CacheBackend

pub mod datastore;
pub mod memory;
pub mod namespace;
pub mod prefs;
pub mod structured;

pub use datastore::DataStoreBackend;
pub use memory::MemoryBackend;
pub use prefs::PreferenceBackend;
pub use structured::StructuredBackend;
