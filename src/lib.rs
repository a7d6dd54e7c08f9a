//! Typed key-value cache facade over interchangeable storage backends
//!
//! A small persistence layer for settings-shaped data: nine storable
//! value kinds behind one typed API, with the actual storage engine
//! chosen at initialization time. Disk-backed engines are probed in a
//! fixed priority order and the facade degrades to an in-memory table
//! when none of them can construct, so initialization by automatic
//! resolution never fails.
//!
//! ```no_run
//! use kvcache::{CacheConfig, KvCache};
//!
//! # fn main() -> kvcache::CacheResult<()> {
//! let cache = KvCache::new();
//! cache.initialize(&CacheConfig::new("/var/lib/myapp/cache"))?;
//!
//! cache.put("launch_count", 3i32)?;
//! assert_eq!(cache.get_int("launch_count", 0), 3);
//! assert_eq!(cache.get_string_or("theme", "dark"), "dark");
//! # Ok(())
//! # }
//! ```
//!
//! Crate layout mirrors the dependency direction: `kvcache-core` holds
//! the value model and the backend contract, `kvcache-backends` the four
//! engine adapters, and this crate the facade, resolver, and dispatch
//! surface.

pub mod config;
pub mod dispatch;
pub mod facade;
pub mod resolver;

/// The backend implementations, re-exported for direct construction
pub use kvcache_backends as backends;

pub use config::CacheConfig;
pub use dispatch::CacheValue;
pub use facade::KvCache;
pub use kvcache_core::{
    validate_key, CacheBackend, CacheError, CacheResult, KeyError, Value, ValueKind, MAX_KEY_BYTES,
};
