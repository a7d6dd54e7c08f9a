//! Core contracts for the kvcache facade
//!
//! This crate defines the pieces every other layer agrees on:
//!
//! - [`Value`] / [`ValueKind`]: the closed tagged union of storable types
//! - [`CacheBackend`]: the typed storage contract each engine satisfies
//! - [`CacheError`] / [`CacheResult`]: the error taxonomy
//! - [`codec`]: the structured-record byte codec
//! - [`key`]: key validation rules
//!
//! No concrete backend lives here; see the `kvcache-backends` crate.

pub mod codec;
pub mod error;
pub mod key;
pub mod traits;
pub mod value;

pub use error::{CacheError, CacheResult};
pub use key::{validate_key, KeyError, MAX_KEY_BYTES};
pub use traits::CacheBackend;
pub use value::{Value, ValueKind};
