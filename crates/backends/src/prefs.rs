//! Flag-based preference backend
//!
//! Wraps a simple typed-flag store (a JSON file of bool / int / long /
//! float / text / text-list flags) that has no double, byte-sequence, or
//! structured-record type:
//!
//! - `Double` values are narrowed to single precision for storage and
//!   widened back on read. The precision loss is an accepted, documented
//!   lossy conversion, not a bug.
//! - Bytes and records are stored as base64 text under the derived keys
//!   from [`crate::namespace`], so they never collide with the literal
//!   key's own flag.
//! - `remove` deletes the literal key and both derived keys.
//!
//! Because double and float share the underlying float flag, a key
//! written as one is readable as the other; the original store has the
//! same aliasing.

use crate::namespace;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use kvcache_core::{CacheBackend, CacheError, CacheResult, Value, ValueKind};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One typed flag as the store file holds it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
enum Flag {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Text(String),
    TextList(Vec<String>),
}

/// Flag-file backend
pub struct PreferenceBackend {
    path: PathBuf,
    flags: Mutex<HashMap<String, Flag>>,
}

impl PreferenceBackend {
    /// Provider identity string
    pub const PROVIDER: &'static str = "prefs";

    /// Store file name inside the data directory
    pub const FILE_NAME: &'static str = "prefs.json";

    /// Open (or create) the store under `dir`
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created or the store file
    /// exists but does not parse.
    pub fn open(dir: &Path) -> CacheResult<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(Self::FILE_NAME);
        let flags = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| CacheError::engine(format!("corrupt flag store {}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(PreferenceBackend {
            path,
            flags: Mutex::new(flags),
        })
    }

    fn persist(&self, flags: &HashMap<String, Flag>) -> CacheResult<()> {
        let bytes = serde_json::to_vec_pretty(flags).map_err(|e| CacheError::engine(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    // Mutations roll the in-memory map back when the disk write fails,
    // so reads never see state the store file does not hold.
    fn set(&self, key: String, flag: Flag) -> CacheResult<()> {
        let mut flags = self.flags.lock();
        let prior = flags.insert(key.clone(), flag);
        if let Err(e) = self.persist(&flags) {
            match prior {
                Some(prev) => flags.insert(key, prev),
                None => flags.remove(&key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn flag(&self, key: &str) -> Option<Flag> {
        self.flags.lock().get(key).cloned()
    }

    fn decode_base64(&self, key: &str, text: &str) -> Option<Vec<u8>> {
        match BASE64.decode(text) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(key, error = %e, "malformed base64 payload in flag store");
                None
            }
        }
    }
}

impl CacheBackend for PreferenceBackend {
    fn provider(&self) -> &'static str {
        Self::PROVIDER
    }

    fn put(&self, key: &str, value: Value) -> CacheResult<()> {
        match value {
            Value::Null => self.remove(key),
            Value::Bool(b) => self.set(key.to_string(), Flag::Bool(b)),
            Value::Int(i) => self.set(key.to_string(), Flag::Int(i)),
            Value::Long(l) => self.set(key.to_string(), Flag::Long(l)),
            Value::Float(f) => self.set(key.to_string(), Flag::Float(f)),
            // No native double flag: narrow to single precision (lossy)
            Value::Double(d) => self.set(key.to_string(), Flag::Float(d as f32)),
            Value::String(s) => self.set(key.to_string(), Flag::Text(s)),
            Value::StringSet(set) => {
                let mut items: Vec<String> = set.into_iter().collect();
                items.sort();
                self.set(key.to_string(), Flag::TextList(items))
            }
            Value::Bytes(b) => self.set(namespace::bytes_key(key), Flag::Text(BASE64.encode(b))),
            Value::Record(b) => self.set(namespace::record_key(key), Flag::Text(BASE64.encode(b))),
        }
    }

    fn get(&self, key: &str, kind: ValueKind) -> Option<Value> {
        match kind {
            ValueKind::Bool => match self.flag(key)? {
                Flag::Bool(b) => Some(Value::Bool(b)),
                _ => None,
            },
            ValueKind::Int => match self.flag(key)? {
                Flag::Int(i) => Some(Value::Int(i)),
                _ => None,
            },
            ValueKind::Long => match self.flag(key)? {
                Flag::Long(l) => Some(Value::Long(l)),
                _ => None,
            },
            ValueKind::Float => match self.flag(key)? {
                Flag::Float(f) => Some(Value::Float(f)),
                _ => None,
            },
            // Widen the narrowed float back to double
            ValueKind::Double => match self.flag(key)? {
                Flag::Float(f) => Some(Value::Double(f as f64)),
                _ => None,
            },
            ValueKind::String => match self.flag(key)? {
                Flag::Text(s) => Some(Value::String(s)),
                _ => None,
            },
            ValueKind::StringSet => match self.flag(key)? {
                Flag::TextList(items) => Some(Value::StringSet(items.into_iter().collect())),
                _ => None,
            },
            ValueKind::Bytes => match self.flag(&namespace::bytes_key(key))? {
                Flag::Text(s) => self.decode_base64(key, &s).map(Value::Bytes),
                _ => None,
            },
            ValueKind::Record => match self.flag(&namespace::record_key(key))? {
                Flag::Text(s) => self.decode_base64(key, &s).map(Value::Record),
                _ => None,
            },
        }
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        let mut flags = self.flags.lock();
        let dropped: Vec<(String, Flag)> =
            [key.to_string(), namespace::bytes_key(key), namespace::record_key(key)]
                .into_iter()
                .filter_map(|k| flags.remove(&k).map(|f| (k, f)))
                .collect();
        if let Err(e) = self.persist(&flags) {
            for (k, f) in dropped {
                flags.insert(k, f);
            }
            return Err(e);
        }
        Ok(())
    }

    fn clear(&self) -> CacheResult<()> {
        let mut flags = self.flags.lock();
        let prior = std::mem::take(&mut *flags);
        if let Err(e) = self.persist(&flags) {
            *flags = prior;
            return Err(e);
        }
        Ok(())
    }
}
