//! Asynchronous-preference backend
//!
//! Wraps an engine whose native operations are asynchronous (a typed-slot
//! JSON store with async file I/O) behind the synchronous `CacheBackend`
//! contract. Every public call blocks its own caller on an owned
//! current-thread runtime until the underlying operation settles; no
//! global lock is involved, and per-key consistency is the engine's
//! last-write-wins.
//!
//! ## Typed slots
//!
//! Each (kind, key) pair gets its own slot, named `<kind>:<key>`, so a
//! key can hold entries of several kinds side by side — the same shape as
//! typed preference keys.
//!
//! ## Remove approximation
//!
//! The slot engine has no native per-slot delete. `remove` instead resets
//! every kind's slot for the key to the unset marker (JSON null), which
//! every read treats as absence. Through this API a removed key is
//! indistinguishable from one never written; a raw inspection of the
//! store file would still show the marker entries.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use kvcache_core::{CacheBackend, CacheError, CacheResult, Value, ValueKind};
use serde_json::Value as Slot;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::warn;

/// The asynchronous typed-slot engine: a JSON map persisted with tokio
/// file I/O. All mutation happens under the async mutex; each write
/// flushes the whole map (the store is preference-sized, not bulk data).
struct SlotStore {
    path: PathBuf,
    slots: Mutex<HashMap<String, Slot>>,
}

impl SlotStore {
    async fn load(path: &Path) -> CacheResult<HashMap<String, Slot>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| CacheError::engine(format!("corrupt slot store {}: {e}", path.display()))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn flush(&self, slots: &HashMap<String, Slot>) -> CacheResult<()> {
        let bytes = serde_json::to_vec_pretty(slots).map_err(|e| CacheError::engine(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn read(&self, slot: &str) -> Option<Slot> {
        self.slots.lock().await.get(slot).cloned()
    }

    // Mutations roll the slot map back when the flush fails, so reads
    // never see state the store file does not hold.
    async fn write(&self, slot: String, value: Slot) -> CacheResult<()> {
        let mut slots = self.slots.lock().await;
        let prior = slots.insert(slot.clone(), value);
        if let Err(e) = self.flush(&slots).await {
            match prior {
                Some(prev) => slots.insert(slot, prev),
                None => slots.remove(&slot),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn write_all(&self, entries: Vec<(String, Slot)>) -> CacheResult<()> {
        let mut slots = self.slots.lock().await;
        let prior: Vec<(String, Option<Slot>)> = entries
            .iter()
            .map(|(slot, _)| (slot.clone(), slots.get(slot).cloned()))
            .collect();
        for (slot, value) in entries {
            slots.insert(slot, value);
        }
        if let Err(e) = self.flush(&slots).await {
            for (slot, prev) in prior {
                match prev {
                    Some(v) => slots.insert(slot, v),
                    None => slots.remove(&slot),
                };
            }
            return Err(e);
        }
        Ok(())
    }

    async fn clear(&self) -> CacheResult<()> {
        let mut slots = self.slots.lock().await;
        let prior = std::mem::take(&mut *slots);
        if let Err(e) = self.flush(&slots).await {
            *slots = prior;
            return Err(e);
        }
        Ok(())
    }
}

/// Synchronous backend over the asynchronous slot engine
pub struct DataStoreBackend {
    rt: tokio::runtime::Runtime,
    store: SlotStore,
    binary_slots: bool,
}

impl DataStoreBackend {
    /// Provider identity string
    pub const PROVIDER: &'static str = "datastore";

    /// Store file name inside the data directory
    pub const FILE_NAME: &'static str = "datastore.json";

    /// Open (or create) the store under `dir`
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created, the runtime cannot be
    /// built, or the store file exists but does not parse.
    pub fn open(dir: &Path) -> CacheResult<Self> {
        std::fs::create_dir_all(dir)?;
        let rt = tokio::runtime::Builder::new_current_thread().build()?;
        let path = dir.join(Self::FILE_NAME);
        let slots = rt.block_on(SlotStore::load(&path))?;
        Ok(DataStoreBackend {
            rt,
            store: SlotStore {
                path,
                slots: Mutex::new(slots),
            },
            binary_slots: true,
        })
    }

    /// Disable the bytes/record capability
    ///
    /// Models engines that refuse binary payloads: `put` of bytes or
    /// records fails with `UnsupportedValueType` and `get` of those kinds
    /// returns the caller's default. Put and get stay consistent.
    pub fn without_binary_slots(mut self) -> Self {
        self.binary_slots = false;
        self
    }

    fn slot_name(kind: ValueKind, key: &str) -> String {
        format!("{}:{}", kind.name(), key)
    }

    fn encode_slot(value: &Value) -> Slot {
        match value {
            Value::Null => Slot::Null,
            Value::Bool(b) => Slot::from(*b),
            Value::Int(i) => Slot::from(*i),
            Value::Long(l) => Slot::from(*l),
            // Non-finite floats have no JSON form and land as the unset marker
            Value::Float(f) => Slot::from(*f as f64),
            Value::Double(d) => Slot::from(*d),
            Value::String(s) => Slot::from(s.clone()),
            Value::StringSet(set) => {
                let mut items: Vec<&String> = set.iter().collect();
                items.sort();
                Slot::from(
                    items
                        .into_iter()
                        .map(|s| Slot::from(s.clone()))
                        .collect::<Vec<_>>(),
                )
            }
            Value::Bytes(b) => Slot::from(BASE64.encode(b)),
            Value::Record(b) => Slot::from(BASE64.encode(b)),
        }
    }

    fn decode_slot(kind: ValueKind, slot: &Slot) -> Option<Value> {
        if slot.is_null() {
            // Unset marker
            return None;
        }
        match kind {
            ValueKind::Bool => slot.as_bool().map(Value::Bool),
            ValueKind::Int => slot
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .map(Value::Int),
            ValueKind::Long => slot.as_i64().map(Value::Long),
            ValueKind::Float => slot.as_f64().map(|f| Value::Float(f as f32)),
            ValueKind::Double => slot.as_f64().map(Value::Double),
            ValueKind::String => slot.as_str().map(|s| Value::String(s.to_string())),
            ValueKind::StringSet => slot.as_array().map(|items| {
                Value::StringSet(
                    items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect(),
                )
            }),
            ValueKind::Bytes => slot
                .as_str()
                .and_then(|s| BASE64.decode(s).ok())
                .map(Value::Bytes),
            ValueKind::Record => slot
                .as_str()
                .and_then(|s| BASE64.decode(s).ok())
                .map(Value::Record),
        }
    }
}

impl CacheBackend for DataStoreBackend {
    fn provider(&self) -> &'static str {
        Self::PROVIDER
    }

    fn put(&self, key: &str, value: Value) -> CacheResult<()> {
        let Some(kind) = value.kind() else {
            return self.remove(key);
        };
        if matches!(kind, ValueKind::Bytes | ValueKind::Record) && !self.binary_slots {
            return Err(CacheError::UnsupportedValueType {
                provider: Self::PROVIDER,
                kind,
            });
        }
        let slot = Self::slot_name(kind, key);
        self.rt
            .block_on(self.store.write(slot, Self::encode_slot(&value)))
    }

    fn get(&self, key: &str, kind: ValueKind) -> Option<Value> {
        if matches!(kind, ValueKind::Bytes | ValueKind::Record) && !self.binary_slots {
            return None;
        }
        let slot = self
            .rt
            .block_on(self.store.read(&Self::slot_name(kind, key)))?;
        let decoded = Self::decode_slot(kind, &slot);
        if decoded.is_none() && !slot.is_null() {
            warn!(key, kind = kind.name(), "malformed slot in datastore");
        }
        decoded
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        // No native per-slot delete: reset every kind's slot to the unset
        // marker instead. See the module docs for the caveat.
        let resets = ValueKind::ALL
            .iter()
            .map(|kind| (Self::slot_name(*kind, key), Slot::Null))
            .collect();
        self.rt.block_on(self.store.write_all(resets))
    }

    fn clear(&self) -> CacheResult<()> {
        self.rt.block_on(self.store.clear())
    }
}
