//! Transfer cache for short-circuiting duplicate producer calls.
//!
//! A caller that already holds a cast payload under an opaque token can
//! serve it from here instead of re-running the producer. Entries are
//! settable once and readable many times; the casting pipeline itself is
//! unaware of the cache and casts whatever payload it is handed.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct TransferCache {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl TransferCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a payload under `key` if the key is vacant. Returns whether
    /// the payload was stored; an occupied key is never overwritten.
    pub async fn set_once(&self, key: impl Into<String>, value: Value) -> bool {
        let mut entries = self.entries.write().await;
        match entries.entry(key.into()) {
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            std::collections::hash_map::Entry::Occupied(_) => false,
        }
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn has(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Synchronously reads a cached payload. Returns `None` when the key is
    /// vacant or the lock is unavailable.
    pub fn get_sync(&self, key: &str) -> Option<Value> {
        self.entries
            .try_read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }
}
