//! Deduplicating load caches.
//!
//! A [`LoadCache`] runs the loader for a key at most once at a time: callers
//! asking for a key that is being loaded wait for that load instead of
//! starting their own. A failed load leaves the key empty so a later caller
//! can retry.

use crate::container::OoxmlContainer;
use crate::document::{DocumentKey, SourceDocument};
use crate::error::Result;
use crate::pptx::MediaTable;
use log::debug;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

type Slot<V> = Arc<Mutex<Option<V>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // a panicking loader leaves the slot empty, which is still consistent
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Cache keyed by resource identity with at-most-one-in-flight loading.
pub struct LoadCache<K, V> {
    slots: RwLock<HashMap<K, Slot<V>>>,
}

impl<K, V> Default for LoadCache<K, V> {
    fn default() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> LoadCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &K) -> Slot<V> {
        {
            let slots = self.slots.read().unwrap_or_else(|p| p.into_inner());
            if let Some(slot) = slots.get(key) {
                return Arc::clone(slot);
            }
        }
        let mut slots = self.slots.write().unwrap_or_else(|p| p.into_inner());
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    /// Cached value for `key`, loading it with `load` when absent.
    pub fn get_or_try_load<F>(&self, key: &K, load: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        let slot = self.slot(key);
        let mut value = lock(&slot);
        if let Some(ref cached) = *value {
            return Ok(cached.clone());
        }
        let loaded = load()?;
        *value = Some(loaded.clone());
        Ok(loaded)
    }

    /// Cached value for `key` without loading.
    pub fn get(&self, key: &K) -> Option<V> {
        let slots = self.slots.read().unwrap_or_else(|p| p.into_inner());
        let slot = slots.get(key)?;
        let value = lock(slot).clone();
        value
    }

    /// Number of keys with a loaded value.
    pub fn len(&self) -> usize {
        let slots = self.slots.read().unwrap_or_else(|p| p.into_inner());
        slots.values().filter(|s| lock(s).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached value.
    pub fn clear(&self) {
        self.slots.write().unwrap_or_else(|p| p.into_inner()).clear();
    }
}

impl<K, V> std::fmt::Debug for LoadCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys = self.slots.read().map(|s| s.len()).unwrap_or(0);
        f.debug_struct("LoadCache").field("keys", &keys).finish()
    }
}

/// Per-session resources shared by every pipeline stage.
///
/// The archive of a document is opened once and its media table
/// materialized once, however many stages ask for them.
#[derive(Debug, Default)]
pub struct SessionCache {
    containers: LoadCache<DocumentKey, OoxmlContainer>,
    media: LoadCache<DocumentKey, Arc<MediaTable>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opened archive of `document`.
    pub fn container(&self, document: &SourceDocument) -> Result<OoxmlContainer> {
        self.containers.get_or_try_load(&document.key(), || {
            debug!("opening archive of {}", document.name());
            OoxmlContainer::from_bytes(document.shared_bytes())
        })
    }

    /// Media table of `document`.
    pub fn media(&self, document: &SourceDocument) -> Result<Arc<MediaTable>> {
        self.media.get_or_try_load(&document.key(), || {
            let container = self.container(document)?;
            Ok(Arc::new(MediaTable::extract(&container)))
        })
    }

    /// Forget every document; used when a new file is loaded.
    pub fn clear(&self) {
        self.containers.clear();
        self.media.clear();
    }
}
