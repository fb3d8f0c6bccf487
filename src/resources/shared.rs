//! Thread-safe variant of [`crate::resources::ResourceCache`].
//!
//! The single-threaded cache needs `&mut self` for every lookup, which rules
//! out races at compile time. When several threads must share one cache, the
//! check-then-load sequence has to be atomic instead: the lock is held across
//! the existence check, the load and the insert, so two threads asking for the
//! same key can never both load it.
//!
//! A loader that panics poisons the lock, but the map is only written after a
//! load succeeds, so the entries behind a poisoned lock are still valid and
//! the cache keeps serving them.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt::Debug,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use instant::Instant;

use crate::{
    error::{CacheError, Result},
    resources::AssetLoader,
};

struct Inner<K, L: AssetLoader<K>> {
    loader: L,
    entries: HashMap<K, Arc<L::Resource>>,
}

/// Get-or-load cache that can be shared between threads.
///
/// Resources are handed out as `Arc`s because a borrow could not outlive the
/// lock guard.
pub struct SharedResourceCache<K, L: AssetLoader<K>> {
    inner: Mutex<Inner<K, L>>,
}

impl<K, L> SharedResourceCache<K, L>
where
    K: Eq + Hash + Clone + Debug,
    L: AssetLoader<K>,
{
    pub fn new(loader: L) -> Self {
        Self {
            inner: Mutex::new(Inner {
                loader,
                entries: HashMap::new(),
            }),
        }
    }

    /// Returns the resource cached under `key`, loading it on first use.
    ///
    /// Loads are serialised: while one key loads, other lookups wait.
    pub fn get_or_load(&self, key: &K) -> Result<Arc<L::Resource>> {
        let mut inner = self.lock();

        if let Some(resource) = inner.entries.get(key) {
            return Ok(Arc::clone(resource));
        }

        if !inner.loader.exists(key) {
            log::warn!("no asset backs {:?}", key);
            return Err(CacheError::not_found(key));
        }

        let start = Instant::now();
        let resource = inner
            .loader
            .load(key)
            .map_err(|e| CacheError::load_failure(key, e))?;
        log::debug!("loaded {:?} in {:?}", key, start.elapsed());

        match inner.entries.entry(key.clone()) {
            Entry::Occupied(occupied) => Err(CacheError::duplicate(occupied.key())),
            Entry::Vacant(vacant) => Ok(Arc::clone(vacant.insert(Arc::new(resource)))),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner<K, L>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            log::warn!("resource cache lock was poisoned by a panicking loader, recovering");
            self.inner.clear_poison();
            PoisonError::into_inner(poisoned)
        })
    }
}
