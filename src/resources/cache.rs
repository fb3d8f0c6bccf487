//! Get-or-load cache owning one resource per key.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt::Debug,
    hash::Hash,
};

use instant::Instant;

use crate::{
    error::{CacheError, Result},
    resources::AssetLoader,
};

/// Maps keys to resources loaded through `L`.
///
/// The cache is the sole owner of every resource. Callers only ever borrow
/// them, and the borrow checker keeps those borrows from outliving the cache.
/// There is no eviction: entries live until the cache is dropped.
///
/// A key is loaded at most once. Failed loads leave nothing behind, so the
/// same key can be retried once the asset is fixed.
pub struct ResourceCache<K, L: AssetLoader<K>> {
    loader: L,
    entries: HashMap<K, L::Resource>,
}

impl<K, L> ResourceCache<K, L>
where
    K: Eq + Hash + Clone + Debug,
    L: AssetLoader<K>,
{
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            entries: HashMap::new(),
        }
    }

    /// Returns the resource cached under `key`, loading it on first use.
    ///
    /// The first call for a key pays for the load; every later call is a
    /// plain lookup returning the very same resource.
    pub fn get_or_load(&mut self, key: &K) -> Result<&L::Resource> {
        if self.entries.contains_key(key) {
            log::trace!("cache hit for {:?}", key);
            return self.entries.get(key).ok_or_else(|| CacheError::not_found(key));
        }
        self.load(key)
    }

    /// Looks `key` up without loading it.
    pub fn get(&self, key: &K) -> Option<&L::Resource> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    fn load(&mut self, key: &K) -> Result<&L::Resource> {
        if !self.loader.exists(key) {
            log::warn!("no asset backs {:?}", key);
            return Err(CacheError::not_found(key));
        }

        let start = Instant::now();
        let resource = self
            .loader
            .load(key)
            .map_err(|e| CacheError::load_failure(key, e))?;
        log::debug!("loaded {:?} in {:?}", key, start.elapsed());

        self.insert(key.clone(), resource)
    }

    /// Inserts a freshly loaded resource. Cached resources are never replaced.
    fn insert(&mut self, key: K, resource: L::Resource) -> Result<&L::Resource> {
        match self.entries.entry(key) {
            Entry::Occupied(occupied) => Err(CacheError::duplicate(occupied.key())),
            Entry::Vacant(vacant) => Ok(vacant.insert(resource)),
        }
    }
}

impl<K, L> Debug for ResourceCache<K, L>
where
    K: Debug,
    L: AssetLoader<K>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
