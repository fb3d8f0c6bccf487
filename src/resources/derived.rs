//! Cache of objects derived from the entries of a [`ResourceCache`].
//!
//! A derived entry (e.g. a playable instance) is created from a base resource
//! (e.g. a decoded sound buffer) the first time its key is requested. The base
//! is resolved through the base cache first, so it is loaded on demand too.
//!
//! Derived entries must not outlive their base. Nothing is ever evicted, so
//! the only way to break that is teardown order: owners declare their
//! `DerivedCache` field before the `ResourceCache` it derives from, which makes
//! Rust drop the derived entries first.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt::Debug,
    hash::Hash,
};

use crate::{
    error::{CacheError, Result},
    resources::{AssetLoader, ResourceCache},
};

/// Maps keys to objects built from the base resource stored under the same key.
pub struct DerivedCache<K, D> {
    entries: HashMap<K, D>,
}

impl<K, D> DerivedCache<K, D>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the derived entry for `key`, creating it on first use.
    ///
    /// On a miss the base resource is resolved with
    /// [`ResourceCache::get_or_load`] and handed to `create`. Base failures are
    /// returned unchanged; a failing `create` becomes a
    /// [`CacheError::LoadFailure`]. Either way nothing is inserted.
    pub fn get_or_create<L, F>(
        &mut self,
        base: &mut ResourceCache<K, L>,
        key: &K,
        create: F,
    ) -> Result<&mut D>
    where
        L: AssetLoader<K>,
        F: FnOnce(&L::Resource) -> anyhow::Result<D>,
    {
        if self.entries.contains_key(key) {
            return self
                .entries
                .get_mut(key)
                .ok_or_else(|| CacheError::not_found(key));
        }

        let resource = base.get_or_load(key)?;
        let derived = create(resource).map_err(|e| CacheError::load_failure(key, e))?;
        log::debug!("created derived entry for {:?}", key);
        self.insert(key.clone(), derived)
    }

    pub fn get(&self, key: &K) -> Option<&D> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut D> {
        self.entries.get_mut(key)
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

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut D> {
        self.entries.values_mut()
    }

    fn insert(&mut self, key: K, derived: D) -> Result<&mut D> {
        match self.entries.entry(key) {
            Entry::Occupied(occupied) => Err(CacheError::duplicate(occupied.key())),
            Entry::Vacant(vacant) => Ok(vacant.insert(derived)),
        }
    }
}

impl<K, D> Default for DerivedCache<K, D>
where
    K: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, D> Debug for DerivedCache<K, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedCache")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
