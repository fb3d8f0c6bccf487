//! Keyed, lazily populated resource caches and the loaders that feed them.
//!
//! - `cache` holds [`ResourceCache`]: get-or-load, at most one load per key
//! - `derived` holds [`DerivedCache`]: objects built from entries of a `ResourceCache`
//! - `shared` holds [`SharedResourceCache`]: the same contract for concurrent callers
//! - `fs` resolves keys against an asset root and loads raw bytes
//! - `mesh` loads `.obj` / `.gltf` geometry into CPU-side models

pub mod cache;
pub mod derived;
pub mod fs;
pub mod mesh;
pub mod shared;

pub use cache::ResourceCache;
pub use derived::DerivedCache;
pub use fs::{SoundBuffer, SoundLoader};
pub use mesh::ModelLoader;
pub use shared::SharedResourceCache;

/// Anything that can turn a key into a heavyweight resource.
///
/// Caches call [`AssetLoader::exists`] first so a missing asset is reported
/// as [`crate::error::CacheError::ResourceNotFound`] rather than as a load
/// failure.
pub trait AssetLoader<K> {
    type Resource;

    fn exists(&self, key: &K) -> bool;

    fn load(&mut self, key: &K) -> anyhow::Result<Self::Resource>;
}

impl<K, L: AssetLoader<K> + ?Sized> AssetLoader<K> for Box<L> {
    type Resource = L::Resource;

    fn exists(&self, key: &K) -> bool {
        (**self).exists(key)
    }

    fn load(&mut self, key: &K) -> anyhow::Result<Self::Resource> {
        (**self).load(key)
    }
}

impl<K, L: AssetLoader<K> + ?Sized> AssetLoader<K> for &mut L {
    type Resource = L::Resource;

    fn exists(&self, key: &K) -> bool {
        (**self).exists(key)
    }

    fn load(&mut self, key: &K) -> anyhow::Result<Self::Resource> {
        (**self).load(key)
    }
}
