//! Plain configuration values with sensible defaults.

use std::path::PathBuf;

/// Where file-system loaders look for assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Every asset key is resolved relative to this directory.
    pub root: PathBuf,
}

impl AssetConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./").join("assets"),
        }
    }
}

/// Initial audio settings applied when an [`crate::audio::AudioManager`] is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioConfig {
    /// Master volume in `[0, 1]`. Out of range values are clamped.
    pub master_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { master_volume: 0.5 }
    }
}
