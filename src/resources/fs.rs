//! File-system asset access.
//!
//! Keys are paths relative to [`AssetConfig::root`]. Absolute keys are used
//! as-is. Decoding is left to whoever consumes the bytes.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{config::AssetConfig, resources::AssetLoader};

/// Resolves `file_name` against the asset root.
pub fn resolve(config: &AssetConfig, file_name: &Path) -> PathBuf {
    if file_name.is_absolute() {
        file_name.to_path_buf()
    } else {
        config.root.join(file_name)
    }
}

pub fn load_binary(config: &AssetConfig, file_name: &Path) -> anyhow::Result<Vec<u8>> {
    let path = resolve(config, file_name);
    std::fs::read(&path).with_context(|| format!("reading {}", path.display()))
}

pub fn load_string(config: &AssetConfig, file_name: &Path) -> anyhow::Result<String> {
    let path = resolve(config, file_name);
    std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

/// Encoded audio as read from disk. The playback engine decodes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundBuffer {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl SoundBuffer {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

/// Loads [`SoundBuffer`]s from the asset directory.
#[derive(Clone, Debug, Default)]
pub struct SoundLoader {
    config: AssetConfig,
}

impl SoundLoader {
    pub fn new(config: AssetConfig) -> Self {
        Self { config }
    }
}

impl AssetLoader<PathBuf> for SoundLoader {
    type Resource = SoundBuffer;

    fn exists(&self, key: &PathBuf) -> bool {
        resolve(&self.config, key).is_file()
    }

    fn load(&mut self, key: &PathBuf) -> anyhow::Result<SoundBuffer> {
        let bytes = load_binary(&self.config, key)?;
        if bytes.is_empty() {
            anyhow::bail!("{} is empty", key.display());
        }
        Ok(SoundBuffer::new(key.clone(), bytes))
    }
}
