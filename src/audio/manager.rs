use std::path::{Path, PathBuf};

use crate::{
    audio::{PlaybackEngine, PlaybackState, Track},
    config::AudioConfig,
    error::{CacheError, Result},
    resources::{AssetLoader, DerivedCache, ResourceCache, SoundBuffer},
};

/// Plays sound effects and music tracks by path.
///
/// Every path is loaded at most once. Music operations create their track on
/// first use, so `pause_music` on a track that never played is fine: the
/// track is created and left paused.
///
/// Field order is teardown order. Tracks are derived from sound buffers and
/// are dropped first, the engine last.
pub struct AudioManager<L, E>
where
    L: AssetLoader<PathBuf, Resource = SoundBuffer>,
    E: PlaybackEngine,
{
    music_tracks: DerivedCache<PathBuf, Track<E::Instance>>,
    sound_effects: ResourceCache<PathBuf, L>,
    engine: E,
    volume: f32,
}

impl<L, E> AudioManager<L, E>
where
    L: AssetLoader<PathBuf, Resource = SoundBuffer>,
    E: PlaybackEngine,
{
    pub fn new(loader: L, engine: E) -> Self {
        Self::with_config(loader, engine, AudioConfig::default())
    }

    pub fn with_config(loader: L, engine: E, config: AudioConfig) -> Self {
        let mut manager = Self {
            music_tracks: DerivedCache::new(),
            sound_effects: ResourceCache::new(loader),
            engine,
            volume: 0.0,
        };
        manager.set_volume(config.master_volume);
        manager
    }

    /// Sets the master volume, clamped to `[0, 1]`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.engine.set_master_volume(self.volume);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Plays a sound effect once, loading it on first use.
    pub fn play_sound_effect(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let key = path.as_ref().to_path_buf();
        let buffer = self.sound_effects.get_or_load(&key)?;
        self.engine
            .play_one_shot(buffer)
            .map_err(|e| CacheError::load_failure(&key, e))
    }

    pub fn play_music(&mut self, path: impl AsRef<Path>, looped: bool) -> Result<()> {
        self.track(path.as_ref())?.play(looped);
        Ok(())
    }

    pub fn pause_music(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.track(path.as_ref())?.pause();
        Ok(())
    }

    pub fn resume_music(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.track(path.as_ref())?.resume();
        Ok(())
    }

    pub fn stop_music(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.track(path.as_ref())?.stop();
        Ok(())
    }

    /// State of an already created track. `None` if the path was never used
    /// for music.
    pub fn track_state(&self, path: impl AsRef<Path>) -> Option<PlaybackState> {
        self.music_tracks
            .get(&path.as_ref().to_path_buf())
            .map(Track::state)
    }

    /// Stops every track that is playing or paused.
    pub fn stop_all_music(&mut self) {
        for track in self.music_tracks.values_mut() {
            if track.state() != PlaybackState::Stopped {
                track.stop();
            }
        }
    }

    pub fn update(&mut self) {
        self.engine.update();
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn sound_effects(&self) -> &ResourceCache<PathBuf, L> {
        &self.sound_effects
    }

    pub fn music_tracks(&self) -> &DerivedCache<PathBuf, Track<E::Instance>> {
        &self.music_tracks
    }

    fn track(&mut self, path: &Path) -> Result<&mut Track<E::Instance>> {
        let engine = &mut self.engine;
        self.music_tracks
            .get_or_create(&mut self.sound_effects, &path.to_path_buf(), |buffer| {
                Ok(Track::new(engine.create_instance(buffer)?))
            })
    }
}
