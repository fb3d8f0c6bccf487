//! Audio playback on top of the resource caches.
//!
//! Sound buffers are cached per path in a [`crate::resources::ResourceCache`].
//! Music tracks are playable instances derived from those buffers and cached
//! per path in a [`crate::resources::DerivedCache`]. Decoding, mixing and
//! output belong to the [`PlaybackEngine`].

use crate::resources::SoundBuffer;

pub mod headless;
pub mod manager;
pub mod track;

pub use headless::HeadlessEngine;
pub use manager::AudioManager;
pub use track::{PlaybackState, Track};

/// A playable voice created from a sound buffer.
pub trait PlaybackInstance {
    fn play(&mut self, looped: bool);
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
}

/// The native audio engine.
pub trait PlaybackEngine {
    type Instance: PlaybackInstance;

    /// Creates a voice that can be played, paused and resumed repeatedly.
    fn create_instance(&mut self, buffer: &SoundBuffer) -> anyhow::Result<Self::Instance>;

    /// Plays `buffer` once without keeping a handle to it.
    fn play_one_shot(&mut self, buffer: &SoundBuffer) -> anyhow::Result<()>;

    fn set_master_volume(&mut self, volume: f32);

    /// Pumps the engine; called once per frame.
    fn update(&mut self);
}
