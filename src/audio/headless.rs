//! A playback engine without an audio device.
//!
//! Useful for dedicated servers, tools and tests: everything the core asks
//! for is accepted and recorded, nothing is heard.

use std::{cell::Cell, rc::Rc};

use crate::{
    audio::{PlaybackEngine, PlaybackInstance},
    resources::SoundBuffer,
};

#[derive(Debug, Default)]
pub struct HeadlessEngine {
    master_volume: f32,
    instances_created: usize,
    one_shots: usize,
    updates: usize,
    playing: Rc<Cell<usize>>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn instances_created(&self) -> usize {
        self.instances_created
    }

    pub fn one_shots(&self) -> usize {
        self.one_shots
    }

    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Number of instances currently playing.
    pub fn playing(&self) -> usize {
        self.playing.get()
    }
}

impl PlaybackEngine for HeadlessEngine {
    type Instance = HeadlessInstance;

    fn create_instance(&mut self, buffer: &SoundBuffer) -> anyhow::Result<HeadlessInstance> {
        self.instances_created += 1;
        log::trace!("headless instance for {}", buffer.path.display());
        Ok(HeadlessInstance {
            playing: false,
            looped: false,
            active: Rc::clone(&self.playing),
        })
    }

    fn play_one_shot(&mut self, buffer: &SoundBuffer) -> anyhow::Result<()> {
        self.one_shots += 1;
        log::trace!("headless one-shot {}", buffer.path.display());
        Ok(())
    }

    fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume;
    }

    fn update(&mut self) {
        self.updates += 1;
    }
}

#[derive(Debug)]
pub struct HeadlessInstance {
    playing: bool,
    looped: bool,
    active: Rc<Cell<usize>>,
}

impl HeadlessInstance {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    fn set_playing(&mut self, playing: bool) {
        if playing != self.playing {
            let active = self.active.get();
            self.active
                .set(if playing { active + 1 } else { active.saturating_sub(1) });
        }
        self.playing = playing;
    }
}

impl PlaybackInstance for HeadlessInstance {
    fn play(&mut self, looped: bool) {
        self.looped = looped;
        self.set_playing(true);
    }

    fn pause(&mut self) {
        self.set_playing(false);
    }

    fn resume(&mut self) {
        self.set_playing(true);
    }

    fn stop(&mut self) {
        self.set_playing(false);
    }
}

impl Drop for HeadlessInstance {
    fn drop(&mut self) {
        self.set_playing(false);
    }
}
