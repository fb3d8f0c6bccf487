//! Playback state machine wrapped around an engine instance.

use crate::audio::PlaybackInstance;

/// Where a track is in its lifecycle.
///
/// `started` on [`PlaybackState::Paused`] records whether the instance was ever
/// playing. A track paused before it was played has nothing to resume, so
/// resuming it starts it from the beginning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing {
        looped: bool,
    },
    Paused {
        looped: bool,
        started: bool,
    },
}

/// A cached music track: an engine instance plus its playback state.
#[derive(Debug)]
pub struct Track<I> {
    instance: I,
    state: PlaybackState,
}

impl<I: PlaybackInstance> Track<I> {
    pub fn new(instance: I) -> Self {
        Self {
            instance,
            state: PlaybackState::Stopped,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn instance(&self) -> &I {
        &self.instance
    }

    /// Starts playback from the beginning.
    ///
    /// Playing a track that is already playing or paused restarts it with the
    /// new `looped` flag instead of leaving that choice to the engine.
    pub fn play(&mut self, looped: bool) {
        if self.state != PlaybackState::Stopped {
            self.instance.stop();
        }
        self.instance.play(looped);
        self.state = PlaybackState::Playing { looped };
    }

    /// Pauses playback. Pausing a stopped track is allowed and leaves it
    /// paused; pausing a paused track does nothing.
    pub fn pause(&mut self) {
        match self.state {
            PlaybackState::Playing { looped } => {
                self.instance.pause();
                self.state = PlaybackState::Paused {
                    looped,
                    started: true,
                };
            }
            PlaybackState::Stopped => {
                self.instance.pause();
                self.state = PlaybackState::Paused {
                    looped: false,
                    started: false,
                };
            }
            PlaybackState::Paused { .. } => log::debug!("track is already paused"),
        }
    }

    /// Continues a paused track. Does nothing unless the track is paused.
    pub fn resume(&mut self) {
        match self.state {
            PlaybackState::Paused {
                looped,
                started: true,
            } => {
                self.instance.resume();
                self.state = PlaybackState::Playing { looped };
            }
            PlaybackState::Paused {
                looped,
                started: false,
            } => {
                self.instance.play(looped);
                self.state = PlaybackState::Playing { looped };
            }
            PlaybackState::Stopped | PlaybackState::Playing { .. } => {
                log::warn!("resume ignored, track is {:?}", self.state)
            }
        }
    }

    pub fn stop(&mut self) {
        self.instance.stop();
        self.state = PlaybackState::Stopped;
    }
}
