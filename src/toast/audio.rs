use tracing::{debug, warn};

use crate::error::AudioError;
use crate::types::EpisodeId;

/// A loaded sound cue.
pub trait CuePlayer: Send {
    /// Rewinds the cue and starts it. Returns once playback was requested,
    /// not when it finishes.
    fn play_from_start(&mut self) -> Result<(), AudioError>;

    fn stop(&mut self);
}

/// Acquires the cue when a toast is attached.
pub trait CueLoader: Send {
    fn load(&self) -> Result<Box<dyn CuePlayer>, AudioError>;
}

/// Plays the cue at most once per visible episode.
pub struct AudioGate {
    player: Option<Box<dyn CuePlayer>>,
    played: bool,
}

impl AudioGate {
    /// Loads the cue. A failed load leaves the gate without a resource;
    /// episodes then run silently.
    pub fn attach(loader: Option<&dyn CueLoader>) -> Self {
        let player = loader.and_then(|loader| match loader.load() {
            Ok(player) => Some(player),
            Err(err) => {
                warn!(error = %err, "sound cue unavailable, toasts will be silent");
                None
            }
        });
        Self {
            player,
            played: false,
        }
    }

    pub const fn has_played(&self) -> bool {
        self.played
    }

    pub const fn is_loaded(&self) -> bool {
        self.player.is_some()
    }

    /// Called when an episode starts. Returns whether playback was attempted.
    pub fn on_episode_start(&mut self, episode: EpisodeId) -> bool {
        if self.played {
            return false;
        }
        let Some(player) = self.player.as_mut() else {
            debug!(%episode, "no sound cue loaded");
            return false;
        };
        if let Err(err) = player.play_from_start() {
            warn!(%episode, error = %err, "sound cue playback failed");
        }
        self.played = true;
        true
    }

    pub const fn reset(&mut self) {
        self.played = false;
    }

    /// Hands the cue over for release and clears the flag. The gate runs
    /// silently afterwards.
    pub fn take_player(&mut self) -> Option<Box<dyn CuePlayer>> {
        self.played = false;
        self.player.take()
    }

    /// Stops any playback and drops the cue.
    pub fn release(&mut self) {
        if let Some(player) = self.take_player() {
            release(player);
        }
    }
}

impl Drop for AudioGate {
    fn drop(&mut self) {
        self.release();
    }
}

/// Stops the cue and drops it. May block on the audio backend.
pub fn release(mut player: Box<dyn CuePlayer>) {
    player.stop();
    drop(player);
}
