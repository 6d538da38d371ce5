use std::time::Duration;

use tracing::{debug, trace};

use crate::types::{EpisodeId, Phase};

use super::timer::AutoCloseTimer;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CloseReason {
    /// The auto-close delay elapsed.
    Elapsed,
    /// The caller lowered the trigger first.
    Forced,
    /// The instance was detached.
    Detached,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    Shown(EpisodeId),
    Hidden {
        episode: EpisodeId,
        reason: CloseReason,
    },
    Unchanged,
}

/// Show/hide state machine driven by the caller's trigger and the
/// auto-close timer.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
    trigger: bool,
    episode: Option<EpisodeId>,
    timer: Option<AutoCloseTimer>,
    delay: Duration,
    episodes: u64,
}

impl Lifecycle {
    pub const fn new(delay: Duration) -> Self {
        Self {
            phase: Phase::Hidden,
            trigger: false,
            episode: None,
            timer: None,
            delay,
            episodes: 0,
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub const fn episodes(&self) -> u64 {
        self.episodes
    }

    pub const fn current_episode(&self) -> Option<EpisodeId> {
        self.episode
    }

    /// Feeds a new trigger value. Only edges matter.
    pub fn set_trigger(&mut self, on: bool) -> Transition {
        if on == self.trigger {
            trace!(trigger = on, "trigger unchanged");
            return Transition::Unchanged;
        }
        self.trigger = on;

        match (on, self.phase) {
            (true, Phase::Hidden) => self.show(),
            (false, Phase::Visible) => self.hide(CloseReason::Forced),
            _ => Transition::Unchanged,
        }
    }

    /// Completes the episode whose timer fired. Expiries of an episode that
    /// is no longer current are dropped.
    pub fn elapse(&mut self, episode: EpisodeId) -> Transition {
        if self.phase != Phase::Visible || self.episode != Some(episode) {
            debug!(%episode, "stale auto-close ignored");
            return Transition::Unchanged;
        }
        self.hide(CloseReason::Elapsed)
    }

    pub fn detach(&mut self) -> Transition {
        self.trigger = false;
        if self.phase == Phase::Visible {
            return self.hide(CloseReason::Detached);
        }
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        Transition::Unchanged
    }

    /// Waits for the live timer. Never resolves while no timer is armed.
    pub async fn expired(&mut self) -> EpisodeId {
        match self.timer.as_mut() {
            Some(timer) => timer.expired().await,
            None => std::future::pending().await,
        }
    }

    fn show(&mut self) -> Transition {
        let episode = EpisodeId::new();
        if let Some(previous) = self.timer.take() {
            debug!(previous = %previous.episode(), "superseding auto-close timer");
            previous.cancel();
        }
        self.timer = Some(AutoCloseTimer::schedule(episode, self.delay));
        self.episode = Some(episode);
        self.phase = Phase::Visible;
        self.episodes += 1;
        Transition::Shown(episode)
    }

    fn hide(&mut self, reason: CloseReason) -> Transition {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.phase = Phase::Hidden;
        match self.episode.take() {
            Some(episode) => Transition::Hidden { episode, reason },
            None => Transition::Unchanged,
        }
    }
}
