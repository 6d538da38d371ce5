use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Instant, Sleep, sleep};

use crate::types::EpisodeId;

/// How long a toast stays on screen before closing itself.
pub const AUTO_CLOSE_DELAY: Duration = Duration::from_millis(5_000);

/// Pending auto-close for one episode.
///
/// Dropping the timer cancels it; nothing fires afterwards.
#[derive(Debug)]
pub struct AutoCloseTimer {
    episode: EpisodeId,
    sleep: Pin<Box<Sleep>>,
}

impl AutoCloseTimer {
    pub fn schedule(episode: EpisodeId, delay: Duration) -> Self {
        Self {
            episode,
            sleep: Box::pin(sleep(delay)),
        }
    }

    pub const fn episode(&self) -> EpisodeId {
        self.episode
    }

    pub fn deadline(&self) -> Instant {
        self.sleep.deadline()
    }

    /// Resolves once the delay has elapsed. Cancel safe.
    pub async fn expired(&mut self) -> EpisodeId {
        self.sleep.as_mut().await;
        self.episode
    }

    pub fn cancel(self) {
        drop(self);
    }
}
