use std::fmt::{self, Display};

use serde::Serialize;
use uuid::Uuid;

/// Text shown by the toast. Rendered verbatim; empty strings are fine.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToastContent {
    pub title: String,
    pub subtitle: String,
}

impl ToastContent {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Phase {
    #[default]
    Hidden,
    Visible,
}

impl Phase {
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Identifies one visible episode. Time-ordered so logs sort naturally.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EpisodeId(Uuid);

impl EpisodeId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EpisodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// State of one toast instance as published after every transition.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ToastSnapshot {
    pub visible: bool,
    pub expanded: bool,
    pub has_played_audio: bool,
    pub timer_armed: bool,
    pub episodes: u64,
}

#[cfg(test)]
mod tests {
    use super::{EpisodeId, Phase, ToastSnapshot};

    #[test]
    fn only_the_visible_phase_is_visible() {
        assert!(Phase::Visible.is_visible());
        assert!(!Phase::Hidden.is_visible());
        assert_eq!(Phase::default(), Phase::Hidden);
    }

    #[test]
    fn episode_ids_are_unique() {
        assert_ne!(EpisodeId::new(), EpisodeId::new());
    }

    #[test]
    fn default_snapshot_is_hidden_and_compact() {
        let snapshot = ToastSnapshot::default();
        assert!(!snapshot.visible);
        assert!(!snapshot.expanded);
        assert!(!snapshot.has_played_audio);
        assert_eq!(snapshot.episodes, 0);
    }
}
