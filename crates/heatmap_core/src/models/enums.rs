//! Core enums used throughout the crate.

use serde::{Deserialize, Serialize};

/// Run state of the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// Timer inactive; the index only moves on explicit seek/step.
    #[default]
    Paused,
    /// Timer active; the index advances on every tick.
    Playing,
}

impl PlaybackStatus {
    /// Whether the autoplay timer should be running.
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackStatus::Playing)
    }

    /// Glyph shown on the play/pause toggle for this status.
    ///
    /// The button advertises the action it will perform, so a paused
    /// player shows "play" and a running one shows "pause".
    pub fn toggle_glyph(&self) -> &'static str {
        match self {
            PlaybackStatus::Paused => "\u{25B6}",
            PlaybackStatus::Playing => "\u{23F8}",
        }
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackStatus::Paused => write!(f, "paused"),
            PlaybackStatus::Playing => write!(f, "playing"),
        }
    }
}

/// Reference maximum used to turn counts into heat intensities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Divide by the largest count in the frame being rendered.
    #[default]
    PerFrame,
    /// Divide by the largest count anywhere in the store.
    Global,
}

impl std::fmt::Display for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Normalization::PerFrame => write!(f, "per_frame"),
            Normalization::Global => write!(f, "global"),
        }
    }
}
