//! Playback: the sole owner of the current timeline position.
//!
//! - [`PlaybackController`] is the synchronous PAUSED/PLAYING state machine.
//! - [`spawn_player`] runs a controller inside a single tokio task that owns
//!   the autoplay timer and serializes every command, so timer ticks and
//!   user actions never interleave.

mod controller;
mod player;

pub use controller::{PlaybackController, PlaybackEvent, PlaybackObserver, PlaybackState};
pub use player::{spawn_player, PlayerCommand, PlayerHandle, DEFAULT_INTERVAL};
