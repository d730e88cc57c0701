//! Heatmap Core - timeline playback for a crowd density map
//!
//! This crate contains all playback and synchronization logic with zero UI
//! dependencies. Front ends implement the surface traits in [`view`] and
//! drive a [`session::HeatmapSession`].
//!
//! Pipeline, leaves first:
//! - [`store`]: immutable `(location, timestamp, count)` samples
//! - [`timeline`]: sorted distinct timestamps (the playback axis)
//! - [`projector`]: per-timestamp frames with normalized intensities
//! - [`playback`]: PAUSED/PLAYING controller and its timer task
//! - [`view`]: fans each index change out to the display surfaces

pub mod config;
pub mod logging;
pub mod models;
pub mod playback;
pub mod projector;
pub mod session;
pub mod store;
pub mod timeline;
pub mod view;

pub use session::{HeatmapSession, InitOutcome, SessionError, SessionResult};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
