//! Data models for the crowd heatmap.
//!
//! This module contains the core data structures shared by every component:
//! - Location identity and catalogue entries
//! - Samples (one crowd count at one location and instant)
//! - Frames (the derived per-timestamp snapshot used for one render)
//! - Enums for playback status and intensity normalization

mod enums;
mod frame;
mod sample;

// Re-export all public types
pub use enums::{Normalization, PlaybackStatus};
pub use frame::{Frame, HeatPoint};
pub use sample::{Location, LocationId, Sample};
