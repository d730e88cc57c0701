//! Configuration management for the crowd heatmap.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use heatmap_core::config::{ConfigManager, ConfigSection};
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new("heatmap.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Interval: {} ms", config.settings().playback.interval_ms);
//!
//! // Modify a setting
//! config.settings_mut().playback.autoplay = true;
//!
//! // Save just the playback section atomically
//! config.update_section(ConfigSection::Playback).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, LoggingSettings, PlaybackSettings, RenderSettings, Settings};
