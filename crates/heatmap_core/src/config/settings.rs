//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::Normalization;
use crate::view::{is_valid_time_format, HeatLayerOptions, TimeFormatter, DEFAULT_TIME_FORMAT};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Autoplay cadence and start behaviour.
    #[serde(default)]
    pub playback: PlaybackSettings,

    /// Frame normalization and label formatting.
    #[serde(default)]
    pub render: RenderSettings,

    /// Heat-layer appearance.
    #[serde(default)]
    pub heat_layer: HeatLayerOptions,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Replace out-of-range values with defaults.
    ///
    /// Returns true if anything was changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;

        if self.playback.interval_ms == 0 {
            tracing::warn!(
                "playback.interval_ms must be positive; using {}",
                default_interval_ms()
            );
            self.playback.interval_ms = default_interval_ms();
            changed = true;
        }

        if !is_valid_time_format(&self.render.time_format) {
            tracing::warn!(
                "render.time_format {:?} is not a valid strftime pattern; using {:?}",
                self.render.time_format,
                DEFAULT_TIME_FORMAT
            );
            self.render.time_format = default_time_format();
            changed = true;
        }

        let before = self.heat_layer.gradient.len();
        self.heat_layer
            .gradient
            .retain(|g| (0.0..=1.0).contains(&g.stop));
        if self.heat_layer.gradient.len() != before {
            tracing::warn!("Dropped gradient stops outside [0, 1]");
            changed = true;
        }
        if self.heat_layer.gradient.is_empty() {
            self.heat_layer.gradient = HeatLayerOptions::default().gradient;
            changed = true;
        }

        changed
    }
}

/// Playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Milliseconds between autoplay ticks.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Start playing right after initialization.
    #[serde(default)]
    pub autoplay: bool,
}

fn default_interval_ms() -> u64 {
    1200
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            autoplay: false,
        }
    }
}

impl PlaybackSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Reference maximum for heat intensities.
    #[serde(default)]
    pub normalization: Normalization,

    /// Display time zone as minutes east of UTC.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,

    /// `chrono` strftime pattern for time labels.
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Draw the chart for the default location during initialization.
    #[serde(default = "default_true")]
    pub chart_on_init: bool,

    /// Initially selected chart location (first declared if unset).
    #[serde(default)]
    pub default_location: Option<String>,
}

fn default_utc_offset() -> i32 {
    330
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            normalization: Normalization::default(),
            utc_offset_minutes: default_utc_offset(),
            time_format: default_time_format(),
            chart_on_init: true,
            default_location: None,
        }
    }
}

impl RenderSettings {
    pub fn time_formatter(&self) -> TimeFormatter {
        TimeFormatter::new(self.utc_offset_minutes, self.time_format.clone())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Playback,
    Render,
    HeatLayer,
    Logging,
}

impl ConfigSection {
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Playback,
        ConfigSection::Render,
        ConfigSection::HeatLayer,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Playback => "playback",
            ConfigSection::Render => "render",
            ConfigSection::HeatLayer => "heat_layer",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the table in generated files.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Playback => "Autoplay cadence",
            ConfigSection::Render => "Intensity normalization and time labels",
            ConfigSection::HeatLayer => "Heat layer appearance",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}
