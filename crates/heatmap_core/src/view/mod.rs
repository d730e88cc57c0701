//! View synchronization.
//!
//! This module provides:
//! - Capability traits for every display surface (all optional)
//! - Heat-layer options and the zoom-to-radius rule
//! - Human formatting for time labels and counts
//! - The [`ViewSynchronizer`], which fans one index change out to all
//!   attached surfaces and redraws the per-location chart on request

mod format;
mod heat_layer;
mod surfaces;
mod synchronizer;

pub use format::{format_count, is_valid_time_format, TimeFormatter, DEFAULT_TIME_FORMAT};
pub use heat_layer::{radius_blur_for_zoom, GradientStop, HeatLayerOptions};
pub use surfaces::{
    ChartSurface, CountTableSurface, LineChart, LocationSelectSurface, MapSurface, SliderSurface,
    TimeLabelSurface, TransportSurface, ViewSurfaces,
};
pub use synchronizer::ViewSynchronizer;
