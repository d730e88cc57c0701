//! Display surface capabilities.
//!
//! Each surface is a narrow trait implemented by the front end. Every
//! surface except the map is optional; the synchronizer skips whatever is
//! not attached.

use super::heat_layer::HeatLayerOptions;
use crate::models::LocationId;

/// Map with a heat layer.
pub trait MapSurface: Send {
    /// Replace the heat points with `(lat, lng, intensity)` triples.
    fn set_points(&mut self, points: &[(f64, f64, f64)]);

    /// Apply radius, blur, zoom and gradient settings.
    fn configure(&mut self, options: &HeatLayerOptions);
}

/// Any text label showing the current slot time.
pub trait TimeLabelSurface: Send {
    fn set_text(&mut self, text: &str);
}

/// Position slider spanning `[0, max]`.
pub trait SliderSurface: Send {
    fn set_max(&mut self, max: usize);
    fn set_position(&mut self, index: usize);
}

/// Table with one row per location and a mutable count cell.
pub trait CountTableSurface: Send {
    /// Location ids of the rows currently in the table.
    fn row_ids(&self) -> Vec<LocationId>;

    fn set_count(&mut self, location_id: &LocationId, text: &str);
}

/// Play/pause toggle and step buttons.
pub trait TransportSurface: Send {
    /// Label of the play/pause toggle.
    fn set_toggle_label(&mut self, label: &str);
}

/// Selector listing the locations for the chart.
pub trait LocationSelectSurface: Send {
    fn set_options(&mut self, options: &[(LocationId, String)]);
    fn set_selected(&mut self, location_id: &LocationId);
}

/// One labelled line series.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

/// Line chart canvas.
///
/// `clear` discards the previous chart instance; the synchronizer always
/// clears before drawing again.
pub trait ChartSurface: Send {
    fn clear(&mut self);
    fn draw(&mut self, chart: &LineChart);
}

/// Everything the front end attached.
#[derive(Default)]
pub struct ViewSurfaces {
    pub map: Option<Box<dyn MapSurface>>,
    pub time_labels: Vec<Box<dyn TimeLabelSurface>>,
    pub slider: Option<Box<dyn SliderSurface>>,
    pub table: Option<Box<dyn CountTableSurface>>,
    pub transport: Option<Box<dyn TransportSurface>>,
    pub location_select: Option<Box<dyn LocationSelectSurface>>,
    pub chart: Option<Box<dyn ChartSurface>>,
}

impl ViewSurfaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map(mut self, map: impl MapSurface + 'static) -> Self {
        self.map = Some(Box::new(map));
        self
    }

    pub fn with_time_label(mut self, label: impl TimeLabelSurface + 'static) -> Self {
        self.time_labels.push(Box::new(label));
        self
    }

    pub fn with_slider(mut self, slider: impl SliderSurface + 'static) -> Self {
        self.slider = Some(Box::new(slider));
        self
    }

    pub fn with_table(mut self, table: impl CountTableSurface + 'static) -> Self {
        self.table = Some(Box::new(table));
        self
    }

    pub fn with_transport(mut self, transport: impl TransportSurface + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    pub fn with_location_select(mut self, select: impl LocationSelectSurface + 'static) -> Self {
        self.location_select = Some(Box::new(select));
        self
    }

    pub fn with_chart(mut self, chart: impl ChartSurface + 'static) -> Self {
        self.chart = Some(Box::new(chart));
        self
    }

    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }
}

impl std::fmt::Debug for ViewSurfaces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewSurfaces")
            .field("map", &self.map.is_some())
            .field("time_labels", &self.time_labels.len())
            .field("slider", &self.slider.is_some())
            .field("table", &self.table.is_some())
            .field("transport", &self.transport.is_some())
            .field("location_select", &self.location_select.is_some())
            .field("chart", &self.chart.is_some())
            .finish()
    }
}
