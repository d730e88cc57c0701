//! Stdout-backed display surfaces.

use heatmap_core::models::LocationId;
use heatmap_core::store::DemoLocation;
use heatmap_core::view::{
    ChartSurface, CountTableSurface, HeatLayerOptions, LineChart, LocationSelectSurface,
    MapSurface, SliderSurface, TimeLabelSurface, TransportSurface, ViewSurfaces,
};

const BAR_WIDTH: usize = 20;

fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

struct TerminalMap;

impl MapSurface for TerminalMap {
    fn set_points(&mut self, points: &[(f64, f64, f64)]) {
        for (lat, lng, weight) in points {
            println!(
                "  heat  [{}] {:.2} @ ({:.4}, {:.4})",
                bar(*weight, BAR_WIDTH),
                weight,
                lat,
                lng
            );
        }
    }

    fn configure(&mut self, options: &HeatLayerOptions) {
        println!("  layer radius={} blur={}", options.radius, options.blur);
    }
}

struct TerminalLabel(&'static str);

impl TimeLabelSurface for TerminalLabel {
    fn set_text(&mut self, text: &str) {
        println!("{:>6}  {}", self.0, text);
    }
}

#[derive(Default)]
struct TerminalSlider {
    max: usize,
}

impl SliderSurface for TerminalSlider {
    fn set_max(&mut self, max: usize) {
        self.max = max;
    }

    fn set_position(&mut self, index: usize) {
        let fraction = if self.max == 0 {
            0.0
        } else {
            index as f64 / self.max as f64
        };
        println!("  slot  [{}] {}/{}", bar(fraction, BAR_WIDTH), index, self.max);
    }
}

struct TerminalTable {
    rows: Vec<(LocationId, String)>,
}

impl CountTableSurface for TerminalTable {
    fn row_ids(&self) -> Vec<LocationId> {
        self.rows.iter().map(|(id, _)| id.clone()).collect()
    }

    fn set_count(&mut self, location_id: &LocationId, text: &str) {
        let name = self
            .rows
            .iter()
            .find(|(id, _)| id == location_id)
            .map(|(_, name)| name.as_str())
            .unwrap_or(location_id.as_str());
        println!("  count {:<16} {:>10}", name, text);
    }
}

struct TerminalTransport;

impl TransportSurface for TerminalTransport {
    fn set_toggle_label(&mut self, label: &str) {
        println!("[{}]", label);
    }
}

struct TerminalSelect;

impl LocationSelectSurface for TerminalSelect {
    fn set_options(&mut self, options: &[(LocationId, String)]) {
        let names: Vec<&str> = options.iter().map(|(_, name)| name.as_str()).collect();
        println!("  locations: {}", names.join(" | "));
    }

    fn set_selected(&mut self, location_id: &LocationId) {
        println!("  selected: {}", location_id);
    }
}

struct TerminalChart;

impl ChartSurface for TerminalChart {
    fn clear(&mut self) {
        println!("  ----");
    }

    fn draw(&mut self, chart: &LineChart) {
        println!("  {}", chart.title);
        let peak = chart.values.iter().copied().max().unwrap_or(0).max(1);
        for (label, value) in chart.labels.iter().zip(&chart.values) {
            println!(
                "  {:>8} [{}] {}",
                label,
                bar(*value as f64 / peak as f64, BAR_WIDTH),
                value
            );
        }
    }
}

/// Every surface, with one table row per demo location.
pub fn surfaces(locations: &[DemoLocation]) -> ViewSurfaces {
    let rows = locations
        .iter()
        .map(|d| (d.location.id.clone(), d.location.name.clone()))
        .collect();

    ViewSurfaces::new()
        .with_map(TerminalMap)
        .with_time_label(TerminalLabel("time"))
        .with_slider(TerminalSlider::default())
        .with_table(TerminalTable { rows })
        .with_transport(TerminalTransport)
        .with_location_select(TerminalSelect)
        .with_chart(TerminalChart)
}
