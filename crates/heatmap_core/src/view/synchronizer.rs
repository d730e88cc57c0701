//! Fans one playback position out to every attached surface.

use std::sync::Arc;

use super::format::{format_count, TimeFormatter};
use super::heat_layer::HeatLayerOptions;
use super::surfaces::{LineChart, ViewSurfaces};
use crate::models::{LocationId, PlaybackStatus};
use crate::playback::{PlaybackEvent, PlaybackObserver};
use crate::projector::{location_series, FrameProjector};
use crate::store::SampleStore;
use crate::timeline::Timeline;

/// Everything one render pushes, computed before any surface is touched.
#[derive(Debug, Clone, PartialEq)]
struct ViewUpdate {
    index: usize,
    points: Vec<(f64, f64, f64)>,
    time_label: String,
    counts: Vec<(LocationId, String)>,
}

/// Pushes frames, labels, counts and chart series to the surfaces.
pub struct ViewSynchronizer {
    store: Arc<SampleStore>,
    timeline: Arc<Timeline>,
    projector: FrameProjector,
    formatter: TimeFormatter,
    heat_layer: HeatLayerOptions,
    surfaces: ViewSurfaces,
    selected_location: Option<LocationId>,
    rendered_index: Option<usize>,
}

impl ViewSynchronizer {
    pub fn new(
        store: Arc<SampleStore>,
        timeline: Arc<Timeline>,
        projector: FrameProjector,
        formatter: TimeFormatter,
        heat_layer: HeatLayerOptions,
        surfaces: ViewSurfaces,
    ) -> Self {
        Self {
            store,
            timeline,
            projector,
            formatter,
            heat_layer,
            surfaces,
            selected_location: None,
            rendered_index: None,
        }
    }

    /// One-time surface setup: slider range, heat-layer options, selector
    /// entries and the paused toggle label.
    pub fn mount(&mut self) {
        if let (Some(slider), Some(last)) = (self.surfaces.slider.as_mut(), self.timeline.last_index())
        {
            slider.set_max(last);
        }
        if let Some(map) = self.surfaces.map.as_mut() {
            map.configure(&self.heat_layer);
        }
        if let Some(select) = self.surfaces.location_select.as_mut() {
            let options: Vec<(LocationId, String)> = self
                .store
                .locations()
                .iter()
                .map(|l| (l.id.clone(), l.name.clone()))
                .collect();
            select.set_options(&options);
            if let Some(selected) = &self.selected_location {
                select.set_selected(selected);
            }
        }
        self.render_status(PlaybackStatus::Paused);
    }

    /// Render the frame at `index` on every surface.
    ///
    /// All values are derived first; surfaces are only written once the
    /// whole update is ready, so a render is never half applied.
    pub fn render_index(&mut self, index: usize) {
        let Some(update) = self.build_update(index) else {
            tracing::debug!("Nothing to render at index {}", index);
            return;
        };
        self.apply(update);
    }

    fn build_update(&self, index: usize) -> Option<ViewUpdate> {
        let timestamp = self.timeline.get(index)?;
        let frame = self.projector.project(self.store.samples(), timestamp);

        let counts = match &self.surfaces.table {
            Some(table) => table
                .row_ids()
                .into_iter()
                .map(|id| {
                    let text = format_count(frame.count_for(id.as_str()));
                    (id, text)
                })
                .collect(),
            None => Vec::new(),
        };

        Some(ViewUpdate {
            index,
            points: frame.weighted_points(),
            time_label: self.formatter.format(timestamp),
            counts,
        })
    }

    fn apply(&mut self, update: ViewUpdate) {
        let surfaces = &mut self.surfaces;

        if let Some(map) = surfaces.map.as_mut() {
            map.set_points(&update.points);
        }
        for label in surfaces.time_labels.iter_mut() {
            label.set_text(&update.time_label);
        }
        if let Some(table) = surfaces.table.as_mut() {
            for (id, text) in &update.counts {
                table.set_count(id, text);
            }
        }
        if let Some(slider) = surfaces.slider.as_mut() {
            slider.set_position(update.index);
        }

        tracing::debug!("Rendered index {} ({})", update.index, update.time_label);
        self.rendered_index = Some(update.index);
    }

    /// Update the play/pause toggle label.
    pub fn render_status(&mut self, status: PlaybackStatus) {
        if let Some(transport) = self.surfaces.transport.as_mut() {
            transport.set_toggle_label(status.toggle_glyph());
        }
    }

    /// Select a location and redraw its chart.
    ///
    /// Unknown ids are ignored and leave the previous selection in place.
    pub fn select_location(&mut self, location_id: &LocationId) -> bool {
        let Some(location) = self.store.location(location_id.as_str()) else {
            tracing::warn!("Ignoring selection of unknown location '{}'", location_id);
            return false;
        };
        let id = location.id.clone();
        if let Some(select) = self.surfaces.location_select.as_mut() {
            select.set_selected(&id);
        }
        self.selected_location = Some(id.clone());
        self.render_chart(&id)
    }

    /// Redraw the line chart for one location across the whole timeline.
    ///
    /// The previous chart is cleared first. Returns whether a chart was drawn.
    pub fn render_chart(&mut self, location_id: &LocationId) -> bool {
        if self.surfaces.chart.is_none() {
            return false;
        }
        let Some(series) = location_series(&self.store, &self.timeline, location_id.as_str())
        else {
            return false;
        };

        let line = LineChart {
            title: format!("Crowd count - {}", series.name),
            labels: series
                .points
                .iter()
                .map(|(ts, _)| self.formatter.format(*ts))
                .collect(),
            values: series.points.iter().map(|(_, count)| *count).collect(),
        };

        if let Some(chart) = self.surfaces.chart.as_mut() {
            chart.clear();
            chart.draw(&line);
        }
        true
    }

    /// Reconfigure the heat layer for a new map zoom level.
    pub fn apply_zoom(&mut self, zoom: u8) {
        let options = self.heat_layer.at_zoom(zoom);
        if let Some(map) = self.surfaces.map.as_mut() {
            map.configure(&options);
        }
        self.heat_layer = options;
    }

    pub fn selected_location(&self) -> Option<&LocationId> {
        self.selected_location.as_ref()
    }

    /// Index of the last completed render.
    pub fn rendered_index(&self) -> Option<usize> {
        self.rendered_index
    }

    pub fn heat_layer(&self) -> &HeatLayerOptions {
        &self.heat_layer
    }

    /// Set the initial selection without drawing.
    pub fn preselect(&mut self, location_id: LocationId) {
        self.selected_location = Some(location_id);
    }
}

impl PlaybackObserver for ViewSynchronizer {
    fn on_playback_event(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::IndexChanged { index } => self.render_index(index),
            PlaybackEvent::StatusChanged(status) => self.render_status(status),
        }
    }

    fn on_location_selected(&mut self, location_id: &LocationId) {
        self.select_location(location_id);
    }

    fn on_zoom_changed(&mut self, zoom: u8) {
        self.apply_zoom(zoom);
    }
}

impl std::fmt::Debug for ViewSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewSynchronizer")
            .field("timeline_len", &self.timeline.len())
            .field("surfaces", &self.surfaces)
            .field("selected_location", &self.selected_location)
            .field("rendered_index", &self.rendered_index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, Normalization, Sample};
    use crate::view::{
        ChartSurface, CountTableSurface, LocationSelectSurface, MapSurface, SliderSurface,
        TimeLabelSurface, TransportSurface,
    };
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;

    /// Shared log of every surface call, in order.
    #[derive(Clone, Default)]
    struct Calls(Arc<Mutex<Vec<String>>>);

    impl Calls {
        fn push(&self, call: String) {
            self.0.lock().push(call);
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.lock())
        }
    }

    struct Map(Calls);
    impl MapSurface for Map {
        fn set_points(&mut self, points: &[(f64, f64, f64)]) {
            let weights: Vec<String> = points.iter().map(|p| format!("{}", p.2)).collect();
            self.0.push(format!("map.points [{}]", weights.join(", ")));
        }
        fn configure(&mut self, options: &HeatLayerOptions) {
            self.0
                .push(format!("map.configure {}/{}", options.radius, options.blur));
        }
    }

    struct Label(&'static str, Calls);
    impl TimeLabelSurface for Label {
        fn set_text(&mut self, text: &str) {
            self.1.push(format!("{}.text {}", self.0, text));
        }
    }

    struct Slider(Calls);
    impl SliderSurface for Slider {
        fn set_max(&mut self, max: usize) {
            self.0.push(format!("slider.max {}", max));
        }
        fn set_position(&mut self, index: usize) {
            self.0.push(format!("slider.pos {}", index));
        }
    }

    struct Table(Vec<&'static str>, Calls);
    impl CountTableSurface for Table {
        fn row_ids(&self) -> Vec<LocationId> {
            self.0.iter().map(|id| LocationId::from(*id)).collect()
        }
        fn set_count(&mut self, location_id: &LocationId, text: &str) {
            self.1.push(format!("table.{} {}", location_id, text));
        }
    }

    struct Transport(Calls);
    impl TransportSurface for Transport {
        fn set_toggle_label(&mut self, label: &str) {
            self.0.push(format!("transport {}", label));
        }
    }

    struct Select(Calls);
    impl LocationSelectSurface for Select {
        fn set_options(&mut self, options: &[(LocationId, String)]) {
            self.0.push(format!("select.options {}", options.len()));
        }
        fn set_selected(&mut self, location_id: &LocationId) {
            self.0.push(format!("select.selected {}", location_id));
        }
    }

    struct Chart(Calls);
    impl ChartSurface for Chart {
        fn clear(&mut self) {
            self.0.push("chart.clear".to_string());
        }
        fn draw(&mut self, chart: &LineChart) {
            self.0.push(format!(
                "chart.draw {} {:?}",
                chart.title, chart.values
            ));
        }
    }

    fn store() -> Arc<SampleStore> {
        let a = Location::new("A", "Alpha", 1.0, 1.0);
        let b = Location::new("B", "Beta", 2.0, 2.0);
        let t0 = Utc.with_ymd_and_hms(2025, 9, 8, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 9, 8, 2, 0, 0).unwrap();
        let samples = vec![
            Sample::at(&a, t0, 100),
            Sample::at(&b, t0, 50),
            Sample::at(&a, t1, 0),
            Sample::at(&b, t1, 123_456),
        ];
        Arc::new(SampleStore::new(vec![a, b], samples).unwrap())
    }

    fn synchronizer(surfaces: ViewSurfaces) -> ViewSynchronizer {
        let store = store();
        let timeline = Arc::new(Timeline::build(store.samples()));
        let projector = FrameProjector::new(Normalization::PerFrame, &store);
        ViewSynchronizer::new(
            store,
            timeline,
            projector,
            TimeFormatter::new(0, "%H:%M"),
            HeatLayerOptions::default(),
            surfaces,
        )
    }

    fn full_surfaces(calls: &Calls) -> ViewSurfaces {
        ViewSurfaces::new()
            .with_map(Map(calls.clone()))
            .with_time_label(Label("label", calls.clone()))
            .with_time_label(Label("tab", calls.clone()))
            .with_slider(Slider(calls.clone()))
            .with_table(Table(vec!["A", "B", "C"], calls.clone()))
            .with_transport(Transport(calls.clone()))
            .with_location_select(Select(calls.clone()))
            .with_chart(Chart(calls.clone()))
    }

    #[test]
    fn render_updates_every_surface() {
        let calls = Calls::default();
        let mut sync = synchronizer(full_surfaces(&calls));

        sync.render_index(0);
        assert_eq!(
            calls.take(),
            vec![
                "map.points [1, 0.5]",
                "label.text 00:00",
                "tab.text 00:00",
                "table.A 100",
                "table.B 50",
                "table.C 0",
                "slider.pos 0",
            ]
        );
        assert_eq!(sync.rendered_index(), Some(0));
    }

    #[test]
    fn counts_use_indian_grouping() {
        let calls = Calls::default();
        let mut sync = synchronizer(full_surfaces(&calls));
        sync.render_index(1);
        assert!(calls.take().contains(&"table.B 1,23,456".to_string()));
    }

    #[test]
    fn missing_surfaces_are_skipped() {
        let calls = Calls::default();
        let mut sync = synchronizer(ViewSurfaces::new().with_slider(Slider(calls.clone())));
        sync.render_index(1);
        sync.render_status(PlaybackStatus::Playing);
        assert!(!sync.render_chart(&LocationId::from("A")));
        assert_eq!(calls.take(), vec!["slider.pos 1"]);
    }

    #[test]
    fn out_of_range_index_renders_nothing() {
        let calls = Calls::default();
        let mut sync = synchronizer(full_surfaces(&calls));
        sync.render_index(9);
        assert!(calls.take().is_empty());
        assert_eq!(sync.rendered_index(), None);
    }

    #[test]
    fn mount_configures_once() {
        let calls = Calls::default();
        let mut sync = synchronizer(full_surfaces(&calls));
        sync.preselect(LocationId::from("B"));
        sync.mount();
        assert_eq!(
            calls.take(),
            vec![
                "slider.max 1",
                "map.configure 150/100",
                "select.options 2",
                "select.selected B",
                "transport ▶",
            ]
        );
    }

    #[test]
    fn chart_is_cleared_before_redraw() {
        let calls = Calls::default();
        let mut sync = synchronizer(full_surfaces(&calls));

        assert!(sync.select_location(&LocationId::from("A")));
        assert!(sync.select_location(&LocationId::from("B")));
        assert_eq!(
            calls.take(),
            vec![
                "select.selected A",
                "chart.clear",
                "chart.draw Crowd count - Alpha [100, 0]",
                "select.selected B",
                "chart.clear",
                "chart.draw Crowd count - Beta [50, 123456]",
            ]
        );
        assert_eq!(sync.selected_location().map(|l| l.as_str()), Some("B"));
    }

    #[test]
    fn unknown_selection_keeps_previous() {
        let calls = Calls::default();
        let mut sync = synchronizer(full_surfaces(&calls));
        sync.select_location(&LocationId::from("A"));
        calls.take();

        assert!(!sync.select_location(&LocationId::from("nowhere")));
        assert!(calls.take().is_empty());
        assert_eq!(sync.selected_location().map(|l| l.as_str()), Some("A"));
    }

    #[test]
    fn playback_events_drive_rendering() {
        let calls = Calls::default();
        let mut sync = synchronizer(full_surfaces(&calls));

        sync.on_playback_event(PlaybackEvent::StatusChanged(PlaybackStatus::Playing));
        sync.on_zoom_changed(15);
        assert_eq!(calls.take(), vec!["transport ⏸", "map.configure 80/60"]);
        assert_eq!(sync.heat_layer().radius, 80);

        sync.on_playback_event(PlaybackEvent::IndexChanged { index: 1 });
        assert_eq!(sync.rendered_index(), Some(1));
    }
}
