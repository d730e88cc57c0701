//! Frame projector.
//!
//! Pure derivation of a [`Frame`] from `(samples, timestamp)`. Selection is
//! an exact timestamp match; counts are divided by the frame's own peak
//! (floored at 1) unless global normalization is configured.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{Frame, HeatPoint, LocationId, Normalization, Sample};
use crate::store::SampleStore;
use crate::timeline::Timeline;

/// Project one frame using per-frame normalization.
pub fn project(samples: &[Sample], timestamp: DateTime<Utc>) -> Frame {
    project_with_max(samples, timestamp, None)
}

/// Project with an optional fixed reference maximum.
///
/// `None` means the frame's own peak is used.
fn project_with_max(
    samples: &[Sample],
    timestamp: DateTime<Utc>,
    reference_max: Option<u64>,
) -> Frame {
    let selected: Vec<&Sample> = samples.iter().filter(|s| s.timestamp == timestamp).collect();

    let peak = selected.iter().map(|s| s.count).max().unwrap_or(0);
    let max_count = reference_max.unwrap_or(peak).max(1);

    let points = selected
        .iter()
        .map(|s| HeatPoint {
            location_id: s.location_id.clone(),
            lat: s.lat,
            lng: s.lng,
            intensity: (s.count as f64 / max_count as f64).min(1.0),
        })
        .collect();

    let per_location_count: BTreeMap<LocationId, u64> = selected
        .iter()
        .map(|s| (s.location_id.clone(), s.count))
        .collect();

    Frame {
        timestamp,
        max_count,
        points,
        per_location_count,
    }
}

/// Projector bound to a normalization policy.
#[derive(Debug, Clone, Copy)]
pub struct FrameProjector {
    normalization: Normalization,
    global_max: u64,
}

impl FrameProjector {
    pub fn new(normalization: Normalization, store: &SampleStore) -> Self {
        Self {
            normalization,
            global_max: store.global_max(),
        }
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn project(&self, samples: &[Sample], timestamp: DateTime<Utc>) -> Frame {
        match self.normalization {
            Normalization::PerFrame => project_with_max(samples, timestamp, None),
            Normalization::Global => project_with_max(samples, timestamp, Some(self.global_max)),
        }
    }
}

/// Full time series of one location, one point per timeline slot.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSeries {
    pub location_id: LocationId,
    pub name: String,
    pub points: Vec<(DateTime<Utc>, u64)>,
}

/// Extract a location's counts across the whole timeline.
///
/// Returns `None` for a location the store does not declare. Slots without
/// a sample read as zero.
pub fn location_series(
    store: &SampleStore,
    timeline: &Timeline,
    location_id: &str,
) -> Option<LocationSeries> {
    let location = store.location(location_id)?;
    let series = store.series_for(location_id);

    let points = timeline
        .iter()
        .map(|slot| {
            let count = series
                .iter()
                .find(|s| s.timestamp == slot)
                .map(|s| s.count)
                .unwrap_or(0);
            (slot, count)
        })
        .collect();

    Some(LocationSeries {
        location_id: location.id.clone(),
        name: location.name.clone(),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use chrono::TimeZone;

    fn t(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 8, hour, 0, 0).unwrap()
    }

    fn two_locations() -> (Location, Location) {
        (
            Location::new("A", "A", 23.18, 75.76),
            Location::new("B", "B", 23.20, 75.77),
        )
    }

    #[test]
    fn normalizes_against_frame_peak() {
        let (a, b) = two_locations();
        let samples = vec![Sample::at(&a, t(0), 100), Sample::at(&b, t(0), 50)];

        let frame = project(&samples, t(0));
        assert_eq!(frame.max_count, 100);
        let intensities: Vec<(&str, f64)> = frame
            .points
            .iter()
            .map(|p| (p.location_id.as_str(), p.intensity))
            .collect();
        assert_eq!(intensities, vec![("A", 1.0), ("B", 0.5)]);
        assert_eq!(frame.count_for("A"), 100);
        assert_eq!(frame.count_for("B"), 50);
    }

    #[test]
    fn all_zero_counts_use_floor_of_one() {
        let (a, b) = two_locations();
        let samples = vec![Sample::at(&a, t(0), 0), Sample::at(&b, t(0), 0)];

        let frame = project(&samples, t(0));
        assert_eq!(frame.max_count, 1);
        assert!(frame.points.iter().all(|p| p.intensity == 0.0));
    }

    #[test]
    fn selects_exact_timestamp_only() {
        let (a, b) = two_locations();
        let samples = vec![
            Sample::at(&a, t(0), 10),
            Sample::at(&b, t(0), 20),
            Sample::at(&a, t(2), 999),
            Sample::at(&b, t(2), 1),
        ];

        let frame = project(&samples, t(0));
        assert_eq!(frame.points.len(), 2);
        assert_eq!(frame.max_count, 20);
        assert!(project(&samples, t(1)).is_empty());
    }

    #[test]
    fn peak_point_has_unit_intensity() {
        let (a, b) = two_locations();
        let samples = vec![Sample::at(&a, t(0), 7), Sample::at(&b, t(0), 3)];
        let frame = project(&samples, t(0));

        assert!(frame
            .points
            .iter()
            .all(|p| p.intensity > 0.0 && p.intensity <= 1.0));
        assert!(frame.points.iter().any(|p| p.intensity == 1.0));
    }

    #[test]
    fn projection_is_deterministic() {
        let (a, b) = two_locations();
        let samples = vec![Sample::at(&a, t(0), 31), Sample::at(&b, t(0), 17)];
        assert_eq!(project(&samples, t(0)), project(&samples, t(0)));
    }

    #[test]
    fn absent_location_reads_zero() {
        let (a, _) = two_locations();
        let samples = vec![Sample::at(&a, t(0), 5)];
        assert_eq!(project(&samples, t(0)).count_for("B"), 0);
    }

    #[test]
    fn global_normalization_uses_store_peak() {
        let (a, b) = two_locations();
        let samples = vec![
            Sample::at(&a, t(0), 50),
            Sample::at(&b, t(0), 25),
            Sample::at(&a, t(2), 100),
            Sample::at(&b, t(2), 10),
        ];
        let store = SampleStore::new(vec![a, b], samples.clone()).unwrap();
        let projector = FrameProjector::new(Normalization::Global, &store);

        let frame = projector.project(store.samples(), t(0));
        assert_eq!(frame.max_count, 100);
        assert_eq!(frame.points[0].intensity, 0.5);
        assert_eq!(frame.points[1].intensity, 0.25);
    }

    #[test]
    fn series_covers_whole_timeline() {
        let (a, b) = two_locations();
        let samples = vec![
            Sample::at(&a, t(2), 20),
            Sample::at(&b, t(2), 1),
            Sample::at(&a, t(0), 10),
            Sample::at(&b, t(0), 2),
        ];
        let store = SampleStore::new(vec![a, b], samples).unwrap();
        let timeline = Timeline::build(store.samples());

        let series = location_series(&store, &timeline, "A").unwrap();
        assert_eq!(series.points, vec![(t(0), 10), (t(2), 20)]);
        assert!(location_series(&store, &timeline, "nope").is_none());
    }
}
