//! Per-timestamp frame derived from the sample store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::sample::LocationId;

/// One weighted point handed to the map surface.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatPoint {
    pub location_id: LocationId,
    pub lat: f64,
    pub lng: f64,
    /// Count divided by the reference maximum; within [0, 1].
    pub intensity: f64,
}

/// Snapshot of one timeline slot.
///
/// Frames are recomputed for every index change and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub timestamp: DateTime<Utc>,
    /// Divisor applied to counts; never below 1.
    pub max_count: u64,
    pub points: Vec<HeatPoint>,
    pub per_location_count: BTreeMap<LocationId, u64>,
}

impl Frame {
    /// Count for a location, treating absent locations as zero.
    pub fn count_for(&self, location_id: &str) -> u64 {
        self.per_location_count
            .get(location_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(lat, lng, intensity)` triples in store order.
    pub fn weighted_points(&self) -> Vec<(f64, f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.lat, p.lng, p.intensity))
            .collect()
    }
}
