//! Location and sample structures.

use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of a monitored location (e.g. `"mahakal"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LocationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for LocationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A named place on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    /// Display name (may be non-Latin script).
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(id: impl Into<LocationId>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat,
            lng,
        }
    }
}

/// One crowd count observed at one location and instant.
///
/// Immutable once produced by a sample source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub location_id: LocationId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Slot start, serialized as ISO-8601.
    pub timestamp: DateTime<Utc>,
    pub count: u64,
}

impl Sample {
    /// Build a sample for a catalogued location.
    pub fn at(location: &Location, timestamp: DateTime<Utc>, count: u64) -> Self {
        Self {
            location_id: location.id.clone(),
            name: location.name.clone(),
            lat: location.lat,
            lng: location.lng,
            timestamp,
            count,
        }
    }
}
