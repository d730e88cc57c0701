//! Immutable sample store.
//!
//! The store is filled once from a [`SampleSource`] before playback starts
//! and is shared read-only afterwards. Construction enforces the collection
//! invariant: every declared location has exactly one sample at every
//! timeline slot.

mod demo;

pub use demo::{hour_multiplier, DemoDataset, DemoLocation};

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Location, LocationId, Sample};

/// Errors raised while assembling a store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Duplicate sample for '{location}' at {timestamp}")]
    Duplicate {
        location: String,
        timestamp: DateTime<Utc>,
    },

    #[error("No sample for '{location}' at {timestamp}")]
    MissingSlot {
        location: String,
        timestamp: DateTime<Utc>,
    },

    #[error("Sample references undeclared location '{0}'")]
    UnknownLocation(String),

    #[error("Location '{0}' is declared more than once")]
    DuplicateLocation(String),
}

impl StoreError {
    pub fn duplicate(location: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::Duplicate {
            location: location.into(),
            timestamp,
        }
    }

    pub fn missing_slot(location: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::MissingSlot {
            location: location.into(),
            timestamp,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Producer of the full sample collection.
///
/// Implementations must return non-negative counts (guaranteed by `u64`)
/// and one sample per declared location per slot.
pub trait SampleSource {
    /// Declared locations, in display order.
    fn locations(&self) -> Vec<Location>;

    /// Every sample, in any order.
    fn samples(&self) -> Vec<Sample>;
}

/// Read-only collection of samples plus the declared location catalogue.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    locations: Vec<Location>,
    samples: Vec<Sample>,
}

impl SampleStore {
    /// Validate and wrap a sample collection.
    pub fn new(locations: Vec<Location>, samples: Vec<Sample>) -> StoreResult<Self> {
        let mut declared: HashSet<&str> = HashSet::with_capacity(locations.len());
        for location in &locations {
            if !declared.insert(location.id.as_str()) {
                return Err(StoreError::DuplicateLocation(location.id.to_string()));
            }
        }

        let mut seen: HashSet<(&str, DateTime<Utc>)> = HashSet::with_capacity(samples.len());
        let mut slots: BTreeSet<DateTime<Utc>> = BTreeSet::new();
        for sample in &samples {
            let id = sample.location_id.as_str();
            if !declared.contains(id) {
                return Err(StoreError::UnknownLocation(id.to_string()));
            }
            if !seen.insert((id, sample.timestamp)) {
                return Err(StoreError::duplicate(id, sample.timestamp));
            }
            slots.insert(sample.timestamp);
        }

        for location in &locations {
            for slot in &slots {
                if !seen.contains(&(location.id.as_str(), *slot)) {
                    return Err(StoreError::missing_slot(location.id.as_str(), *slot));
                }
            }
        }

        tracing::debug!(
            "Sample store ready: {} locations x {} slots",
            locations.len(),
            slots.len()
        );

        Ok(Self { locations, samples })
    }

    /// Load and validate everything a source produces.
    pub fn from_source(source: &dyn SampleSource) -> StoreResult<Self> {
        Self::new(source.locations(), source.samples())
    }

    /// An empty store (no locations, no samples).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest count anywhere in the store (0 when empty).
    pub fn global_max(&self) -> u64 {
        self.samples.iter().map(|s| s.count).max().unwrap_or(0)
    }

    /// All samples of one location, oldest first.
    pub fn series_for(&self, id: &str) -> Vec<&Sample> {
        let mut series: Vec<&Sample> = self
            .samples
            .iter()
            .filter(|s| s.location_id.as_str() == id)
            .collect();
        series.sort_by_key(|s| s.timestamp);
        series
    }

    /// First declared location, used as the default chart selection.
    pub fn first_location(&self) -> Option<&LocationId> {
        self.locations.first().map(|l| &l.id)
    }
}
