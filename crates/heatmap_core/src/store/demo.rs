//! Seeded demo dataset for four temple locations in Ujjain.
//!
//! One sample per location every two hours of a single UTC day. Counts
//! follow an hour-band profile (morning and evening peaks) with +/-15%
//! uniform jitter and are clamped at zero.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::SampleSource;
use crate::models::{Location, Sample};

/// Catalogue entry with the baseline count used for generation.
#[derive(Debug, Clone)]
pub struct DemoLocation {
    pub location: Location,
    pub base_count: u64,
}

impl DemoLocation {
    pub fn new(location: Location, base_count: u64) -> Self {
        Self {
            location,
            base_count,
        }
    }
}

/// Load multiplier for an hour of the day.
pub fn hour_multiplier(hour: u32) -> f64 {
    match hour {
        4..=8 => 2.5,
        10..=14 => 0.8,
        16..=20 => 2.2,
        _ => 0.5,
    }
}

/// Reproducible synthetic dataset.
#[derive(Debug, Clone)]
pub struct DemoDataset {
    pub date: NaiveDate,
    pub seed: u64,
    /// Hours between consecutive slots.
    pub slot_hours: u32,
    pub locations: Vec<DemoLocation>,
}

impl Default for DemoDataset {
    fn default() -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(2025, 9, 8).unwrap_or_default(),
            seed: 0x5EED,
            slot_hours: 2,
            locations: ujjain_locations(),
        }
    }
}

fn ujjain_locations() -> Vec<DemoLocation> {
    vec![
        DemoLocation::new(
            Location::new("mahakal", "महाकाल मंदिर", 23.1816, 75.7667),
            40_000,
        ),
        DemoLocation::new(Location::new("ramghat", "रामघाट", 23.1843, 75.7686), 25_000),
        DemoLocation::new(
            Location::new("mangalnath", "मंगलनाथ", 23.2030, 75.7725),
            15_000,
        ),
        DemoLocation::new(
            Location::new("kalbhairav", "काल भैरव", 23.1903, 75.7568),
            10_000,
        ),
    ]
}

impl DemoDataset {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Slot start times covering the configured day.
    pub fn slots(&self) -> Vec<DateTime<Utc>> {
        let midnight = Utc.from_utc_datetime(&self.date.and_time(chrono::NaiveTime::MIN));
        let step = self.slot_hours.max(1);
        (0..24u32)
            .step_by(step as usize)
            .map(|h| midnight + Duration::hours(h as i64))
            .collect()
    }

    fn count_for(rng: &mut ChaCha8Rng, base: u64, hour: u32) -> u64 {
        let base = base as f64;
        let spread = (base * 0.15).round() as i64;
        let jitter = if spread > 0 {
            rng.gen_range(-spread..=spread)
        } else {
            0
        };
        let raw = (base * hour_multiplier(hour)).round() as i64 + jitter;
        raw.max(0) as u64
    }
}

impl SampleSource for DemoDataset {
    fn locations(&self) -> Vec<Location> {
        self.locations.iter().map(|d| d.location.clone()).collect()
    }

    fn samples(&self) -> Vec<Sample> {
        use chrono::Timelike;

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let slots = self.slots();
        let mut samples = Vec::with_capacity(self.locations.len() * slots.len());

        for demo in &self.locations {
            for slot in &slots {
                let count = Self::count_for(&mut rng, demo.base_count, slot.hour());
                samples.push(Sample::at(&demo.location, *slot, count));
            }
        }
        samples
    }
}
