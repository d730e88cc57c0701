//! Timeline index: the playback axis.
//!
//! Maps an integer playback position to a slot timestamp. Built once from
//! the sample store; ordering does not depend on sample order.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::models::Sample;

/// Distinct sample timestamps in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    slots: Vec<DateTime<Utc>>,
}

impl Timeline {
    /// Extract, deduplicate and sort the timestamps of `samples`.
    pub fn build(samples: &[Sample]) -> Self {
        let slots: BTreeSet<DateTime<Utc>> = samples.iter().map(|s| s.timestamp).collect();
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Timestamp at a playback position.
    pub fn get(&self, index: usize) -> Option<DateTime<Utc>> {
        self.slots.get(index).copied()
    }

    /// Highest valid position, or `None` for an empty timeline.
    pub fn last_index(&self) -> Option<usize> {
        self.slots.len().checked_sub(1)
    }

    pub fn slots(&self) -> &[DateTime<Utc>] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.slots.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use chrono::TimeZone;

    fn t(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 8, hour, 0, 0).unwrap()
    }

    #[test]
    fn deduplicates_and_sorts() {
        let a = Location::new("a", "A", 0.0, 0.0);
        let b = Location::new("b", "B", 0.0, 0.0);
        let samples = vec![
            Sample::at(&a, t(4), 1),
            Sample::at(&b, t(0), 1),
            Sample::at(&a, t(0), 1),
            Sample::at(&b, t(4), 1),
            Sample::at(&a, t(2), 1),
            Sample::at(&b, t(2), 1),
        ];

        let timeline = Timeline::build(&samples);
        assert_eq!(timeline.slots(), &[t(0), t(2), t(4)]);
        assert!(timeline.slots().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn order_of_input_does_not_matter() {
        let a = Location::new("a", "A", 0.0, 0.0);
        let mut samples: Vec<Sample> = (0..6).map(|h| Sample::at(&a, t(h * 2), h as u64)).collect();
        let forward = Timeline::build(&samples);
        samples.reverse();
        assert_eq!(Timeline::build(&samples), forward);
    }

    #[test]
    fn empty_samples_give_empty_timeline() {
        let timeline = Timeline::build(&[]);
        assert!(timeline.is_empty());
        assert_eq!(timeline.last_index(), None);
        assert_eq!(timeline.get(0), None);
    }
}
