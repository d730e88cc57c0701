//! Display formatting for time labels and counts.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Label pattern used when none (or an unusable one) is configured.
pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M %p";

/// Whether `pattern` is a strftime pattern `chrono` can render.
pub fn is_valid_time_format(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Formats slot timestamps for human display in a fixed zone.
#[derive(Debug, Clone)]
pub struct TimeFormatter {
    offset: FixedOffset,
    pattern: String,
}

impl TimeFormatter {
    /// Build a formatter for a UTC offset in minutes and a `chrono` pattern.
    ///
    /// Offsets outside +/-24h fall back to UTC; unrecognised patterns fall
    /// back to [`DEFAULT_TIME_FORMAT`].
    pub fn new(utc_offset_minutes: i32, pattern: impl Into<String>) -> Self {
        let offset = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| {
                tracing::warn!(
                    "UTC offset of {} minutes is out of range; using UTC",
                    utc_offset_minutes
                );
                Utc.fix()
            });
        let mut pattern = pattern.into();
        if !is_valid_time_format(&pattern) {
            tracing::warn!(
                "Time format {:?} is not a valid strftime pattern; using {:?}",
                pattern,
                DEFAULT_TIME_FORMAT
            );
            pattern = DEFAULT_TIME_FORMAT.to_string();
        }
        Self { offset, pattern }
    }

    pub fn format(&self, timestamp: DateTime<Utc>) -> String {
        let local = timestamp.with_timezone(&self.offset);
        let mut label = String::new();
        if write!(label, "{}", local.format(&self.pattern)).is_err() {
            return local.to_rfc3339();
        }
        label
    }
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self::new(330, DEFAULT_TIME_FORMAT)
    }
}

/// Format a count with Indian digit grouping (`12,34,567`).
///
/// The last three digits form one group; everything above is grouped in
/// pairs.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
