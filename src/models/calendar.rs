//! Weekdays, daily time windows, and weekly availability.
//!
//! # Time Model
//! A [`TimeWindow`] is a closed interval of minutes since midnight. A
//! lesson `[start, end]` fits a window iff `window.start <= start` and
//! `end <= window.end`. Two lessons overlap iff they share more than a
//! boundary point (touching lessons do not overlap).
//!
//! # Resolution
//! A weekday is available iff the availability map lists at least two
//! bounds for it. Malformed bounds resolve to the 09:00–17:00 fallback
//! rather than failing (see [`parse_bounds`](super::time::parse_bounds)).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::time::{format_time, parse_bounds, Minute};

/// Day of the week. Ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical (Monday-first) order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Zero-based position in the canonical week (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase English name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A closed interval of minutes since midnight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (minute of day, inclusive).
    pub start: Minute,
    /// Interval end (minute of day, inclusive).
    pub end: Minute,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: Minute, end: Minute) -> Self {
        Self { start, end }
    }

    /// Length of this window in minutes.
    #[inline]
    pub fn duration(&self) -> Minute {
        self.end - self.start
    }

    /// Whether the span `[start, end]` lies entirely inside this window.
    #[inline]
    pub fn contains_span(&self, start: Minute, end: Minute) -> bool {
        start >= self.start && end <= self.end
    }

    /// Whether two windows share more than a boundary point.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_time(self.start), format_time(self.end))
    }
}

/// Raw per-weekday availability as configured: `weekday → [start, end]`.
///
/// Bounds stay as text until resolved, so a malformed entry only affects
/// the day it belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WeeklyAvailability(BTreeMap<Weekday, Vec<String>>);

impl WeeklyAvailability {
    /// Creates an empty availability (never available).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the bounds for a weekday.
    pub fn with_day(
        mut self,
        day: Weekday,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.0.insert(day, vec![start.into(), end.into()]);
        self
    }

    /// Adds raw bounds for a weekday, exactly as they would appear in input.
    pub fn with_raw(mut self, day: Weekday, bounds: Vec<String>) -> Self {
        self.0.insert(day, bounds);
        self
    }

    /// Resolves the window for a weekday.
    ///
    /// Returns `None` if the day is absent or lists fewer than two bounds.
    /// Bounds beyond the first two are ignored.
    pub fn window(&self, day: Weekday) -> Option<TimeWindow> {
        match self.0.get(&day).map(Vec::as_slice) {
            Some([start, end, ..]) => {
                let (start, end) = parse_bounds(start, end);
                Some(TimeWindow::new(start, end))
            }
            _ => None,
        }
    }

    /// Weekdays with a resolvable window, in canonical order.
    pub fn available_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|&d| self.window(d).is_some())
            .collect()
    }
}
