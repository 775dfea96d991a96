//! Instructor model.
//!
//! The single instructor owns the week: their availability bounds every
//! lesson, and their pause, long-break, and block-hour settings apply to
//! all students alike.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::calendar::{TimeWindow, Weekday, WeeklyAvailability};
use super::time::Minute;

fn default_min_pause() -> Minute {
    5
}

fn default_long_break() -> Minute {
    20
}

fn default_block_buffer() -> Minute {
    15
}

/// The instructor whose week is being planned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    /// Working hours per weekday.
    #[serde(default)]
    pub availability: WeeklyAvailability,
    /// Minimum gap between two normal lessons (minutes).
    #[serde(default = "default_min_pause")]
    pub min_pause_minutes: Minute,
    /// Length of the break forced into long runs of lessons (minutes).
    #[serde(default = "default_long_break")]
    pub long_break_minutes: Minute,
    /// Break appended after a block session (minutes, 0 = none).
    #[serde(default = "default_block_buffer")]
    pub block_buffer_minutes: Minute,
    /// Whether two back-to-back lessons per student per day are allowed.
    #[serde(default)]
    pub block_hours: bool,
    /// Calendar dates of the target week, Monday first.
    pub dates: Vec<NaiveDate>,
}

impl Instructor {
    /// Creates an instructor for the week starting at `monday`.
    ///
    /// The instructor is unavailable every day until windows are added.
    pub fn new(monday: NaiveDate) -> Self {
        Self {
            availability: WeeklyAvailability::new(),
            min_pause_minutes: default_min_pause(),
            long_break_minutes: default_long_break(),
            block_buffer_minutes: default_block_buffer(),
            block_hours: false,
            dates: vec![monday],
        }
    }

    /// Sets the working hours for a weekday.
    pub fn with_window(mut self, day: Weekday, start: &str, end: &str) -> Self {
        self.availability = self.availability.with_day(day, start, end);
        self
    }

    /// Sets the minimum pause between normal lessons.
    pub fn with_min_pause(mut self, minutes: Minute) -> Self {
        self.min_pause_minutes = minutes;
        self
    }

    /// Sets the long-break duration.
    pub fn with_long_break(mut self, minutes: Minute) -> Self {
        self.long_break_minutes = minutes;
        self
    }

    /// Sets the post-block buffer duration.
    pub fn with_block_buffer(mut self, minutes: Minute) -> Self {
        self.block_buffer_minutes = minutes;
        self
    }

    /// Enables or disables block hours.
    pub fn with_block_hours(mut self, enabled: bool) -> Self {
        self.block_hours = enabled;
        self
    }

    /// Replaces the week's date list.
    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.dates = dates;
        self
    }

    /// Working window for a weekday, if the instructor works that day.
    #[inline]
    pub fn window(&self, day: Weekday) -> Option<TimeWindow> {
        self.availability.window(day)
    }

    /// Calendar date assigned to a weekday.
    ///
    /// Dates are assigned by position. Weekdays past the end of the list are
    /// extrapolated one day per position from the last listed date.
    /// Returns `None` only when no dates are listed.
    pub fn date_for(&self, day: Weekday) -> Option<NaiveDate> {
        let idx = day.index();
        if let Some(date) = self.dates.get(idx) {
            return Some(*date);
        }
        let last_idx = self.dates.len().checked_sub(1)?;
        let last = self.dates[last_idx];
        last.checked_add_days(Days::new((idx - last_idx) as u64))
    }
}
