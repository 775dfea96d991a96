//! Student model.
//!
//! A student wants `lessons_per_week` lessons of `lesson_minutes` each,
//! inside their own weekly availability.

use serde::{Deserialize, Serialize};

use super::calendar::{TimeWindow, Weekday, WeeklyAvailability};
use super::time::Minute;

fn default_lessons_per_week() -> u32 {
    2
}

fn default_lesson_minutes() -> Minute {
    60
}

/// A student to be scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Weekly lesson quota.
    #[serde(default = "default_lessons_per_week")]
    pub lessons_per_week: u32,
    /// Duration of one lesson (minutes).
    #[serde(default = "default_lesson_minutes")]
    pub lesson_minutes: Minute,
    /// Availability per weekday.
    #[serde(default)]
    pub availability: WeeklyAvailability,
    /// Free-text note carried through to the output.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Student {
    /// Creates a student with the default quota (2) and duration (60).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            lessons_per_week: default_lessons_per_week(),
            lesson_minutes: default_lesson_minutes(),
            availability: WeeklyAvailability::new(),
            notes: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the weekly quota.
    pub fn with_lessons_per_week(mut self, quota: u32) -> Self {
        self.lessons_per_week = quota;
        self
    }

    /// Sets the lesson duration.
    pub fn with_lesson_minutes(mut self, minutes: Minute) -> Self {
        self.lesson_minutes = minutes;
        self
    }

    /// Sets the availability for a weekday.
    pub fn with_window(mut self, day: Weekday, start: &str, end: &str) -> Self {
        self.availability = self.availability.with_day(day, start, end);
        self
    }

    /// Sets the note.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Availability window for a weekday.
    #[inline]
    pub fn window(&self, day: Weekday) -> Option<TimeWindow> {
        self.availability.window(day)
    }

    /// Name for messages; falls back to the id when no name is set.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
