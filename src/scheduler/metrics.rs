//! Week schedule metrics.
//!
//! Computes the figures that score a variant run and fill the result.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled lessons | Count of non-break lessons |
//! | Required lessons | Sum of all weekly quotas |
//! | Idle minutes | Sum of gaps between consecutive non-break lessons per date |
//! | Shortfall | Per student, quota minus lessons received (omitted when zero) |
//!
//! # Score
//! Runs compare lexicographically: more scheduled lessons first, then fewer
//! idle minutes.

use std::collections::BTreeMap;

use crate::models::{Lesson, Minute, Student};

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleMetrics {
    /// Non-break lessons placed.
    pub scheduled_lessons: usize,
    /// Sum of all quotas.
    pub required_lessons: u32,
    /// Idle minutes between lessons.
    pub idle_minutes: Minute,
    /// Missing lessons per student id.
    pub shortfall: BTreeMap<String, u32>,
}

/// Lexicographic score of a variant run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantScore {
    /// Non-break lessons placed (more is better).
    pub lessons: usize,
    /// Idle minutes (fewer is better).
    pub idle_minutes: Minute,
}

impl VariantScore {
    /// Whether this score strictly beats `other`.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.lessons > other.lessons
            || (self.lessons == other.lessons && self.idle_minutes < other.idle_minutes)
    }
}

impl ScheduleMetrics {
    /// Computes metrics from a run's lessons and the input students.
    ///
    /// # Arguments
    /// * `lessons` - Committed entries sorted by (date, start); breaks are ignored.
    /// * `students` - The input students (for quotas).
    pub fn calculate(lessons: &[Lesson], students: &[Student]) -> Self {
        let scheduled_lessons = lessons.iter().filter(|l| !l.is_break()).count();
        let required_lessons = students.iter().map(|s| s.lessons_per_week).sum();

        let mut shortfall = BTreeMap::new();
        for student in students {
            let received = lessons.iter().filter(|l| l.is_for(&student.id)).count() as u32;
            let missing = student.lessons_per_week.saturating_sub(received);
            if missing > 0 {
                shortfall.insert(student.id.clone(), missing);
            }
        }

        Self {
            scheduled_lessons,
            required_lessons,
            idle_minutes: idle_minutes(lessons),
            shortfall,
        }
    }

    /// The score used to rank variant runs.
    pub fn score(&self) -> VariantScore {
        VariantScore {
            lessons: self.scheduled_lessons,
            idle_minutes: self.idle_minutes,
        }
    }
}

/// Sum of the gaps between consecutive non-break lessons on each date.
///
/// `lessons` must be sorted by (date, start).
pub fn idle_minutes(lessons: &[Lesson]) -> Minute {
    let booked: Vec<&Lesson> = lessons.iter().filter(|l| !l.is_break()).collect();
    booked
        .windows(2)
        .filter(|pair| pair[0].date == pair[1].date)
        .map(|pair| (pair[1].start - pair[0].end).max(0))
        .sum()
}
