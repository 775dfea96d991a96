//! Week variants: one weekday ordering paired with one sweep direction.
//!
//! The ordering ranks days when candidate slots are sorted, so it decides
//! which day's students get first pick. The direction decides where the
//! slot cursor starts within each day's window.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::calendar::Weekday;

/// Direction in which a day's window is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SweepDirection {
    /// From the start of the window upward.
    Forward,
    /// From the end of the window downward.
    Backward,
}

/// A (weekday ordering, sweep direction) pair defining one scheduling attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekVariant {
    /// Permutation of the seven weekdays.
    pub ordering: Vec<Weekday>,
    /// Sweep direction.
    pub direction: SweepDirection,
}

impl WeekVariant {
    /// Creates a variant.
    pub fn new(ordering: Vec<Weekday>, direction: SweepDirection) -> Self {
        Self { ordering, direction }
    }

    /// Canonical Monday-first ordering, forward sweep.
    pub fn canonical() -> Self {
        Self::new(Weekday::ALL.to_vec(), SweepDirection::Forward)
    }

    /// Rank of a day under this ordering (lower = earlier).
    ///
    /// Days missing from the ordering rank after all listed days.
    pub fn rank(&self, day: Weekday) -> usize {
        self.ordering
            .iter()
            .position(|&d| d == day)
            .unwrap_or(self.ordering.len() + day.index())
    }
}

impl fmt::Display for WeekVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<&str> = self.ordering.iter().map(|d| d.name()).collect();
        write!(f, "[{}] {:?}", days.join(","), self.direction)
    }
}

/// All seven rotations of the canonical week (Monday-first, Tuesday-first, ...).
pub fn rotations() -> Vec<Vec<Weekday>> {
    (0..Weekday::ALL.len())
        .map(|shift| {
            let mut days = Weekday::ALL.to_vec();
            days.rotate_left(shift);
            days
        })
        .collect()
}

/// The canonical week reversed (Sunday-first).
pub fn reversed() -> Vec<Weekday> {
    let mut days = Weekday::ALL.to_vec();
    days.reverse();
    days
}
