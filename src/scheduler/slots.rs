//! Candidate slot enumeration.
//!
//! # Algorithm
//!
//! For each weekday the instructor works, a cursor walks the instructor
//! window in fixed steps: upward from the start while `< end` (forward), or
//! downward from the end while `> start` (backward). At each position the
//! students who pass [`rules::is_eligible`] and whose lesson fits both
//! windows form the slot's snapshot; empty slots are dropped.
//!
//! The snapshot is an over-approximation. Earlier commits in the same run
//! can invalidate it, so the greedy pass re-checks before committing.
//!
//! Slots are finally ordered by (day rank under the variant, time
//! ascending). Direction changes which times are generated, not their order.

use chrono::NaiveDate;

use crate::dispatching::{rules, ScheduleState};
use crate::models::{Instructor, Minute, Student, SweepDirection, WeekVariant, Weekday};

/// A point in the week at which at least one student could start a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSlot {
    /// Weekday of the slot.
    pub day: Weekday,
    /// Calendar date of the slot.
    pub date: NaiveDate,
    /// Start time (minute of day).
    pub time: Minute,
    /// Indices into the student list eligible when the slot was generated.
    pub eligible: Vec<usize>,
}

/// Enumerates candidate slots for a variant's sweep direction.
///
/// The result is in generation order; see [`order_slots`].
pub fn enumerate_slots(
    instructor: &Instructor,
    students: &[Student],
    state: &ScheduleState,
    direction: SweepDirection,
    step: Minute,
) -> Vec<CandidateSlot> {
    let mut slots = Vec::new();
    if step <= 0 {
        return slots;
    }

    for day in Weekday::ALL {
        let (Some(window), Some(date)) = (instructor.window(day), instructor.date_for(day)) else {
            continue;
        };

        let mut cursor = match direction {
            SweepDirection::Forward => window.start,
            SweepDirection::Backward => window.end,
        };
        loop {
            let in_range = match direction {
                SweepDirection::Forward => cursor < window.end,
                SweepDirection::Backward => cursor > window.start,
            };
            if !in_range {
                break;
            }

            let eligible: Vec<usize> = students
                .iter()
                .enumerate()
                .filter(|(_, s)| {
                    rules::is_eligible(s, day, state, instructor)
                        && rules::fits_at(s, day, cursor, window)
                })
                .map(|(idx, _)| idx)
                .collect();
            if !eligible.is_empty() {
                slots.push(CandidateSlot {
                    day,
                    date,
                    time: cursor,
                    eligible,
                });
            }

            cursor = match direction {
                SweepDirection::Forward => cursor.saturating_add(step),
                SweepDirection::Backward => cursor.saturating_sub(step),
            };
        }
    }

    slots
}

/// Sorts slots by (day rank under `variant`, time ascending). Stable.
pub fn order_slots(slots: &mut [CandidateSlot], variant: &WeekVariant) {
    slots.sort_by_key(|slot| (variant.rank(slot.day), slot.time));
}
