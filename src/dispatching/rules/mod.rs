//! Day rules and winner selection.
//!
//! # Day Rule
//! A student gets at most one session per day: either one normal lesson,
//! or (block hours enabled) two back-to-back lessons committed together.
//! Normal hours never stack, whether or not block hours are enabled.
//!
//! # Priority
//! Among students eligible for the same slot, the winner is the maximum of
//! `(block-eligible, remaining quota, Reverse(id))`: block sessions first,
//! then the student furthest from their quota, then the lowest id.
//!
//! Enumeration, greedy assignment, and gap filling all consult
//! [`is_eligible`], so the three passes cannot drift apart.

use std::cmp::Reverse;

use super::ScheduleState;
use crate::models::{Instructor, Minute, Student, TimeWindow, Weekday};

/// Whether the student may start a block session on `day`.
///
/// True iff block hours are enabled and the student has no session that day.
pub fn can_schedule_block(
    student: &Student,
    day: Weekday,
    state: &ScheduleState,
    instructor: &Instructor,
) -> bool {
    instructor.block_hours && state.sessions_on(&student.id, day) == 0
}

/// Whether the student may receive a normal lesson on `day`.
///
/// True iff the student has no session that day.
pub fn can_schedule_normal(
    student: &Student,
    day: Weekday,
    state: &ScheduleState,
    _instructor: &Instructor,
) -> bool {
    state.sessions_on(&student.id, day) == 0
}

/// Whether the student can take any new session on `day`: quota left and
/// one of the day rules passes.
pub fn is_eligible(
    student: &Student,
    day: Weekday,
    state: &ScheduleState,
    instructor: &Instructor,
) -> bool {
    state.remaining(student) > 0
        && (can_schedule_block(student, day, state, instructor)
            || can_schedule_normal(student, day, state, instructor))
}

/// Whether one lesson of the student starting at `time` fits both the
/// student's window and the instructor's window on `day`.
pub fn fits_at(
    student: &Student,
    day: Weekday,
    time: Minute,
    instructor_window: TimeWindow,
) -> bool {
    let Some(end) = time.checked_add(student.lesson_minutes) else {
        return false;
    };
    student
        .window(day)
        .is_some_and(|w| w.contains_span(time, end))
        && instructor_window.contains_span(time, end)
}

/// Priority key of a student for a slot on `day`. Larger wins.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority<'a> {
    /// Eligible for a block session.
    pub block: bool,
    /// Lessons still needed.
    pub remaining: u32,
    /// Lower id wins ties.
    pub id: Reverse<&'a str>,
}

/// Computes the priority key of a student.
pub fn priority<'a>(
    student: &'a Student,
    day: Weekday,
    state: &ScheduleState,
    instructor: &Instructor,
) -> Priority<'a> {
    Priority {
        block: can_schedule_block(student, day, state, instructor),
        remaining: state.remaining(student),
        id: Reverse(student.id.as_str()),
    }
}

/// Picks the highest-priority student among `candidates`.
pub fn select_winner<'a>(
    candidates: &[&'a Student],
    day: Weekday,
    state: &ScheduleState,
    instructor: &Instructor,
) -> Option<&'a Student> {
    candidates
        .iter()
        .copied()
        .max_by_key(|s| priority(s, day, state, instructor))
}
