//! Greedy slot-by-slot assignment.
//!
//! # Algorithm
//!
//! 1. Walk the ordered candidate slots.
//! 2. Re-filter each slot's snapshot with [`rules::is_eligible`]; skip if empty.
//! 3. Pick the winner by priority (block-eligible, remaining quota, lowest id).
//! 4. Hand the winner to [`Placement`], which applies the long-break rule,
//!    validation, block pairing, and buffer breaks.
//!
//! A failed placement does not fall back to the next student; the slot is
//! simply consumed.
//!
//! # Complexity
//! O(k * n) for k slots and n students, plus placement cost per slot.

use log::trace;

use super::placement::Placement;
use super::slots::CandidateSlot;
use crate::dispatching::{rules, ScheduleState};
use crate::models::{format_time, Instructor, Student};

/// Commits sessions slot by slot in slot order.
#[derive(Debug, Clone, Copy)]
pub struct GreedyAssigner<'a> {
    instructor: &'a Instructor,
    students: &'a [Student],
    placement: Placement<'a>,
}

impl<'a> GreedyAssigner<'a> {
    /// Creates an assigner over `students`.
    pub fn new(
        instructor: &'a Instructor,
        students: &'a [Student],
        placement: Placement<'a>,
    ) -> Self {
        Self {
            instructor,
            students,
            placement,
        }
    }

    /// Processes `slots` in order, committing into `state`.
    ///
    /// Slot indices refer to the student list this assigner was built with.
    /// Returns the number of lessons committed.
    pub fn assign(&self, slots: &[CandidateSlot], state: &mut ScheduleState) -> u32 {
        let mut committed = 0;

        for slot in slots {
            let candidates: Vec<&Student> = slot
                .eligible
                .iter()
                .filter_map(|&idx| self.students.get(idx))
                .filter(|s| rules::is_eligible(s, slot.day, state, self.instructor))
                .collect();

            let Some(winner) = rules::select_winner(&candidates, slot.day, state, self.instructor)
            else {
                continue;
            };

            match self.placement.place(state, winner, slot.day, slot.date, slot.time) {
                Some(count) => committed += count,
                None => trace!(
                    "Slot {} {} rejected for {}",
                    slot.day,
                    format_time(slot.time),
                    winner.id
                ),
            }
        }

        committed
    }
}
