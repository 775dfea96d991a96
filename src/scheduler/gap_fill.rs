//! Gap filling after the greedy pass.
//!
//! # Algorithm
//!
//! 1. Take every student still short of quota. Students who could start a
//!    block session on Monday come first, then larger remaining quota, then
//!    lower id.
//! 2. For each weekday Monday→Sunday where both windows exist and the day
//!    rule permits a session, list the day's free gaps: before the first
//!    entry, between consecutive entries, and after the last entry up to
//!    the instructor's close (the whole window on an empty day).
//! 3. In each gap, try one start: the gap start, plus the minimum pause when
//!    the gap follows a lesson and the student's lesson is shorter than the
//!    block threshold, but no earlier than the student's own start.
//! 4. The first start that [`Placement`] accepts is committed; the filler
//!    then moves on to the next day.

use log::debug;

use super::placement::Placement;
use crate::config::PlannerConfig;
use crate::dispatching::{rules, ScheduleState};
use crate::models::{format_time, Instructor, Lesson, Minute, Student, TimeWindow, Weekday};

/// A free interval of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    /// Free interval.
    pub window: TimeWindow,
    /// Whether the interval starts right after a non-break lesson.
    pub follows_lesson: bool,
}

/// Places remaining quota into the free gaps of the week.
#[derive(Debug, Clone, Copy)]
pub struct GapFiller<'a> {
    instructor: &'a Instructor,
    students: &'a [Student],
    config: &'a PlannerConfig,
    placement: Placement<'a>,
}

impl<'a> GapFiller<'a> {
    /// Creates a gap filler over `students`.
    pub fn new(
        instructor: &'a Instructor,
        students: &'a [Student],
        config: &'a PlannerConfig,
        placement: Placement<'a>,
    ) -> Self {
        Self {
            instructor,
            students,
            config,
            placement,
        }
    }

    /// Fills gaps in `state`. Returns the number of lessons committed.
    pub fn fill(&self, state: &mut ScheduleState) -> u32 {
        let mut short: Vec<&Student> = self
            .students
            .iter()
            .filter(|s| state.remaining(s) > 0)
            .collect();
        let view: &ScheduleState = state;
        let key = |s: &Student| {
            (
                rules::can_schedule_block(s, Weekday::Monday, view, self.instructor),
                view.remaining(s),
            )
        };
        short.sort_by(|a, b| key(*b).cmp(&key(*a)).then_with(|| a.id.cmp(&b.id)));

        let mut committed = 0;
        for student in short {
            for day in Weekday::ALL {
                if state.remaining(student) == 0 {
                    break;
                }
                committed += self.fill_day(state, student, day);
            }
        }
        committed
    }

    fn fill_day(&self, state: &mut ScheduleState, student: &Student, day: Weekday) -> u32 {
        let (Some(instructor_window), Some(student_window), Some(date)) = (
            self.instructor.window(day),
            student.window(day),
            self.instructor.date_for(day),
        ) else {
            return 0;
        };
        if !rules::is_eligible(student, day, state, self.instructor) {
            return 0;
        }

        let lead_pause = if student.lesson_minutes < self.config.block_lesson_minutes {
            self.instructor.min_pause_minutes
        } else {
            0
        };

        for gap in free_gaps(state.entries_on(day), instructor_window) {
            let lead = if gap.follows_lesson { lead_pause } else { 0 };
            let start = (gap.window.start + lead).max(student_window.start);

            if let Some(count) = self.placement.place(state, student, day, date, start) {
                debug!(
                    "Gap filler placed {} lesson(s) for {} on {} at {}",
                    count,
                    student.id,
                    day,
                    format_time(start)
                );
                return count;
            }
        }
        0
    }
}

/// Free gaps of a day's sorted entries inside `window`.
pub fn free_gaps(entries: &[Lesson], window: TimeWindow) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut cursor: Minute = window.start;
    let mut follows_lesson = false;

    for entry in entries {
        if entry.start > cursor {
            gaps.push(Gap {
                window: TimeWindow::new(cursor, entry.start.min(window.end)),
                follows_lesson,
            });
        }
        if entry.end > cursor {
            cursor = entry.end;
            follows_lesson = !entry.is_break();
        }
    }
    if cursor < window.end {
        gaps.push(Gap {
            window: TimeWindow::new(cursor, window.end),
            follows_lesson,
        });
    }

    gaps
}
