//! Session placement shared by the greedy and gap-filling passes.
//!
//! # Algorithm
//!
//! Placing a session for a student at a prospective start:
//!
//! 1. **Long-break rule**: collect the run of committed lessons that are
//!    contiguous with `[start, start + d]` (gap below the minimum pause,
//!    closed transitively). If the run includes a committed lesson and
//!    spans at least the ceiling, move the start to
//!    `prev_end + pause + long_break + pause`. A lesson without a
//!    contiguous predecessor, or one that still closes an over-ceiling run
//!    after the move, is not placed.
//! 2. **Validation**: the lesson lies within both windows, overlaps no
//!    entry, and (below the block threshold) keeps the minimum pause to
//!    every lesson on both sides.
//! 3. **Block pairing**: a block-eligible student with at least two lessons
//!    left also receives `[end, end + d]` when it fits both windows,
//!    overlaps no entry, and does not push the run over the ceiling. The
//!    second lesson carries no pause requirement.
//! 4. **Breaks**: the long break is recorded at
//!    `[prev_end + pause, prev_end + pause + long_break]`. When an entry
//!    (typically the buffer after a block) already occupies part of it, the
//!    break covers the free span from that entry to the moved lesson
//!    instead. A pair, or a single lesson at or above the block threshold,
//!    is followed by a buffer break when the buffer fits the instructor
//!    window.
//!
//! The long-break rule counts every student's lessons, not only the
//! placed student's.

use chrono::NaiveDate;
use log::trace;

use crate::config::PlannerConfig;
use crate::dispatching::{rules, ScheduleState};
use crate::models::{
    format_time, BreakKind, Instructor, Lesson, Minute, Student, TimeWindow, Weekday,
};

/// Outcome of the long-break rule for a prospective lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongBreak {
    /// The lesson does not close an over-ceiling run.
    NotNeeded,
    /// The lesson moves to `start`; a long break fills `rest`.
    Shift {
        /// New lesson start.
        start: Minute,
        /// Long-break interval.
        rest: TimeWindow,
    },
    /// The lesson cannot be placed near this start.
    Reject,
}

/// Places sessions into a [`ScheduleState`] under the instructor's rules.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    instructor: &'a Instructor,
    config: &'a PlannerConfig,
}

impl<'a> Placement<'a> {
    /// Creates a placement helper.
    pub fn new(instructor: &'a Instructor, config: &'a PlannerConfig) -> Self {
        Self { instructor, config }
    }

    /// Tries to place one session for `student` on `day` at `start`.
    ///
    /// Returns the number of lessons committed (1, or 2 for a block pair),
    /// or `None` when the session cannot be placed.
    pub fn place(
        &self,
        state: &mut ScheduleState,
        student: &Student,
        day: Weekday,
        date: NaiveDate,
        start: Minute,
    ) -> Option<u32> {
        let instructor_window = self.instructor.window(day)?;
        let student_window = student.window(day)?;
        if !rules::is_eligible(student, day, state, self.instructor) {
            return None;
        }

        let duration = student.lesson_minutes;
        let block_eligible = rules::can_schedule_block(student, day, state, self.instructor);
        let remaining = state.remaining(student);

        let end = start.checked_add(duration)?;
        let (start, rest) = match self.resolve_long_break(state.entries_on(day), start, end) {
            LongBreak::NotNeeded => (start, None),
            LongBreak::Shift { start: moved, rest } => (moved, Some(rest)),
            LongBreak::Reject => return None,
        };
        let end = start.checked_add(duration)?;

        let windows = (student_window, instructor_window);
        if !self.is_valid(state.entries_on(day), start, end, duration, windows) {
            return None;
        }

        let pair = block_eligible
            && remaining >= 2
            && self.pair_fits(state.entries_on(day), start, end, duration, windows);

        let session_end;
        let lessons = if pair {
            session_end = end + duration;
            vec![
                Lesson::block_member(date, day, start, end, &student.id),
                Lesson::block_member(date, day, end, session_end, &student.id),
            ]
        } else {
            session_end = end;
            vec![Lesson::normal(date, day, start, end, &student.id)]
        };
        let count = lessons.len() as u32;
        state.commit_session(&student.id, day, lessons);
        trace!(
            "Committed {} lesson(s) for {} on {} {}-{}",
            count,
            student.id,
            day,
            format_time(start),
            format_time(session_end)
        );

        if let Some(rest) = rest {
            let note = match long_break_span(state.entries_on(day), rest, start) {
                Some(span) => {
                    state.add_break(
                        day,
                        Lesson::rest(date, day, span.start, span.end, BreakKind::Long),
                    );
                    format!(
                        "Inserted a {}-minute long break on {} {} ({}); {}'s lesson moved to {}",
                        span.duration(),
                        day,
                        date,
                        span,
                        student.display_name(),
                        format_time(start)
                    )
                }
                None => format!(
                    "Moved {}'s lesson on {} {} to {} to end a long run of lessons; \
                     no free time was left for a long break",
                    student.display_name(),
                    day,
                    date,
                    format_time(start)
                ),
            };
            state.note_adjustment(note);
        }

        let buffer_end = session_end.saturating_add(self.instructor.block_buffer_minutes);
        if (pair || duration >= self.config.block_lesson_minutes)
            && buffer_end > session_end
            && buffer_end <= instructor_window.end
            && !collides(state.entries_on(day), session_end, buffer_end)
        {
            state.add_break(
                day,
                Lesson::rest(date, day, session_end, buffer_end, BreakKind::Buffer),
            );
        }

        Some(count)
    }

    /// Applies the long-break rule to a prospective lesson `[start, end]`.
    pub fn resolve_long_break(&self, entries: &[Lesson], start: Minute, end: Minute) -> LongBreak {
        let pause = self.instructor.min_pause_minutes;
        let long_break = self.instructor.long_break_minutes;
        let Some(run) = self.over_ceiling_run(entries, start, end) else {
            return LongBreak::NotNeeded;
        };

        let prev_end = run.iter().filter(|l| l.end <= start).map(|l| l.end).max();
        let Some(prev_end) = prev_end else {
            return LongBreak::Reject;
        };

        let rest_start = prev_end.checked_add(pause);
        let rest_end = rest_start.and_then(|s| s.checked_add(long_break));
        let moved = rest_end.and_then(|e| e.checked_add(pause));
        let moved_end = moved.and_then(|m| m.checked_add(end - start));
        let (Some(rest_start), Some(rest_end), Some(moved), Some(moved_end)) =
            (rest_start, rest_end, moved, moved_end)
        else {
            return LongBreak::Reject;
        };

        if self.over_ceiling_run(entries, moved, moved_end).is_some() {
            return LongBreak::Reject;
        }

        LongBreak::Shift {
            start: moved,
            rest: TimeWindow::new(rest_start, rest_end),
        }
    }

    /// The committed lessons contiguous with `[start, end]`, when together
    /// they span at least the ceiling.
    fn over_ceiling_run<'e>(
        &self,
        entries: &'e [Lesson],
        start: Minute,
        end: Minute,
    ) -> Option<Vec<&'e Lesson>> {
        let (span, run) = contiguous_run(entries, start, end, self.instructor.min_pause_minutes);
        (!run.is_empty() && span.duration() >= self.config.max_contiguous_minutes).then_some(run)
    }

    /// Checks windows, overlap, and (below the block threshold) the minimum pause.
    ///
    /// `windows` is (student window, instructor window).
    fn is_valid(
        &self,
        entries: &[Lesson],
        start: Minute,
        end: Minute,
        duration: Minute,
        windows: (TimeWindow, TimeWindow),
    ) -> bool {
        if !fits_windows(start, end, windows) || collides(entries, start, end) {
            return false;
        }
        if duration >= self.config.block_lesson_minutes {
            return true;
        }

        let pause = self.instructor.min_pause_minutes;
        entries.iter().filter(|l| !l.is_break()).all(|l| {
            if l.end <= start {
                start - l.end >= pause
            } else {
                l.start - end >= pause
            }
        })
    }

    /// Whether the second lesson of a block pair fits after `[start, end]`.
    ///
    /// Only windows, overlap, and the ceiling apply; no pause is required.
    fn pair_fits(
        &self,
        entries: &[Lesson],
        start: Minute,
        end: Minute,
        duration: Minute,
        windows: (TimeWindow, TimeWindow),
    ) -> bool {
        let Some(second_end) = end.checked_add(duration) else {
            return false;
        };
        fits_windows(end, second_end, windows)
            && !collides(entries, end, second_end)
            && self.over_ceiling_run(entries, start, second_end).is_none()
    }
}

fn fits_windows(
    start: Minute,
    end: Minute,
    (student, instructor): (TimeWindow, TimeWindow),
) -> bool {
    start < end && student.contains_span(start, end) && instructor.contains_span(start, end)
}

/// Whether `[start, end]` overlaps any entry, breaks included.
fn collides(entries: &[Lesson], start: Minute, end: Minute) -> bool {
    entries.iter().any(|l| l.overlaps(start, end))
}

/// Where a long break planned at `rest` actually goes.
///
/// The planned interval when it is free; otherwise the span from the end
/// of the entries occupying it up to `lesson_start`, if that span is free
/// and not empty.
fn long_break_span(
    entries: &[Lesson],
    rest: TimeWindow,
    lesson_start: Minute,
) -> Option<TimeWindow> {
    if !collides(entries, rest.start, rest.end) {
        return Some(rest);
    }
    let free_start = entries
        .iter()
        .filter(|l| l.overlaps(rest.start, rest.end))
        .map(|l| l.end)
        .max()?;
    (free_start < lesson_start && !collides(entries, free_start, lesson_start))
        .then(|| TimeWindow::new(free_start, lesson_start))
}

/// Grows `[start, end]` by every non-break lesson whose gap to the span is
/// below `pause`, until no more lessons join.
///
/// Returns the final span and the lessons that joined it.
fn contiguous_run(
    entries: &[Lesson],
    start: Minute,
    end: Minute,
    pause: Minute,
) -> (TimeWindow, Vec<&Lesson>) {
    let mut span = TimeWindow::new(start, end);
    let mut joined = vec![false; entries.len()];

    loop {
        let mut grew = false;
        for (idx, lesson) in entries.iter().enumerate() {
            if joined[idx] || lesson.is_break() {
                continue;
            }
            let gap = (lesson.start - span.end).max(span.start - lesson.end);
            if gap < pause {
                joined[idx] = true;
                span.start = span.start.min(lesson.start);
                span.end = span.end.max(lesson.end);
                grew = true;
            }
        }
        if !grew {
            break;
        }
    }

    let run = entries
        .iter()
        .zip(joined)
        .filter_map(|(lesson, j)| j.then_some(lesson))
        .collect();
    (span, run)
}
