//! Lesson model.
//!
//! Every entry on a day's timeline is a [`Lesson`]: either a billable
//! lesson for a student or a break. Breaks are a distinct
//! [`LessonKind`], so they can never be counted as a student's lesson.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::{TimeWindow, Weekday};
use super::time::Minute;

/// Why a break was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakKind {
    /// Forced into a long run of contiguous lessons.
    Long,
    /// Appended after a block session.
    Buffer,
}

/// Classification of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LessonKind {
    /// A single lesson (the student's only session that day).
    Normal,
    /// One of the two back-to-back lessons of a block session.
    BlockMember,
    /// Not a lesson; instructor rest time.
    Break(BreakKind),
}

/// A committed timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Calendar date.
    pub date: NaiveDate,
    /// Weekday the date was assigned to.
    pub weekday: Weekday,
    /// Start (minute of day).
    pub start: Minute,
    /// End (minute of day).
    pub end: Minute,
    /// Entry kind.
    pub kind: LessonKind,
    /// Student the lesson belongs to. `None` for breaks.
    pub student_id: Option<String>,
}

impl Lesson {
    /// Creates a normal lesson.
    pub fn normal(
        date: NaiveDate,
        weekday: Weekday,
        start: Minute,
        end: Minute,
        student_id: impl Into<String>,
    ) -> Self {
        Self {
            date,
            weekday,
            start,
            end,
            kind: LessonKind::Normal,
            student_id: Some(student_id.into()),
        }
    }

    /// Creates one member of a block pair.
    pub fn block_member(
        date: NaiveDate,
        weekday: Weekday,
        start: Minute,
        end: Minute,
        student_id: impl Into<String>,
    ) -> Self {
        Self {
            kind: LessonKind::BlockMember,
            ..Self::normal(date, weekday, start, end, student_id)
        }
    }

    /// Creates a break entry.
    pub fn rest(
        date: NaiveDate,
        weekday: Weekday,
        start: Minute,
        end: Minute,
        kind: BreakKind,
    ) -> Self {
        Self {
            date,
            weekday,
            start,
            end,
            kind: LessonKind::Break(kind),
            student_id: None,
        }
    }

    /// Whether this entry is a break rather than a lesson.
    #[inline]
    pub fn is_break(&self) -> bool {
        matches!(self.kind, LessonKind::Break(_))
    }

    /// Whether this entry is a lesson for the given student.
    pub fn is_for(&self, student_id: &str) -> bool {
        self.student_id.as_deref() == Some(student_id)
    }

    /// Duration in minutes.
    #[inline]
    pub fn duration(&self) -> Minute {
        self.end - self.start
    }

    /// The entry as a time window.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Whether this entry overlaps the span `[start, end]`.
    #[inline]
    pub fn overlaps(&self, start: Minute, end: Minute) -> bool {
        self.start < end && start < self.end
    }
}
