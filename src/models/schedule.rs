//! Schedule result model.
//!
//! A [`ScheduleResult`] is the outcome of the best variant: its timeline
//! (lessons and breaks), the aggregate metrics it was scored by, and the
//! warnings a caller should surface.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::lesson::{Lesson, LessonKind};
use super::student::Student;
use super::time::{format_time, Minute};
use super::variant::WeekVariant;

/// The final week plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    /// All committed entries (breaks included), ordered by date then start.
    pub lessons: Vec<Lesson>,
    /// Number of non-break lessons.
    pub scheduled_lessons: usize,
    /// Sum of all students' weekly quotas.
    pub required_lessons: u32,
    /// Idle minutes between consecutive lessons, summed over all days.
    pub idle_minutes: Minute,
    /// Missing lessons per student id. Students with no shortfall are omitted.
    pub shortfall: BTreeMap<String, u32>,
    /// Human-readable warnings (shortfalls and forced adjustments).
    pub warnings: Vec<String>,
    /// One-line summary.
    pub summary: String,
    /// The variant that produced this plan.
    pub variant: WeekVariant,
}

/// A flat lesson row for external writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecord {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub start_time: String,
    /// `HH:MM`.
    pub end_time: String,
    /// Student id (`None` for breaks).
    pub student_id: Option<String>,
    /// Student display name (`None` for breaks).
    pub student_name: Option<String>,
    /// Student note, if any.
    pub notes: Option<String>,
    /// Entry kind.
    pub kind: LessonKind,
}

impl ScheduleResult {
    /// Non-break lessons only.
    pub fn booked_lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.iter().filter(|l| !l.is_break())
    }

    /// Lessons of one student.
    pub fn lessons_for(&self, student_id: &str) -> Vec<&Lesson> {
        self.lessons.iter().filter(|l| l.is_for(student_id)).collect()
    }

    /// Whether every student received their full quota.
    pub fn is_complete(&self) -> bool {
        self.shortfall.is_empty()
    }

    /// Flattens the plan into output rows, chronologically.
    ///
    /// Student names and notes are looked up in `students`; breaks are
    /// included only when `include_breaks` is set.
    pub fn records(&self, students: &[Student], include_breaks: bool) -> Vec<LessonRecord> {
        let by_id: HashMap<&str, &Student> = students.iter().map(|s| (s.id.as_str(), s)).collect();

        self.lessons
            .iter()
            .filter(|l| include_breaks || !l.is_break())
            .map(|l| {
                let student = l.student_id.as_deref().and_then(|id| by_id.get(id));
                LessonRecord {
                    date: l.date.format("%Y-%m-%d").to_string(),
                    start_time: format_time(l.start),
                    end_time: format_time(l.end),
                    student_id: l.student_id.clone(),
                    student_name: student.map(|s| s.display_name().to_string()),
                    notes: student.and_then(|s| s.notes.clone()),
                    kind: l.kind,
                }
            })
            .collect()
    }
}
