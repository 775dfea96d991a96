//! Mutable scheduling state of one variant run.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Lesson, Student, Weekday};

/// Runtime scheduling state consulted by the day rules and mutated by
/// commits.
///
/// Owned by exactly one variant run. Each day's entries (lessons and
/// breaks) are kept sorted by start time.
#[derive(Debug, Clone, Default)]
pub struct ScheduleState {
    /// Committed entries per weekday, sorted by start.
    entries: BTreeMap<Weekday, Vec<Lesson>>,
    /// Lessons committed per student.
    committed: HashMap<String, u32>,
    /// Sessions committed per student, indexed by weekday. A block pair is one session.
    sessions: HashMap<String, [u32; 7]>,
    /// Forced adjustments made during this run.
    adjustments: Vec<String>,
}

impl ScheduleState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed entries of a day, sorted by start.
    pub fn entries_on(&self, day: Weekday) -> &[Lesson] {
        self.entries.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lessons committed so far for a student.
    pub fn committed(&self, student_id: &str) -> u32 {
        self.committed.get(student_id).copied().unwrap_or(0)
    }

    /// Lessons still needed to reach the student's quota.
    pub fn remaining(&self, student: &Student) -> u32 {
        student.lessons_per_week.saturating_sub(self.committed(&student.id))
    }

    /// Sessions committed for a student on a day.
    pub fn sessions_on(&self, student_id: &str, day: Weekday) -> u32 {
        self.sessions
            .get(student_id)
            .map(|days| days[day.index()])
            .unwrap_or(0)
    }

    /// Commits one session (a single lesson or a block pair) for a student.
    pub fn commit_session(&mut self, student_id: &str, day: Weekday, lessons: Vec<Lesson>) {
        let count = lessons.len() as u32;
        for lesson in lessons {
            self.insert_entry(day, lesson);
        }
        *self.committed.entry(student_id.to_string()).or_insert(0) += count;
        self.sessions
            .entry(student_id.to_string())
            .or_insert([0; 7])[day.index()] += 1;
    }

    /// Adds a break to a day's timeline.
    pub fn add_break(&mut self, day: Weekday, rest: Lesson) {
        debug_assert!(rest.is_break());
        self.insert_entry(day, rest);
    }

    /// Records a forced adjustment message.
    pub fn note_adjustment(&mut self, message: impl Into<String>) {
        self.adjustments.push(message.into());
    }

    /// Forced adjustments made so far.
    pub fn adjustments(&self) -> &[String] {
        &self.adjustments
    }

    /// Total number of non-break lessons committed.
    pub fn lesson_count(&self) -> usize {
        self.entries
            .values()
            .flatten()
            .filter(|l| !l.is_break())
            .count()
    }

    /// Consumes the state, returning all entries ordered by date then start,
    /// and the adjustment messages.
    pub fn into_parts(self) -> (Vec<Lesson>, Vec<String>) {
        let mut lessons: Vec<Lesson> = self.entries.into_values().flatten().collect();
        lessons.sort_by_key(|l| (l.date, l.start, l.end));
        (lessons, self.adjustments)
    }

    fn insert_entry(&mut self, day: Weekday, lesson: Lesson) {
        let day_entries = self.entries.entry(day).or_default();
        let pos = day_entries.partition_point(|l| (l.start, l.end) <= (lesson.start, lesson.end));
        day_entries.insert(pos, lesson);
    }
}
