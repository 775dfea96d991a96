//! Input validation for planning requests.
//!
//! Checks structural integrity of the instructor and students before any
//! scheduling. Detects:
//! - Missing or duplicate student IDs
//! - An empty or oversized date list
//! - Non-positive lesson durations
//! - Negative instructor pause, break, or buffer settings
//! - Durations and settings longer than a day
//!
//! Unsatisfiable-but-valid input (e.g. a student with no overlapping
//! availability) is not an error here; it surfaces later as a shortfall.

use crate::models::{Instructor, Student, MINUTES_PER_DAY};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two students share the same ID.
    DuplicateId,
    /// A student has an empty ID.
    MissingId,
    /// The instructor lists no dates.
    MissingDates,
    /// The instructor lists more than seven dates.
    TooManyDates,
    /// A student's lesson duration is zero or negative.
    InvalidDuration,
    /// An instructor setting is negative.
    InvalidSetting,
    /// A duration or setting is longer than a day.
    ExceedsDay,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data of a planning request.
///
/// Checks:
/// 1. The instructor lists between one and seven dates
/// 2. Instructor pause, long break, and buffer are not negative
/// 3. Every student has a non-empty ID
/// 4. No duplicate student IDs
/// 5. Every lesson duration is positive
/// 6. No duration or setting exceeds one day (1440 minutes)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(instructor: &Instructor, students: &[Student]) -> ValidationResult {
    let mut errors = Vec::new();

    if instructor.dates.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingDates,
            "Instructor lists no dates for the week",
        ));
    } else if instructor.dates.len() > 7 {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManyDates,
            format!(
                "Instructor lists {} dates; a week has at most 7",
                instructor.dates.len()
            ),
        ));
    }

    for (label, value) in [
        ("minimum pause", instructor.min_pause_minutes),
        ("long break", instructor.long_break_minutes),
        ("block buffer", instructor.block_buffer_minutes),
    ] {
        if value < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSetting,
                format!("Instructor {label} must not be negative, got {value}"),
            ));
        } else if value > MINUTES_PER_DAY {
            errors.push(ValidationError::new(
                ValidationErrorKind::ExceedsDay,
                format!("Instructor {label} of {value} minutes is longer than a day"),
            ));
        }
    }

    let mut student_ids = HashSet::new();
    for (idx, student) in students.iter().enumerate() {
        if student.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingId,
                format!("Student at position {idx} has no ID"),
            ));
        } else if !student_ids.insert(student.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate student ID: {}", student.id),
            ));
        }

        if student.lesson_minutes <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "Student '{}' has lesson duration {}; it must be positive",
                    student.id, student.lesson_minutes
                ),
            ));
        } else if student.lesson_minutes > MINUTES_PER_DAY {
            errors.push(ValidationError::new(
                ValidationErrorKind::ExceedsDay,
                format!(
                    "Student '{}' has lesson duration {}; it must fit in a day",
                    student.id, student.lesson_minutes
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
