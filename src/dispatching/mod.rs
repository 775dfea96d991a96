//! Day rules, winner selection, and the per-run scheduling state.
//!
//! Provides the single eligibility predicate shared by every scheduling
//! pass, the priority key used to pick one student per slot, and the
//! [`ScheduleState`] those rules are evaluated against.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use u_timetable::dispatching::{rules, ScheduleState};
//! use u_timetable::models::{Instructor, Student, Weekday};
//!
//! let instructor = Instructor::new(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
//!     .with_window(Weekday::Monday, "09:00", "12:00")
//!     .with_block_hours(true);
//! let a = Student::new("a").with_lessons_per_week(2);
//! let b = Student::new("b").with_lessons_per_week(1);
//!
//! let state = ScheduleState::new();
//! let winner = rules::select_winner(&[&a, &b], Weekday::Monday, &state, &instructor);
//! assert_eq!(winner.map(|s| s.id.as_str()), Some("a"));
//! ```

mod context;
pub mod rules;

pub use context::ScheduleState;
