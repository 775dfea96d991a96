//! Timetable domain models.
//!
//! Provides the data types for one planning week: the instructor and
//! students as configured, the lessons and breaks that end up on the
//! timeline, and the result handed back to the caller.
//!
//! # Domain Mappings
//!
//! | u-timetable | Driving school | Music school | Tutoring |
//! |-------------|----------------|--------------|----------|
//! | Instructor | Driving instructor | Instrument tutor | Tutor |
//! | Student | Learner driver | Pupil | Pupil |
//! | Lesson | Driving lesson | Lesson | Session |
//! | Block hour | Double lesson | Double lesson | Double session |

mod calendar;
mod instructor;
mod lesson;
mod schedule;
mod student;
mod time;
mod variant;

pub use calendar::{TimeWindow, Weekday, WeeklyAvailability};
pub use instructor::Instructor;
pub use lesson::{BreakKind, Lesson, LessonKind};
pub use schedule::{LessonRecord, ScheduleResult};
pub use student::Student;
pub use time::{
    format_time, parse_bounds, parse_time, Minute, DEFAULT_END, DEFAULT_START, MINUTES_PER_DAY,
};
pub use variant::{reversed, rotations, SweepDirection, WeekVariant};
