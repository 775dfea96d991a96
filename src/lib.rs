//! Weekly lesson timetabling for one instructor and many students.
//!
//! Each student has a weekly lesson quota, a lesson duration, and their own
//! availability. The instructor sets the working hours, the minimum pause
//! between lessons, the long break forced into long runs, and whether block
//! hours (two back-to-back lessons) are allowed. The planner maximizes the
//! number of quota lessons placed, using idle time as the tiebreaker.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Instructor`, `Student`, `Lesson`,
//!   `WeeklyAvailability`, `WeekVariant`, `ScheduleResult`
//! - **`dispatching`**: Day rules, winner priority, and per-run `ScheduleState`
//! - **`scheduler`**: Slot enumeration, greedy assignment, gap filling, and
//!   the variant search (`WeekPlanner`)
//! - **`config`**: `PlannerConfig` (step, thresholds, explored variants)
//! - **`validation`**: Input integrity checks (duplicate IDs, date list, durations)
//! - **`error`**: `PlanningError`
//!
//! # Example
//!
//! ```
//! use u_timetable::{plan_week, PlannerConfig, PlanningInput};
//!
//! let input: PlanningInput = serde_json::from_str(r#"{
//!     "instructor": {
//!         "availability": { "monday": ["09:00", "11:00"] },
//!         "blockHours": true,
//!         "dates": ["2025-01-06"]
//!     },
//!     "students": [
//!         { "id": "s1", "name": "Anna", "availability": { "monday": ["09:00", "11:00"] } }
//!     ]
//! }"#).unwrap();
//!
//! let result = plan_week(&input, &PlannerConfig::default()).unwrap();
//! assert_eq!(result.scheduled_lessons, 2);
//! assert!(result.warnings.is_empty());
//! ```
//!
//! # Logging
//!
//! The crate logs through the `log` facade and installs no logger.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::PlannerConfig;
pub use error::PlanningError;
pub use models::ScheduleResult;
pub use scheduler::{PlanningInput, WeekPlanner};

/// Plans one week with the given configuration.
///
/// Shorthand for `WeekPlanner::new(config.clone()).plan(input)`.
pub fn plan_week(
    input: &PlanningInput,
    config: &PlannerConfig,
) -> Result<ScheduleResult, PlanningError> {
    WeekPlanner::new(config.clone()).plan(input)
}
