//! Week planning: slot enumeration, greedy assignment, gap filling, and
//! the variant search that ties them together.
//!
//! # Algorithm
//!
//! One variant run is strictly sequential: every commit can change who is
//! eligible for the next slot.
//!
//! 1. [`enumerate_slots`] walks each working day in the variant's sweep
//!    direction and records who could start a lesson at each step.
//! 2. [`GreedyAssigner`] visits the ordered slots and commits the
//!    highest-priority eligible student.
//! 3. [`GapFiller`] places remaining quota into the free gaps.
//!
//! [`WeekPlanner`] repeats this for every variant and keeps the run with
//! the most lessons, then the least idle time.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4: Priority Dispatching
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod gap_fill;
mod greedy;
mod metrics;
mod optimizer;
mod placement;
mod slots;

pub use gap_fill::{free_gaps, Gap, GapFiller};
pub use greedy::GreedyAssigner;
pub use metrics::{idle_minutes, ScheduleMetrics, VariantScore};
pub use optimizer::{PlanningInput, VariantRun, WeekPlanner};
pub use placement::{LongBreak, Placement};
pub use slots::{enumerate_slots, order_slots, CandidateSlot};
