//! Variant search over weekday orderings and sweep directions.
//!
//! # Algorithm
//!
//! 1. Validate the configuration and the input.
//! 2. For every variant in the pinned exploration list, run slot
//!    enumeration, greedy assignment, and gap filling on a fresh
//!    [`ScheduleState`].
//! 3. Score each run (lessons desc, idle minutes asc) and keep the best;
//!    the earliest variant wins exact ties.
//!
//! Runs share nothing mutable. With the `parallel` feature they are
//! evaluated on the rayon pool and merged in exploration order, so the
//! outcome matches the sequential search.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::gap_fill::GapFiller;
use super::greedy::GreedyAssigner;
use super::metrics::{ScheduleMetrics, VariantScore};
use super::placement::Placement;
use super::slots::{enumerate_slots, order_slots};
use crate::config::PlannerConfig;
use crate::dispatching::ScheduleState;
use crate::error::PlanningError;
use crate::models::{Instructor, Lesson, ScheduleResult, Student, WeekVariant};
use crate::validation::validate_input;

/// Everything a planning run needs: one instructor and their students.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningInput {
    /// The instructor.
    pub instructor: Instructor,
    /// Students to schedule.
    #[serde(default)]
    pub students: Vec<Student>,
}

impl PlanningInput {
    /// Creates a planning input.
    pub fn new(instructor: Instructor, students: Vec<Student>) -> Self {
        Self {
            instructor,
            students,
        }
    }
}

/// Outcome of one variant run.
#[derive(Debug, Clone)]
pub struct VariantRun {
    /// The explored variant.
    pub variant: WeekVariant,
    /// Committed entries, breaks included, sorted by (date, start).
    pub lessons: Vec<Lesson>,
    /// Forced adjustments made during the run.
    pub adjustments: Vec<String>,
    /// Run metrics.
    pub metrics: ScheduleMetrics,
}

impl VariantRun {
    /// Score of this run.
    pub fn score(&self) -> VariantScore {
        self.metrics.score()
    }
}

/// Plans a week by exploring variants and keeping the best run.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::config::PlannerConfig;
/// use u_timetable::models::{Instructor, Student, Weekday};
/// use u_timetable::scheduler::{PlanningInput, WeekPlanner};
///
/// let instructor = Instructor::new(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
///     .with_window(Weekday::Monday, "09:00", "13:00");
/// let students = vec![
///     Student::new("s1").with_lessons_per_week(1).with_window(Weekday::Monday, "09:00", "13:00"),
///     Student::new("s2").with_lessons_per_week(1).with_window(Weekday::Monday, "09:00", "13:00"),
/// ];
///
/// let planner = WeekPlanner::new(PlannerConfig::default());
/// let result = planner.plan(&PlanningInput::new(instructor, students)).unwrap();
/// assert_eq!(result.scheduled_lessons, 2);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeekPlanner {
    config: PlannerConfig,
}

impl WeekPlanner {
    /// Creates a planner.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans the week over the configured variants.
    pub fn plan(&self, input: &PlanningInput) -> Result<ScheduleResult, PlanningError> {
        self.plan_variants(input, &self.config.variants())
    }

    /// Plans the week over an explicit variant list, in order.
    pub fn plan_variants(
        &self,
        input: &PlanningInput,
        variants: &[WeekVariant],
    ) -> Result<ScheduleResult, PlanningError> {
        self.config.validate()?;
        validate_input(&input.instructor, &input.students)?;
        if variants.is_empty() {
            return Err(PlanningError::InvalidConfig(
                "no week variants to explore".to_string(),
            ));
        }

        info!(
            "Planning {} student(s) over {} variant(s)",
            input.students.len(),
            variants.len()
        );

        let mut best: Option<VariantRun> = None;
        for run in self.evaluate(input, variants) {
            let score = run.score();
            debug!(
                "Variant {}: {} lesson(s), {} idle minute(s)",
                run.variant, score.lessons, score.idle_minutes
            );
            let improves = best
                .as_ref()
                .map_or(true, |current| score.is_better_than(&current.score()));
            if improves {
                best = Some(run);
            }
        }

        let best = best.ok_or_else(|| {
            PlanningError::InvalidConfig("no week variants to explore".to_string())
        })?;
        info!(
            "Selected variant {} with {}/{} lesson(s)",
            best.variant, best.metrics.scheduled_lessons, best.metrics.required_lessons
        );

        Ok(build_result(input, best))
    }

    /// Runs enumeration, greedy assignment, and gap filling for one variant.
    ///
    /// Deterministic: the same input and variant always yield the same run.
    pub fn run_variant(&self, input: &PlanningInput, variant: &WeekVariant) -> VariantRun {
        let instructor = &input.instructor;
        let students = &input.students;
        let mut state = ScheduleState::new();

        let mut slots = enumerate_slots(
            instructor,
            students,
            &state,
            variant.direction,
            self.config.slot_step_minutes,
        );
        order_slots(&mut slots, variant);

        let placement = Placement::new(instructor, &self.config);
        GreedyAssigner::new(instructor, students, placement).assign(&slots, &mut state);
        GapFiller::new(instructor, students, &self.config, placement).fill(&mut state);

        let (lessons, adjustments) = state.into_parts();
        let metrics = ScheduleMetrics::calculate(&lessons, students);
        VariantRun {
            variant: variant.clone(),
            lessons,
            adjustments,
            metrics,
        }
    }

    #[cfg(feature = "parallel")]
    fn evaluate(&self, input: &PlanningInput, variants: &[WeekVariant]) -> Vec<VariantRun> {
        use rayon::prelude::*;

        variants
            .par_iter()
            .map(|variant| self.run_variant(input, variant))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate(&self, input: &PlanningInput, variants: &[WeekVariant]) -> Vec<VariantRun> {
        variants
            .iter()
            .map(|variant| self.run_variant(input, variant))
            .collect()
    }
}

fn build_result(input: &PlanningInput, run: VariantRun) -> ScheduleResult {
    let mut warnings = run.adjustments;
    for student in &input.students {
        if let Some(missing) = run.metrics.shortfall.get(&student.id) {
            warnings.push(format!(
                "Student {} is {} lesson(s) short of the weekly quota of {}",
                student.display_name(),
                missing,
                student.lessons_per_week
            ));
        }
    }

    let week = input
        .instructor
        .dates
        .first()
        .map(|d| d.to_string())
        .unwrap_or_default();
    let summary = format!(
        "Planned {}/{} lessons for the week of {}",
        run.metrics.scheduled_lessons, run.metrics.required_lessons, week
    );

    ScheduleResult {
        lessons: run.lessons,
        scheduled_lessons: run.metrics.scheduled_lessons,
        required_lessons: run.metrics.required_lessons,
        idle_minutes: run.metrics.idle_minutes,
        shortfall: run.metrics.shortfall,
        warnings,
        summary,
        variant: run.variant,
    }
}
