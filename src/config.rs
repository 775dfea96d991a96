//! Planner configuration.
//!
//! Controls the slot granularity, the block and long-break thresholds, and
//! which week variants the optimizer explores. All fields have defaults, so
//! an empty JSON object is a valid configuration.
//!
//! # Exploration
//! The variant list is fully determined by the configuration: the chosen
//! ordering family, then `random_orderings` extra permutations drawn from
//! a `StdRng` seeded with `seed`, each crossed with `directions`.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::PlanningError;
use crate::models::{
    reversed, rotations, Minute, SweepDirection, WeekVariant, Weekday, MINUTES_PER_DAY,
};

/// Which deterministic weekday orderings to explore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderingFamily {
    /// Monday-first only.
    Canonical,
    /// All seven rotations of the week.
    #[default]
    Rotations,
    /// All rotations plus the Sunday-first reversal.
    RotationsAndReversed,
}

/// Planner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerConfig {
    /// Cursor step of the slot enumerator (minutes).
    pub slot_step_minutes: Minute,
    /// Contiguous lesson time that forces a long break (minutes).
    pub max_contiguous_minutes: Minute,
    /// Lessons at least this long count as block lessons (minutes).
    pub block_lesson_minutes: Minute,
    /// Deterministic ordering family.
    pub orderings: OrderingFamily,
    /// Additional seeded random orderings.
    pub random_orderings: usize,
    /// Seed for the random orderings.
    pub seed: u64,
    /// Sweep directions to explore, in order.
    pub directions: Vec<SweepDirection>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            slot_step_minutes: 5,
            max_contiguous_minutes: 180,
            block_lesson_minutes: 120,
            orderings: OrderingFamily::Rotations,
            random_orderings: 20,
            seed: 42,
            directions: vec![SweepDirection::Forward, SweepDirection::Backward],
        }
    }
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slot step.
    pub fn with_slot_step(mut self, minutes: Minute) -> Self {
        self.slot_step_minutes = minutes;
        self
    }

    /// Sets the long-break ceiling.
    pub fn with_max_contiguous(mut self, minutes: Minute) -> Self {
        self.max_contiguous_minutes = minutes;
        self
    }

    /// Sets the block lesson threshold.
    pub fn with_block_lesson_minutes(mut self, minutes: Minute) -> Self {
        self.block_lesson_minutes = minutes;
        self
    }

    /// Sets the ordering family.
    pub fn with_orderings(mut self, family: OrderingFamily) -> Self {
        self.orderings = family;
        self
    }

    /// Adds `count` seeded random orderings.
    pub fn with_random_orderings(mut self, count: usize, seed: u64) -> Self {
        self.random_orderings = count;
        self.seed = seed;
        self
    }

    /// Sets the sweep directions.
    pub fn with_directions(mut self, directions: Vec<SweepDirection>) -> Self {
        self.directions = directions;
        self
    }

    /// Checks that the configuration can drive a planning run.
    pub fn validate(&self) -> Result<(), PlanningError> {
        if self.slot_step_minutes <= 0 || self.slot_step_minutes > MINUTES_PER_DAY {
            return Err(PlanningError::InvalidConfig(format!(
                "slot step must be between 1 and {MINUTES_PER_DAY} minutes, got {}",
                self.slot_step_minutes
            )));
        }
        if self.max_contiguous_minutes <= 0 {
            return Err(PlanningError::InvalidConfig(format!(
                "contiguous ceiling must be positive, got {}",
                self.max_contiguous_minutes
            )));
        }
        if self.directions.is_empty() {
            return Err(PlanningError::InvalidConfig(
                "at least one sweep direction is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Weekday orderings to explore, duplicates removed (first kept).
    pub fn orderings(&self) -> Vec<Vec<Weekday>> {
        let mut orderings = match self.orderings {
            OrderingFamily::Canonical => vec![Weekday::ALL.to_vec()],
            OrderingFamily::Rotations => rotations(),
            OrderingFamily::RotationsAndReversed => {
                let mut all = rotations();
                all.push(reversed());
                all
            }
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        for _ in 0..self.random_orderings {
            let mut days = Weekday::ALL.to_vec();
            days.shuffle(&mut rng);
            orderings.push(days);
        }

        let mut unique: Vec<Vec<Weekday>> = Vec::with_capacity(orderings.len());
        for ordering in orderings {
            if !unique.contains(&ordering) {
                unique.push(ordering);
            }
        }
        unique
    }

    /// The pinned exploration list: every ordering crossed with every direction.
    pub fn variants(&self) -> Vec<WeekVariant> {
        self.orderings()
            .into_iter()
            .flat_map(|ordering| {
                self.directions
                    .iter()
                    .map(move |&direction| WeekVariant::new(ordering.clone(), direction))
            })
            .collect()
    }
}
