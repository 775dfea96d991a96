//! Planning errors.

use thiserror::Error;

use crate::validation::ValidationError;

/// Reasons a planning request is rejected before any scheduling starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    /// The instructor or student data is structurally invalid.
    #[error("invalid planning input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
    /// The planner configuration cannot drive a run.
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),
}

impl From<Vec<ValidationError>> for PlanningError {
    fn from(errors: Vec<ValidationError>) -> Self {
        PlanningError::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
