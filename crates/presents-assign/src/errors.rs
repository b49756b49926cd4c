use presents_core::RosterError;
use thiserror::Error;

use crate::checks::AssignmentIssue;

/// Errors emitted by the matchers and the assignment engine.
#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("roster error: {0}")]
    Roster(#[from] RosterError),
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    /// The constraints can never be met, whatever the draw.
    #[error("infeasible assignment: {0}")]
    Infeasible(String),
    #[error("no valid {matcher} assignment after {attempts} attempts")]
    Exhausted {
        matcher: &'static str,
        attempts: u32,
    },
    #[error("assignment violates {} invariant(s)", .0.len())]
    InvariantViolated(Vec<AssignmentIssue>),
}
