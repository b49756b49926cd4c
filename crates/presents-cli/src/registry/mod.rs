mod logging;
mod run;

pub use logging::{init_run_logging, init_stderr_logging};
pub use run::{AssignmentsArtifact, RunContext, start_run, write_assignments};

use presents_core::RosterError;
use thiserror::Error;

/// Registry-level errors for run artifacts.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("roster error: {0}")]
    Roster(#[from] RosterError),
    #[error("logging error: {0}")]
    Logging(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
