use std::time::Instant;

use presents_core::Roster;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::adult::compute_adult_assignments;
use crate::checks::{AssignmentIssue, check_adult_assignment, check_child_assignment};
use crate::child::{child_capacity, compute_child_assignments};
use crate::errors::AssignmentError;
use crate::model::{AdultAssignment, AssignOptions, AssignmentReport, ChildAssignment};

/// Both assignments of a run plus its report.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    pub adults: AdultAssignment,
    pub children: ChildAssignment,
    pub report: AssignmentReport,
}

/// Entry point for drawing the presents assignments of a roster.
#[derive(Debug, Clone, Default)]
pub struct AssignmentEngine {
    options: AssignOptions,
}

impl AssignmentEngine {
    pub fn new(options: AssignOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AssignOptions {
        &self.options
    }

    /// Draw both assignments from a single RNG stream.
    ///
    /// With a fixed seed the same roster always yields the same outcome.
    /// Every result is re-checked against the assignment invariants before
    /// being returned.
    pub fn run(&self, roster: &Roster) -> Result<AssignmentOutcome, AssignmentError> {
        let start = Instant::now();
        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let adults = roster.all_adults();
        let children = roster.all_children();

        info!(
            seed,
            adults = adults.len(),
            children = children.len(),
            max_attempts = self.options.max_attempts,
            "assignment started"
        );

        let adult = compute_adult_assignments(roster, &adults, &mut rng, self.options.max_attempts)?;
        ensure_valid("adult-to-adult", check_adult_assignment(roster, &adult.assignment))?;
        info!(attempts = adult.attempts, "adult assignments drawn");

        let child = compute_child_assignments(
            roster,
            &adults,
            &children,
            &mut rng,
            self.options.max_attempts,
        )?;
        let capacity = child_capacity(children.len(), roster.child_givers().len());
        ensure_valid(
            "adult-to-child",
            check_child_assignment(roster, &child.assignment, capacity),
        )?;
        info!(attempts = child.attempts, capacity, "child assignments drawn");

        let report = AssignmentReport {
            seed,
            capacity,
            adult_attempts: adult.attempts,
            child_attempts: child.attempts,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(seed, duration_ms = report.duration_ms, "assignment completed");

        Ok(AssignmentOutcome {
            adults: adult.assignment,
            children: child.assignment,
            report,
        })
    }
}

fn ensure_valid(matcher: &str, issues: Vec<AssignmentIssue>) -> Result<(), AssignmentError> {
    if issues.is_empty() {
        return Ok(());
    }
    for issue in &issues {
        warn!(matcher, code = issue.code, message = %issue.message, "assignment invariant violated");
    }
    Err(AssignmentError::InvariantViolated(issues))
}
