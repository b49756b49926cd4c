//! Randomized present assignments for the family draw.
//!
//! Two matchers share the same greedy pattern: score every allowed
//! giver/receiver pair with a uniform random draw, commit pairs from the
//! highest score down, and redraw everything when the greedy pass dead-ends.

pub mod adult;
pub mod candidates;
pub mod checks;
pub mod child;
pub mod engine;
pub mod errors;
pub mod model;

pub use adult::compute_adult_assignments;
pub use checks::{AssignmentIssue, check_adult_assignment, check_child_assignment};
pub use child::{child_capacity, compute_child_assignments};
pub use engine::{AssignmentEngine, AssignmentOutcome};
pub use errors::AssignmentError;
pub use model::{AdultAssignment, AssignOptions, AssignmentReport, ChildAssignment, Matched};
