use std::collections::BTreeSet;

use presents_core::{AdultId, ChildId, Roster};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::candidates::{Candidate, sort_by_score};
use crate::errors::AssignmentError;
use crate::model::{ChildAssignment, Matched};

/// Maximum number of children one giver may be assigned.
pub fn child_capacity(child_count: usize, giver_count: usize) -> usize {
    if giver_count == 0 {
        0
    } else {
        child_count.div_ceil(giver_count)
    }
}

/// Computes 1-n giver-receiver relations between adults and children.
///
/// Exempt adults never give. Nobody gives to their own child or godchild,
/// every child gets exactly one giver, and every non-exempt adult gets at
/// least one and at most `capacity` children. Each allowed pair is entered
/// `capacity` times with independent scores so that one giver can collect
/// up to `capacity` children within a single greedy pass.
pub fn compute_child_assignments(
    roster: &Roster,
    adults: &[AdultId],
    children: &[ChildId],
    rng: &mut ChaCha8Rng,
    max_attempts: u32,
) -> Result<Matched<ChildAssignment>, AssignmentError> {
    if max_attempts == 0 {
        return Err(AssignmentError::InvalidOptions(
            "max_attempts must be greater than zero".to_string(),
        ));
    }

    if children.is_empty() {
        return Ok(Matched {
            assignment: ChildAssignment::default(),
            attempts: 0,
        });
    }

    let givers: Vec<AdultId> = adults
        .iter()
        .copied()
        .filter(|adult| !roster.is_exempt_from_child_gifting(*adult))
        .collect();
    if givers.is_empty() {
        return Err(AssignmentError::Infeasible(
            "every adult is exempt from children gifts".to_string(),
        ));
    }
    if children.len() < givers.len() {
        return Err(AssignmentError::Infeasible(format!(
            "{} children cannot reach all {} givers",
            children.len(),
            givers.len()
        )));
    }

    let pairs = allowed_pairs(roster, &givers, children);
    for &giver in &givers {
        if !pairs.iter().any(|(candidate, _)| *candidate == giver) {
            return Err(AssignmentError::Infeasible(format!(
                "every child is forbidden for {}",
                roster.adult(giver)?
            )));
        }
    }

    let capacity = child_capacity(children.len(), givers.len());
    debug!(
        givers = givers.len(),
        children = children.len(),
        pairs = pairs.len(),
        capacity,
        "child pairs enumerated"
    );

    for attempt in 1..=max_attempts {
        if let Some(assignment) = draw_assignment(&pairs, &givers, children.len(), capacity, rng)
        {
            return Ok(Matched {
                assignment,
                attempts: attempt,
            });
        }
    }

    warn!(attempts = max_attempts, capacity, "child assignment attempts exhausted");
    Err(AssignmentError::Exhausted {
        matcher: "adult-to-child",
        attempts: max_attempts,
    })
}

fn allowed_pairs(
    roster: &Roster,
    givers: &[AdultId],
    children: &[ChildId],
) -> Vec<(AdultId, ChildId)> {
    let mut pairs = Vec::new();
    for &giver in givers {
        for &child in children {
            if !roster.is_parent_of(giver, child) && !roster.is_godparent_of(giver, child) {
                pairs.push((giver, child));
            }
        }
    }
    pairs
}

fn draw_assignment(
    pairs: &[(AdultId, ChildId)],
    givers: &[AdultId],
    child_count: usize,
    capacity: usize,
    rng: &mut ChaCha8Rng,
) -> Option<ChildAssignment> {
    let mut candidates: Vec<Candidate<ChildId>> = Vec::with_capacity(pairs.len() * capacity);
    for &(giver, child) in pairs {
        for _ in 0..capacity {
            candidates.push(Candidate::draw(giver, child, rng));
        }
    }
    sort_by_score(&mut candidates);

    let mut assignment = ChildAssignment::default();
    let mut covered: BTreeSet<ChildId> = BTreeSet::new();
    for candidate in candidates {
        if assignment.assigned_count(candidate.giver) < capacity
            && !covered.contains(&candidate.receiver)
        {
            assignment.assign(candidate.giver, candidate.receiver);
            covered.insert(candidate.receiver);
        }
    }

    // both full coverage and full participation, otherwise the caller redraws
    (covered.len() == child_count && assignment.giver_count() == givers.len())
        .then_some(assignment)
}
