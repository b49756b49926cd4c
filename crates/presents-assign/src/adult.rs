use std::collections::{BTreeMap, BTreeSet};

use presents_core::{AdultId, Roster};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::candidates::{Candidate, sort_by_score};
use crate::errors::AssignmentError;
use crate::model::{AdultAssignment, Matched};

/// Computes 1-1 giver-receiver relations between adults.
///
/// Nobody gives to themselves or to their spouse, and everybody gives and
/// receives exactly once. Each pass draws fresh scores for every allowed
/// pair and commits greedily; a pass that leaves someone unmatched is thrown
/// away and redrawn, up to `max_attempts` passes.
pub fn compute_adult_assignments(
    roster: &Roster,
    adults: &[AdultId],
    rng: &mut ChaCha8Rng,
    max_attempts: u32,
) -> Result<Matched<AdultAssignment>, AssignmentError> {
    if max_attempts == 0 {
        return Err(AssignmentError::InvalidOptions(
            "max_attempts must be greater than zero".to_string(),
        ));
    }

    let pairs = allowed_pairs(roster, adults);
    debug!(adults = adults.len(), pairs = pairs.len(), "adult pairs enumerated");

    for attempt in 1..=max_attempts {
        if let Some(assignment) = draw_assignment(&pairs, adults.len(), rng) {
            return Ok(Matched {
                assignment,
                attempts: attempt,
            });
        }
    }

    warn!(attempts = max_attempts, "adult assignment attempts exhausted");
    Err(AssignmentError::Exhausted {
        matcher: "adult-to-adult",
        attempts: max_attempts,
    })
}

fn allowed_pairs(roster: &Roster, adults: &[AdultId]) -> Vec<(AdultId, AdultId)> {
    let mut pairs = Vec::new();
    for &giver in adults {
        for &receiver in adults {
            if giver != receiver && !roster.are_married(giver, receiver) {
                pairs.push((giver, receiver));
            }
        }
    }
    pairs
}

fn draw_assignment(
    pairs: &[(AdultId, AdultId)],
    adult_count: usize,
    rng: &mut ChaCha8Rng,
) -> Option<AdultAssignment> {
    let mut candidates: Vec<Candidate<AdultId>> = pairs
        .iter()
        .map(|&(giver, receiver)| Candidate::draw(giver, receiver, rng))
        .collect();
    sort_by_score(&mut candidates);

    let mut given: BTreeMap<AdultId, AdultId> = BTreeMap::new();
    let mut received: BTreeSet<AdultId> = BTreeSet::new();
    for candidate in candidates {
        if !given.contains_key(&candidate.giver) && !received.contains(&candidate.receiver) {
            given.insert(candidate.giver, candidate.receiver);
            received.insert(candidate.receiver);
        }
    }

    // a greedy dead end leaves someone out; the caller redraws
    (given.len() == adult_count).then(|| given.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn couples(count: usize) -> Roster {
        let mut toml = String::new();
        for index in 0..count {
            toml.push_str(&format!(
                "[[adults]]\nid = \"f{index}\"\nfirst_name = \"F{index}\"\n\n\
                 [[adults]]\nid = \"m{index}\"\nfirst_name = \"M{index}\"\n\n\
                 [[families]]\nid = \"fam{index}\"\nfather = \"f{index}\"\nmother = \"m{index}\"\n\n"
            ));
        }
        Roster::from_toml_str(&toml).expect("couples roster")
    }

    #[test]
    fn allowed_pairs_skip_self_and_spouse() {
        let roster = couples(2);
        let adults = roster.all_adults();
        let pairs = allowed_pairs(&roster, &adults);
        assert_eq!(pairs.len(), 8);
        assert!(
            pairs
                .iter()
                .all(|(giver, receiver)| giver != receiver && !roster.are_married(*giver, *receiver))
        );
    }

    #[test]
    fn rejects_zero_attempts() {
        let roster = couples(2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = compute_adult_assignments(&roster, &roster.all_adults(), &mut rng, 0);
        assert!(matches!(result, Err(AssignmentError::InvalidOptions(_))));
    }

    #[test]
    fn single_couple_exhausts_attempts() {
        let roster = couples(1);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = compute_adult_assignments(&roster, &roster.all_adults(), &mut rng, 5);
        assert!(matches!(
            result,
            Err(AssignmentError::Exhausted { attempts: 5, .. })
        ));
    }

    #[test]
    fn empty_roster_yields_empty_assignment() {
        let roster = Roster::from_toml_str("").expect("empty roster");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let matched =
            compute_adult_assignments(&roster, &roster.all_adults(), &mut rng, 1).expect("match");
        assert!(matched.assignment.is_empty());
        assert_eq!(matched.attempts, 1);
    }
}
