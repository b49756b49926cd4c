use std::collections::BTreeSet;

use presents_assign::{AssignmentError, check_adult_assignment, compute_adult_assignments};
use presents_core::Roster;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const TWO_COUPLES: &str = r#"
[[adults]]
id = "a"
first_name = "A"
[[adults]]
id = "b"
first_name = "B"
[[adults]]
id = "c"
first_name = "C"
[[adults]]
id = "d"
first_name = "D"

[[families]]
id = "ab"
father = "a"
mother = "b"
[[families]]
id = "cd"
father = "c"
mother = "d"
"#;

#[test]
fn builtin_roster_gets_a_valid_bijection() {
    let roster = Roster::builtin().expect("builtin roster");
    let adults = roster.all_adults();

    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let matched =
            compute_adult_assignments(&roster, &adults, &mut rng, 10_000).expect("assignment");
        let assignment = &matched.assignment;

        assert_eq!(assignment.len(), adults.len());
        let receivers: BTreeSet<_> = assignment.iter().map(|(_, receiver)| receiver).collect();
        assert_eq!(receivers.len(), adults.len(), "seed {seed}");
        for (giver, receiver) in assignment.iter() {
            assert_ne!(giver, receiver);
            assert_ne!(
                roster.family_of(giver).expect("family").id(),
                roster.family_of(receiver).expect("family").id()
            );
        }
        assert!(check_adult_assignment(&roster, assignment).is_empty());
        assert!(matched.attempts >= 1);
    }
}

#[test]
fn two_couples_only_swap_across_families() {
    let roster = Roster::from_toml_str(TWO_COUPLES).expect("roster");
    let adults = roster.all_adults();
    let id = |key: &str| roster.adult_by_key(key).expect("adult");
    let (a, b, c, d) = (id("a"), id("b"), id("c"), id("d"));

    let mut seen = BTreeSet::new();
    for seed in 0..100 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let assignment = compute_adult_assignments(&roster, &adults, &mut rng, 1_000)
            .expect("assignment")
            .assignment;

        for giver in [a, b] {
            let receiver = assignment.receiver_of(giver).expect("receiver");
            assert!(receiver == c || receiver == d);
        }
        for giver in [c, d] {
            let receiver = assignment.receiver_of(giver).expect("receiver");
            assert!(receiver == a || receiver == b);
        }
        seen.insert(assignment.iter().collect::<Vec<_>>());
    }

    // four bijections satisfy the constraints and the draw reaches all of them
    assert_eq!(seen.len(), 4);
}

#[test]
fn same_seed_gives_same_assignment() {
    let roster = Roster::builtin().expect("builtin roster");
    let adults = roster.all_adults();

    let mut first = ChaCha8Rng::seed_from_u64(2024);
    let mut second = ChaCha8Rng::seed_from_u64(2024);
    let a = compute_adult_assignments(&roster, &adults, &mut first, 100).expect("first");
    let b = compute_adult_assignments(&roster, &adults, &mut second, 100).expect("second");
    assert_eq!(a, b);
}

#[test]
fn lone_couple_cannot_be_matched() {
    let roster = Roster::from_toml_str(
        r#"
        [[adults]]
        id = "a"
        first_name = "A"
        [[adults]]
        id = "b"
        first_name = "B"
        [[families]]
        id = "ab"
        father = "a"
        mother = "b"
        "#,
    )
    .expect("roster");
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let result = compute_adult_assignments(&roster, &roster.all_adults(), &mut rng, 20);
    match result {
        Err(AssignmentError::Exhausted { matcher, attempts }) => {
            assert_eq!(matcher, "adult-to-adult");
            assert_eq!(attempts, 20);
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}
