use presents_assign::{AssignOptions, AssignmentEngine, AssignmentError};
use presents_core::Roster;

#[test]
fn engine_is_deterministic_for_a_seed() {
    let roster = Roster::builtin().expect("builtin roster");
    let engine = AssignmentEngine::new(AssignOptions {
        seed: Some(42),
        ..AssignOptions::default()
    });

    let first = engine.run(&roster).expect("first run");
    let second = engine.run(&roster).expect("second run");

    assert_eq!(first.adults, second.adults);
    assert_eq!(first.children, second.children);
    assert_eq!(first.report.seed, 42);
    assert_eq!(first.report.adult_attempts, second.report.adult_attempts);
    assert_eq!(first.report.child_attempts, second.report.child_attempts);
}

#[test]
fn engine_reports_the_seed_it_drew() {
    let roster = Roster::builtin().expect("builtin roster");
    let outcome = AssignmentEngine::default().run(&roster).expect("run");

    let replay = AssignmentEngine::new(AssignOptions {
        seed: Some(outcome.report.seed),
        ..AssignOptions::default()
    })
    .run(&roster)
    .expect("replay");

    assert_eq!(outcome.adults, replay.adults);
    assert_eq!(outcome.children, replay.children);
}

#[test]
fn engine_report_carries_capacity_and_attempts() {
    let roster = Roster::builtin().expect("builtin roster");
    let outcome = AssignmentEngine::new(AssignOptions {
        seed: Some(7),
        max_attempts: 10_000,
    })
    .run(&roster)
    .expect("run");

    assert_eq!(outcome.report.capacity, 2);
    assert!(outcome.report.adult_attempts >= 1);
    assert!(outcome.report.child_attempts >= 1);
    assert_eq!(outcome.adults.len(), roster.adult_count());
    assert_eq!(outcome.children.child_count(), roster.child_count());

    let json = serde_json::to_value(&outcome.report).expect("report json");
    assert_eq!(json["seed"], 7);
    assert_eq!(json["capacity"], 2);
}

#[test]
fn engine_rejects_zero_attempts() {
    let roster = Roster::builtin().expect("builtin roster");
    let result = AssignmentEngine::new(AssignOptions {
        seed: Some(1),
        max_attempts: 0,
    })
    .run(&roster);
    assert!(matches!(result, Err(AssignmentError::InvalidOptions(_))));
}

#[test]
fn engine_handles_roster_without_children() {
    let roster = Roster::from_toml_str(
        r#"
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
        "#,
    )
    .expect("roster");

    let outcome = AssignmentEngine::new(AssignOptions {
        seed: Some(9),
        ..AssignOptions::default()
    })
    .run(&roster)
    .expect("run");

    assert_eq!(outcome.adults.len(), 4);
    assert!(outcome.children.is_empty());
    assert_eq!(outcome.report.capacity, 0);
    assert_eq!(outcome.report.child_attempts, 0);
}
