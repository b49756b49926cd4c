use std::collections::BTreeMap;

use presents_core::{AdultId, ChildId, Roster};
use serde::Serialize;

use crate::model::{AdultAssignment, ChildAssignment};

/// A violated assignment invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentIssue {
    pub code: &'static str,
    pub message: String,
}

impl AssignmentIssue {
    fn new(code: &'static str, message: String) -> Self {
        Self { code, message }
    }
}

/// Check that an adult assignment is a bijection over the roster's adults
/// with no self or spouse pair.
pub fn check_adult_assignment(
    roster: &Roster,
    assignment: &AdultAssignment,
) -> Vec<AssignmentIssue> {
    let mut issues = Vec::new();
    let mut received: BTreeMap<AdultId, usize> = BTreeMap::new();

    for (giver, receiver) in assignment.iter() {
        if roster.adult(giver).is_err() || roster.adult(receiver).is_err() {
            issues.push(AssignmentIssue::new(
                "unknown_person",
                format!("{giver:?} => {receiver:?} is not in the roster"),
            ));
            continue;
        }
        *received.entry(receiver).or_insert(0) += 1;

        if giver == receiver {
            issues.push(AssignmentIssue::new(
                "self_gift",
                format!("{} gives to themselves", adult_name(roster, giver)),
            ));
        } else if roster.are_married(giver, receiver) {
            issues.push(AssignmentIssue::new(
                "spouse_gift",
                format!(
                    "{} gives to their spouse {}",
                    adult_name(roster, giver),
                    adult_name(roster, receiver)
                ),
            ));
        }
    }

    for adult in roster.all_adults() {
        if assignment.receiver_of(adult).is_none() {
            issues.push(AssignmentIssue::new(
                "missing_giver",
                format!("{} gives to nobody", adult_name(roster, adult)),
            ));
        }
        match received.get(&adult).copied().unwrap_or(0) {
            0 => issues.push(AssignmentIssue::new(
                "missing_receiver",
                format!("{} receives nothing", adult_name(roster, adult)),
            )),
            1 => {}
            count => issues.push(AssignmentIssue::new(
                "duplicate_receiver",
                format!("{} receives {count} presents", adult_name(roster, adult)),
            )),
        }
    }

    issues
}

/// Check coverage, participation, capacity and family constraints of a
/// child assignment.
pub fn check_child_assignment(
    roster: &Roster,
    assignment: &ChildAssignment,
    capacity: usize,
) -> Vec<AssignmentIssue> {
    let mut issues = Vec::new();
    let mut covered: BTreeMap<ChildId, usize> = BTreeMap::new();

    for (giver, children) in assignment.iter() {
        if roster.adult(giver).is_err() {
            issues.push(AssignmentIssue::new(
                "unknown_person",
                format!("{giver:?} is not in the roster"),
            ));
            continue;
        }
        if roster.is_exempt_from_child_gifting(giver) {
            issues.push(AssignmentIssue::new(
                "exempt_giver",
                format!("{} is exempt but gives to children", adult_name(roster, giver)),
            ));
        }
        if children.len() > capacity {
            issues.push(AssignmentIssue::new(
                "over_capacity",
                format!(
                    "{} gives to {} children, capacity is {capacity}",
                    adult_name(roster, giver),
                    children.len()
                ),
            ));
        }

        for &child in children {
            if roster.child(child).is_err() {
                issues.push(AssignmentIssue::new(
                    "unknown_person",
                    format!("{child:?} is not in the roster"),
                ));
                continue;
            }
            *covered.entry(child).or_insert(0) += 1;

            if roster.is_parent_of(giver, child) {
                issues.push(AssignmentIssue::new(
                    "parent_gift",
                    format!(
                        "{} gives to their own child {}",
                        adult_name(roster, giver),
                        child_name(roster, child)
                    ),
                ));
            }
            if roster.is_godparent_of(giver, child) {
                issues.push(AssignmentIssue::new(
                    "godparent_gift",
                    format!(
                        "{} gives to their godchild {}",
                        adult_name(roster, giver),
                        child_name(roster, child)
                    ),
                ));
            }
        }
    }

    for child in roster.all_children() {
        match covered.get(&child).copied().unwrap_or(0) {
            0 => issues.push(AssignmentIssue::new(
                "missing_child",
                format!("{} receives nothing", child_name(roster, child)),
            )),
            1 => {}
            count => issues.push(AssignmentIssue::new(
                "duplicate_child",
                format!("{} receives {count} presents", child_name(roster, child)),
            )),
        }
    }

    // participation only makes sense when there is someone to give to
    if roster.child_count() > 0 {
        for giver in roster.child_givers() {
            if assignment.receivers_of(giver).is_none_or(|children| children.is_empty()) {
                issues.push(AssignmentIssue::new(
                    "missing_giver",
                    format!("{} gives to no child", adult_name(roster, giver)),
                ));
            }
        }
    }

    issues
}

fn adult_name(roster: &Roster, id: AdultId) -> String {
    roster
        .adult(id)
        .map(ToString::to_string)
        .unwrap_or_else(|_| format!("{id:?}"))
}

fn child_name(roster: &Roster, id: ChildId) -> String {
    roster
        .child(id)
        .map(ToString::to_string)
        .unwrap_or_else(|_| format!("{id:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::from_toml_str(
            r#"
            exempt_from_children_gifts = ["d"]

            [[adults]]
            id = "a"
            first_name = "Alice"
            [[adults]]
            id = "b"
            first_name = "Bob"
            [[adults]]
            id = "c"
            first_name = "Carol"
            [[adults]]
            id = "d"
            first_name = "Dan"

            [[children]]
            id = "x"
            first_name = "Xavier"
            [[children]]
            id = "y"
            first_name = "Yann"

            [[families]]
            id = "ab"
            father = "b"
            mother = "a"
            children = ["x"]
            [[families]]
            id = "cd"
            father = "d"
            mother = "c"
            children = ["y"]

            [[godparents]]
            child = "y"
            adults = ["b"]
            "#,
        )
        .expect("test roster")
    }

    fn ids(roster: &Roster) -> (AdultId, AdultId, AdultId, AdultId, ChildId, ChildId) {
        let adult = |key: &str| roster.adult_by_key(key).expect("adult");
        let child = |key: &str| roster.child_by_key(key).expect("child");
        (
            adult("a"),
            adult("b"),
            adult("c"),
            adult("d"),
            child("x"),
            child("y"),
        )
    }

    fn codes(issues: &[AssignmentIssue]) -> Vec<&'static str> {
        issues.iter().map(|issue| issue.code).collect()
    }

    #[test]
    fn valid_adult_assignment_has_no_issues() {
        let roster = roster();
        let (a, b, c, d, _, _) = ids(&roster);
        let assignment: AdultAssignment = [(a, c), (c, a), (b, d), (d, b)].into_iter().collect();
        assert!(check_adult_assignment(&roster, &assignment).is_empty());
    }

    #[test]
    fn flags_spouse_and_self_gifts() {
        let roster = roster();
        let (a, b, c, d, _, _) = ids(&roster);
        let assignment: AdultAssignment = [(a, b), (b, a), (c, c), (d, d)].into_iter().collect();
        let issues = check_adult_assignment(&roster, &assignment);
        assert_eq!(
            codes(&issues),
            vec!["spouse_gift", "spouse_gift", "self_gift", "self_gift"]
        );
    }

    #[test]
    fn flags_missing_and_duplicate_receivers() {
        let roster = roster();
        let (a, b, c, _, _, _) = ids(&roster);
        let assignment: AdultAssignment = [(a, c), (b, c), (c, a)].into_iter().collect();
        let issues = check_adult_assignment(&roster, &assignment);
        let codes = codes(&issues);
        assert!(codes.contains(&"duplicate_receiver"));
        assert!(codes.contains(&"missing_receiver"));
        assert!(codes.contains(&"missing_giver"));
        assert!(issues.iter().any(|issue| issue.message == "Dan gives to nobody"));
    }

    #[test]
    fn flags_giver_left_without_child() {
        let roster = roster();
        let (a, _, c, _, x, y) = ids(&roster);
        let assignment: ChildAssignment = [(a, y), (c, x)].into_iter().collect();
        let issues = check_child_assignment(&roster, &assignment, 1);
        assert_eq!(codes(&issues), vec!["missing_giver"]);
        assert_eq!(issues[0].message, "Bob gives to no child");
    }

    #[test]
    fn flags_forbidden_child_pairs() {
        let roster = roster();
        let (a, b, c, d, x, y) = ids(&roster);
        let assignment: ChildAssignment = [(a, x), (b, y), (c, y), (d, x)].into_iter().collect();
        let codes = codes(&check_child_assignment(&roster, &assignment, 1));
        assert!(codes.contains(&"parent_gift"));
        assert!(codes.contains(&"godparent_gift"));
        assert!(codes.contains(&"exempt_giver"));
        assert!(codes.contains(&"duplicate_child"));
    }

    #[test]
    fn flags_over_capacity_and_missing_child() {
        let roster = roster();
        let (_, b, _, _, x, _) = ids(&roster);
        let assignment: ChildAssignment = [(b, x)].into_iter().collect();
        let codes = codes(&check_child_assignment(&roster, &assignment, 0));
        assert!(codes.contains(&"over_capacity"));
        assert!(codes.contains(&"missing_child"));
    }
}
