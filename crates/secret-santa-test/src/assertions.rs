//! Assignment invariant checks.

use secret_santa_config::GroupsConfig;
use secret_santa_core::Assignment;
use secret_santa_solver::{find_violations, ExclusionRelation, ParticipantRegistry};

/// Describes every way `assignment` breaks the rules for `groups`.
pub fn assignment_problems(assignment: &Assignment, groups: &GroupsConfig) -> Vec<String> {
    let registry = ParticipantRegistry::from_config(groups);
    let exclusions = ExclusionRelation::from_registry(&registry);
    find_violations(assignment, &registry, &exclusions)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Panics unless `assignment` is complete, has no self or group pairings and
/// no mutual pairings.
#[track_caller]
pub fn assert_valid_assignment(assignment: &Assignment, groups: &GroupsConfig) {
    let problems = assignment_problems(assignment, groups);
    assert!(
        problems.is_empty(),
        "invalid assignment {:?}: {}",
        assignment.sorted(),
        problems.join("; ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assignment_of, groups_of};

    #[test]
    fn test_reports_problems() {
        let groups = groups_of(&[&["a", "b"], &["c"]]);
        let bad = assignment_of(&[("a", "b"), ("b", "c"), ("c", "a")]);

        let problems = assignment_problems(&bad, &groups);
        assert_eq!(problems, vec!["a -> b share a group"]);
    }

    #[test]
    #[should_panic(expected = "give to each other")]
    fn test_panics_on_mutual() {
        let groups = groups_of(&[&["a"], &["b"]]);
        assert_valid_assignment(&assignment_of(&[("a", "b"), ("b", "a")]), &groups);
    }
}
