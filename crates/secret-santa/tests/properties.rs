//! Assignment properties checked against the real microlp backend.

use secret_santa::prelude::*;
use secret_santa::{EnvironmentMode, NoSolutionReason, SantaError};
use secret_santa_test::{assert_valid_assignment, groups_of, history_of, singletons};

fn engine(seed: u64) -> AssignmentEngine {
    AssignmentEngine::new(
        EngineConfig::new()
            .with_random_seed(seed)
            .with_environment_mode(EnvironmentMode::FullAssert),
    )
}

#[test]
fn four_singletons_never_swap() {
    let groups = singletons(&["a", "b", "c", "d"]);

    for seed in 0..10 {
        let assignment = engine(seed).assign(&groups, &History::new()).unwrap();
        assert_valid_assignment(&assignment, &groups);
        assert!(!assignment.has_mutual_pairing());
        assert!(!(assignment.contains("a", "b") && assignment.contains("b", "a")));
        assert!(!(assignment.contains("c", "d") && assignment.contains("d", "c")));
    }
}

#[test]
fn group_members_never_draw_each_other() {
    let groups = groups_of(&[&["a", "b"], &["c"], &["d"]]);

    for seed in 0..10 {
        let assignment = engine(seed).assign(&groups, &History::new()).unwrap();
        assert_valid_assignment(&assignment, &groups);
        assert!(!assignment.contains("a", "b"));
        assert!(!assignment.contains("b", "a"));
    }
}

#[test]
fn group_of_more_than_half_is_infeasible() {
    let groups = groups_of(&[&["a", "b", "c"], &["d"]]);

    let err = engine(0).assign(&groups, &History::new()).unwrap_err();
    assert!(err.is_no_feasible_assignment());
    assert!(matches!(
        err,
        SantaError::NoFeasibleAssignment {
            participants: 4,
            reason: NoSolutionReason::Infeasible,
        }
    ));
}

#[test]
fn two_participants_are_infeasible() {
    let err = engine(0)
        .assign(&singletons(&["a", "b"]), &History::new())
        .unwrap_err();
    assert!(err.is_no_feasible_assignment());
}

#[test]
fn empty_config_gives_empty_assignment() {
    let assignment = engine(0)
        .assign(&GroupsConfig::new(), &History::new())
        .unwrap();
    assert!(assignment.is_empty());
}

#[test]
fn repeats_are_avoided_when_possible() {
    let groups = singletons(&["a", "b", "c", "d", "e"]);
    let history = history_of(&[
        ("2022", &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e"), ("e", "a")]),
        ("2023", &[("a", "c"), ("c", "e"), ("e", "b"), ("b", "d"), ("d", "a")]),
    ]);

    for seed in 0..5 {
        let report = engine(seed).solve(&groups, &history).unwrap();
        assert!(report.proven_optimal);
        assert_valid_assignment(&report.assignment, &groups);
        for pairing in &report.assignment {
            assert_eq!(
                history.occurrences(&pairing.gifter, &pairing.giftee),
                0,
                "{pairing} repeated from history"
            );
        }
    }
}

#[test]
fn repeats_are_allowed_when_unavoidable() {
    // Three people have exactly two valid assignments, the two 3-cycles.
    let groups = singletons(&["a", "b", "c"]);
    let history = history_of(&[
        ("2022", &[("a", "b"), ("b", "c"), ("c", "a")]),
        ("2023", &[("a", "c"), ("c", "b"), ("b", "a")]),
        ("2024", &[("a", "c"), ("c", "b"), ("b", "a")]),
    ]);

    for seed in 0..3 {
        let assignment = engine(seed).assign(&groups, &history).unwrap();
        assert_valid_assignment(&assignment, &groups);
        // The cycle drawn once beats the cycle drawn twice.
        assert!(assignment.contains("a", "b"));
    }
}

#[test]
fn unknown_history_names_are_ignored() {
    let groups = singletons(&["a", "b", "c"]);
    let history = history_of(&[("2020", &[("zed", "a"), ("a", "zed")])]);

    let assignment = engine(1).assign(&groups, &history).unwrap();
    assert_valid_assignment(&assignment, &groups);
}

#[test]
fn duplicate_names_are_one_participant() {
    let groups = GroupsConfig::new()
        .with_group(
            "home",
            [
                Participant::new("a", "a@example.com"),
                Participant::new("b", "b@example.com"),
            ],
        )
        .with_group(
            "work",
            [
                Participant::new("a", "other@example.com"),
                Participant::new("c", "c@example.com"),
            ],
        )
        .with_group("d", [Participant::new("d", "d@example.com")])
        .with_group("e", [Participant::new("e", "e@example.com")]);

    for seed in 0..5 {
        let assignment = engine(seed).assign(&groups, &History::new()).unwrap();
        assert_eq!(assignment.len(), 5);
        assert_valid_assignment(&assignment, &groups);

        // a shares a group with both b and c.
        let giftee = assignment.giftee_of("a").unwrap();
        assert!(giftee == "d" || giftee == "e");
        let gifter = assignment.iter().find(|p| p.giftee == "a").unwrap();
        assert!(gifter.gifter == "d" || gifter.gifter == "e");
    }
}

#[test]
fn caller_rng_drives_costs() {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    let groups = groups_of(&[&["a", "b"], &["c", "d"], &["e"], &["f"]]);
    let engine = AssignmentEngine::new(EngineConfig::new());

    let first = engine
        .solve_with_rng(&groups, &History::new(), &mut ChaCha8Rng::seed_from_u64(99))
        .unwrap();
    let second = engine
        .solve_with_rng(&groups, &History::new(), &mut ChaCha8Rng::seed_from_u64(99))
        .unwrap();

    assert_valid_assignment(&first.assignment, &groups);
    assert_eq!(first.assignment.sorted(), second.assignment.sorted());
}
