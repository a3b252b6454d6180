//! Engine behavior against canned backend outcomes.

use secret_santa::prelude::*;
use secret_santa::solver::{SolveOutcome, SolvedValues};
use secret_santa::{NoSolutionReason, SantaError};
use secret_santa_test::{assert_valid_assignment, singletons, ScriptedBackend};

// ids: a=0, b=1, c=2; a->c, c->b, b->a
fn ring_values() -> Vec<f64> {
    let mut values = vec![0.0; 9];
    for index in [2, 7, 3] {
        values[index] = 1.0;
    }
    values
}

#[test]
fn outcomes_are_replayed_in_order() {
    let groups = singletons(&["a", "b", "c"]);
    let backend = ScriptedBackend::sequence([
        SolveOutcome::Optimal(SolvedValues::new(ring_values(), 0.5)),
        SolveOutcome::NoSolutionFound { best_bound: None },
    ]);
    let engine = AssignmentEngine::with_backend(EngineConfig::new().with_random_seed(1), backend);

    let report = engine.solve(&groups, &History::new()).unwrap();
    assert!(report.proven_optimal);
    assert_valid_assignment(&report.assignment, &groups);
    assert!(report.assignment.contains("b", "a"));

    let err = engine.assign(&groups, &History::new()).unwrap_err();
    assert!(matches!(
        err,
        SantaError::NoFeasibleAssignment {
            reason: NoSolutionReason::TimedOut,
            ..
        }
    ));
    assert_eq!(engine.backend().calls(), 2);
}

#[test]
fn empty_registry_never_reaches_backend() {
    let engine = AssignmentEngine::with_backend(
        EngineConfig::new(),
        ScriptedBackend::new(SolveOutcome::Infeasible),
    );

    let assignment = engine.assign(&GroupsConfig::new(), &History::new()).unwrap();
    assert!(assignment.is_empty());
    assert_eq!(engine.backend().calls(), 0);
}
