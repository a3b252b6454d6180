//! Turns solver outcomes into assignments.

use secret_santa_core::{Assignment, NoSolutionReason, Pairing, Result, SantaError};
use tracing::trace;

use crate::constraint::PairingUniverse;
use crate::outcome::{SolveOutcome, SolvedValues};
use crate::registry::ParticipantRegistry;

/// Distance from 0 or 1 within which a variable counts as decided.
pub const SELECTION_TOLERANCE: f64 = 1e-6;

/// A decoded assignment with the solve quality it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSolution {
    pub assignment: Assignment,
    /// True for [`SolveOutcome::Optimal`], false for `Feasible`.
    pub proven_optimal: bool,
    pub objective: f64,
    pub best_bound: Option<f64>,
}

/// Decodes `outcome`.
///
/// `Optimal` and `Feasible` outcomes yield the pairings whose variables are
/// within [`SELECTION_TOLERANCE`] of 1. A value that is near neither 0 nor 1
/// is reported as [`SantaError::DecodeInconsistency`] rather than rounded.
/// `NoSolutionFound` and `Infeasible` become
/// [`SantaError::NoFeasibleAssignment`].
pub fn decode(
    outcome: SolveOutcome,
    registry: &ParticipantRegistry,
    universe: &PairingUniverse,
) -> Result<DecodedSolution> {
    match outcome {
        SolveOutcome::Optimal(solution) => {
            let assignment = select_pairings(&solution, registry, universe)?;
            Ok(DecodedSolution {
                assignment,
                proven_optimal: true,
                objective: solution.objective,
                best_bound: Some(solution.objective),
            })
        }
        SolveOutcome::Feasible {
            solution,
            best_bound,
        } => {
            let assignment = select_pairings(&solution, registry, universe)?;
            Ok(DecodedSolution {
                assignment,
                proven_optimal: false,
                objective: solution.objective,
                best_bound,
            })
        }
        SolveOutcome::NoSolutionFound { .. } => Err(SantaError::NoFeasibleAssignment {
            participants: registry.len(),
            reason: NoSolutionReason::TimedOut,
        }),
        SolveOutcome::Infeasible => Err(SantaError::NoFeasibleAssignment {
            participants: registry.len(),
            reason: NoSolutionReason::Infeasible,
        }),
    }
}

fn select_pairings(
    solution: &SolvedValues,
    registry: &ParticipantRegistry,
    universe: &PairingUniverse,
) -> Result<Assignment> {
    if solution.values.len() != universe.len() {
        return Err(SantaError::InvalidState(format!(
            "solver returned {} values for {} pairings",
            solution.values.len(),
            universe.len()
        )));
    }

    let mut pairings = Vec::with_capacity(universe.participant_count());
    for (index, &value) in solution.values.iter().enumerate() {
        let (gifter, giftee) = universe.pairing(index);
        if (value - 1.0).abs() <= SELECTION_TOLERANCE {
            trace!(gifter = registry.name(gifter), giftee = registry.name(giftee), "selected");
            pairings.push(Pairing::new(registry.name(gifter), registry.name(giftee)));
        } else if value.abs() > SELECTION_TOLERANCE {
            return Err(SantaError::DecodeInconsistency {
                gifter: registry.name(gifter).to_string(),
                giftee: registry.name(giftee).to_string(),
                value,
            });
        }
    }
    Ok(Assignment::new(pairings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::registry_of;

    fn ring_values(universe: &PairingUniverse) -> Vec<f64> {
        let mut values = vec![0.0; universe.len()];
        for (g, r) in [(0, 1), (1, 2), (2, 0)] {
            values[universe.index(g, r)] = 1.0;
        }
        values
    }

    #[test]
    fn test_decode_optimal() {
        let registry = registry_of(&[&["a"], &["b"], &["c"]]);
        let universe = PairingUniverse::new(3);
        let outcome = SolveOutcome::Optimal(SolvedValues::new(ring_values(&universe), 0.5));

        let decoded = decode(outcome, &registry, &universe).unwrap();
        assert!(decoded.proven_optimal);
        assert_eq!(decoded.objective, 0.5);

        let sorted = decoded.assignment.sorted();
        let pairs: Vec<String> = sorted.iter().map(ToString::to_string).collect();
        assert_eq!(pairs, vec!["a -> b", "b -> c", "c -> a"]);
    }

    #[test]
    fn test_decode_feasible_absorbs_noise() {
        let registry = registry_of(&[&["a"], &["b"], &["c"]]);
        let universe = PairingUniverse::new(3);
        let mut values = ring_values(&universe);
        values[universe.index(0, 1)] = 1.0 - 1e-9;
        values[universe.index(0, 2)] = 1e-8;
        values[universe.index(1, 1)] = -1e-8;

        let outcome = SolveOutcome::Feasible {
            solution: SolvedValues::new(values, 0.7),
            best_bound: Some(0.6),
        };
        let decoded = decode(outcome, &registry, &universe).unwrap();
        assert!(!decoded.proven_optimal);
        assert_eq!(decoded.best_bound, Some(0.6));
        assert_eq!(decoded.assignment.len(), 3);
    }

    #[test]
    fn test_decode_rejects_fractional_value() {
        let registry = registry_of(&[&["a"], &["b"], &["c"]]);
        let universe = PairingUniverse::new(3);
        let mut values = ring_values(&universe);
        values[universe.index(1, 0)] = 0.5;

        let outcome = SolveOutcome::Optimal(SolvedValues::new(values, 0.0));
        let err = decode(outcome, &registry, &universe).unwrap_err();
        match err {
            SantaError::DecodeInconsistency {
                gifter,
                giftee,
                value,
            } => {
                assert_eq!(gifter, "b");
                assert_eq!(giftee, "a");
                assert_eq!(value, 0.5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_fatal_outcomes() {
        let registry = registry_of(&[&["a"], &["b"]]);
        let universe = PairingUniverse::new(2);

        let err = decode(SolveOutcome::Infeasible, &registry, &universe).unwrap_err();
        assert!(err.is_no_feasible_assignment());
        assert!(matches!(
            err,
            SantaError::NoFeasibleAssignment {
                participants: 2,
                reason: NoSolutionReason::Infeasible
            }
        ));

        let outcome = SolveOutcome::NoSolutionFound { best_bound: None };
        let err = decode(outcome, &registry, &universe).unwrap_err();
        assert!(matches!(
            err,
            SantaError::NoFeasibleAssignment {
                reason: NoSolutionReason::TimedOut,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let registry = registry_of(&[&["a"], &["b"], &["c"]]);
        let universe = PairingUniverse::new(3);
        let outcome = SolveOutcome::Optimal(SolvedValues::new(vec![0.0; 4], 0.0));

        let err = decode(outcome, &registry, &universe).unwrap_err();
        assert!(matches!(err, SantaError::InvalidState(_)));
    }
}
