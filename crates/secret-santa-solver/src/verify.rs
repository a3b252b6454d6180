//! Invariant checks for produced assignments.

use std::collections::HashSet;
use std::fmt;

use secret_santa_core::{Assignment, Result, SantaError};

use crate::constraint::ExclusionRelation;
use crate::registry::ParticipantRegistry;

/// A broken assignment invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    WrongSize { expected: usize, actual: usize },
    UnknownParticipant(String),
    GivesTimes { name: String, count: usize },
    ReceivesTimes { name: String, count: usize },
    SelfPairing(String),
    Excluded { gifter: String, giftee: String },
    Mutual { a: String, b: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::WrongSize { expected, actual } => {
                write!(f, "expected {expected} pairings, found {actual}")
            }
            Violation::UnknownParticipant(name) => write!(f, "unknown participant {name}"),
            Violation::GivesTimes { name, count } => write!(f, "{name} gives {count} presents"),
            Violation::ReceivesTimes { name, count } => {
                write!(f, "{name} receives {count} presents")
            }
            Violation::SelfPairing(name) => write!(f, "{name} gives to themselves"),
            Violation::Excluded { gifter, giftee } => {
                write!(f, "{gifter} -> {giftee} share a group")
            }
            Violation::Mutual { a, b } => write!(f, "{a} and {b} give to each other"),
        }
    }
}

/// Lists every invariant `assignment` breaks for the given registry.
pub fn find_violations(
    assignment: &Assignment,
    registry: &ParticipantRegistry,
    exclusions: &ExclusionRelation,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    if assignment.len() != registry.len() {
        violations.push(Violation::WrongSize {
            expected: registry.len(),
            actual: assignment.len(),
        });
    }

    let mut gives = vec![0usize; registry.len()];
    let mut receives = vec![0usize; registry.len()];
    let mut seen = HashSet::new();

    for pairing in assignment {
        let ids = (registry.id(&pairing.gifter), registry.id(&pairing.giftee));
        let (Some(gifter), Some(giftee)) = ids else {
            for name in [&pairing.gifter, &pairing.giftee] {
                if registry.id(name).is_none() {
                    violations.push(Violation::UnknownParticipant(name.clone()));
                }
            }
            continue;
        };

        gives[gifter] += 1;
        receives[giftee] += 1;

        if gifter == giftee {
            violations.push(Violation::SelfPairing(pairing.gifter.clone()));
        } else if exclusions.excludes(gifter, giftee) {
            violations.push(Violation::Excluded {
                gifter: pairing.gifter.clone(),
                giftee: pairing.giftee.clone(),
            });
        }

        if gifter != giftee && seen.contains(&(giftee, gifter)) {
            violations.push(Violation::Mutual {
                a: pairing.giftee.clone(),
                b: pairing.gifter.clone(),
            });
        }
        seen.insert((gifter, giftee));
    }

    for (id, name) in registry.names().iter().enumerate() {
        if gives[id] != 1 {
            violations.push(Violation::GivesTimes {
                name: name.clone(),
                count: gives[id],
            });
        }
        if receives[id] != 1 {
            violations.push(Violation::ReceivesTimes {
                name: name.clone(),
                count: receives[id],
            });
        }
    }
    violations
}

/// Fails with [`SantaError::InvalidState`] naming the first violation.
pub fn verify(
    assignment: &Assignment,
    registry: &ParticipantRegistry,
    exclusions: &ExclusionRelation,
) -> Result<()> {
    match find_violations(assignment, registry, exclusions).first() {
        None => Ok(()),
        Some(violation) => Err(SantaError::InvalidState(violation.to_string())),
    }
}
