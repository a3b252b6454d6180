//! Secret Santa Solver Engine
//!
//! This crate turns a group configuration and prior history into a new
//! assignment:
//! - Participant registry (deduplicated participants and groups)
//! - Constraint builder (pairing universe, exclusions, coverage, anti-symmetry)
//! - Cost model (random perturbation plus repeat penalty)
//! - Binary program and MIP backends
//! - Decoder and invariant verification
//! - The [`AssignmentEngine`] that wires them together

pub mod backend;
pub mod constraint;
pub mod cost;
pub mod decoder;
pub mod engine;
pub mod outcome;
pub mod program;
pub mod registry;
pub mod verify;

#[cfg(test)]
mod test_utils;

pub use backend::{MicroLpBackend, MipBackend, SolveBudget};
pub use constraint::{ConstraintBuilder, ConstraintSet, ExclusionRelation, PairingUniverse};
pub use cost::CostModel;
pub use decoder::{decode, DecodedSolution, SELECTION_TOLERANCE};
pub use engine::{AssignmentEngine, SolveReport};
pub use outcome::{SolveOutcome, SolvedValues};
pub use program::{BinaryProgram, ConstraintKind, ConstraintSense, LinearConstraint};
pub use registry::{Group, ParticipantRegistry};
pub use verify::{find_violations, verify, Violation};
