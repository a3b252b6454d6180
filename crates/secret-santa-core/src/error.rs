//! Error types for the assignment engine

use std::fmt;

use thiserror::Error;

/// Why a solve produced no usable assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSolutionReason {
    /// The solver proved that no assignment satisfies the exclusions.
    Infeasible,

    /// The time budget elapsed before any assignment was found.
    TimedOut,
}

impl fmt::Display for NoSolutionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoSolutionReason::Infeasible => {
                f.write_str("the exclusion groups admit no valid assignment")
            }
            NoSolutionReason::TimedOut => {
                f.write_str("the time budget elapsed before a solution was found")
            }
        }
    }
}

/// Main error type for assignment operations
#[derive(Debug, Error)]
pub enum SantaError {
    /// Error in engine or participant configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// No assignment could be produced for this invocation
    #[error("No feasible assignment for {participants} participants: {reason}")]
    NoFeasibleAssignment {
        participants: usize,
        reason: NoSolutionReason,
    },

    /// A solved variable was neither selected nor unselected
    #[error("Solver returned ambiguous value {value} for pairing {gifter} -> {giftee}")]
    DecodeInconsistency {
        gifter: String,
        giftee: String,
        value: f64,
    },

    /// The optimization backend failed for reasons other than infeasibility
    #[error("Solver backend error: {0}")]
    Backend(String),

    /// A produced assignment broke one of its invariants
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl SantaError {
    /// Returns true for the configuration problem of an unsatisfiable group
    /// layout (or a solve that ran out of time), as opposed to a defect.
    pub fn is_no_feasible_assignment(&self) -> bool {
        matches!(self, SantaError::NoFeasibleAssignment { .. })
    }
}

/// Result type alias for assignment operations
pub type Result<T> = std::result::Result<T, SantaError>;
