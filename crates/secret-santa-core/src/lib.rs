//! Secret Santa Core - Domain types shared across the workspace
//!
//! This crate provides the fundamental vocabulary of the assignment engine:
//! - Participants and the identifiers handed out for one invocation
//! - Pairings and complete assignments
//! - History of prior periods
//! - The engine-level error type

pub mod domain;
pub mod error;

pub use domain::{Assignment, History, Pairing, Participant, ParticipantId, Period};
pub use error::{NoSolutionReason, Result, SantaError};
