//! Shared test fixtures for secret santa crates.
//!
//! - [`groups`] - participant and group builders
//! - [`history`] - canned histories
//! - [`assertions`] - assignment invariant checks
//! - [`backend`] - a scripted MIP backend
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! secret-santa-test = { workspace = true }
//! ```

pub mod assertions;
pub mod backend;
pub mod groups;
pub mod history;

pub use assertions::{assert_valid_assignment, assignment_problems};
pub use backend::ScriptedBackend;
pub use groups::{groups_of, participant, singletons};
pub use history::{assignment_of, history_of};
