//! Test utilities for solver tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use secret_santa_config::GroupsConfig;
use secret_santa_core::{Participant, Result};

use crate::backend::{MipBackend, SolveBudget};
use crate::outcome::SolveOutcome;
use crate::program::BinaryProgram;
use crate::registry::ParticipantRegistry;

/// Groups config with one group per slice, named `g0`, `g1`, ...
pub fn groups_of(groups: &[&[&str]]) -> GroupsConfig {
    groups
        .iter()
        .enumerate()
        .fold(GroupsConfig::new(), |config, (i, members)| {
            config.with_group(
                format!("g{i}"),
                members
                    .iter()
                    .map(|name| Participant::new(*name, format!("{name}@example.com"))),
            )
        })
}

pub fn registry_of(groups: &[&[&str]]) -> ParticipantRegistry {
    ParticipantRegistry::from_config(&groups_of(groups))
}

/// Backend that returns a canned outcome and counts calls.
#[derive(Debug)]
pub struct ScriptedBackend {
    outcome: SolveOutcome,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(outcome: SolveOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MipBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(&self, _program: &BinaryProgram, _budget: &SolveBudget) -> Result<SolveOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome.clone())
    }
}
