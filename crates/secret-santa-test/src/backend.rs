//! A MIP backend that replays canned outcomes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use secret_santa_core::Result;
use secret_santa_solver::{BinaryProgram, MipBackend, SolveBudget, SolveOutcome};

/// Returns queued outcomes in order, repeating the last one once the queue
/// is down to a single entry.
#[derive(Debug)]
pub struct ScriptedBackend {
    outcomes: Mutex<VecDeque<SolveOutcome>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(outcome: SolveOutcome) -> Self {
        Self::sequence([outcome])
    }

    /// # Panics
    ///
    /// Panics if `outcomes` is empty.
    pub fn sequence(outcomes: impl IntoIterator<Item = SolveOutcome>) -> Self {
        let outcomes: VecDeque<_> = outcomes.into_iter().collect();
        assert!(!outcomes.is_empty(), "ScriptedBackend needs an outcome");
        Self {
            outcomes: Mutex::new(outcomes),
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
        let mut outcomes = self
            .outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let outcome = if outcomes.len() > 1 {
            outcomes.pop_front()
        } else {
            outcomes.front().cloned()
        };
        Ok(outcome.unwrap_or(SolveOutcome::Infeasible))
    }
}
