//! Mixed-integer programming backends.

mod microlp;

use std::fmt::Debug;
use std::time::Duration;

use secret_santa_config::EngineConfig;
use secret_santa_core::Result;

use crate::outcome::SolveOutcome;
use crate::program::BinaryProgram;

pub use microlp::MicroLpBackend;

/// Limits for one solve.
///
/// Backends that run the solve on a worker thread stop waiting once
/// `time_limit` elapses, but cannot interrupt the solver itself: the worker
/// keeps running until the library returns and its result is dropped.
/// `max_gap` is a request, and backends without gap control (such as
/// [`MicroLpBackend`]) ignore it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveBudget {
    /// Wall-clock budget; the only cancellation mechanism.
    pub time_limit: Duration,
    /// Relative gap to the best bound that counts as optimal, where the
    /// backend supports one.
    pub max_gap: f64,
}

impl SolveBudget {
    pub fn new(time_limit: Duration, max_gap: f64) -> Self {
        Self {
            time_limit,
            max_gap,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.time_limit(), config.max_gap)
    }
}

impl Default for SolveBudget {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// A solver for [`BinaryProgram`]s.
///
/// Implementations translate the program into a concrete library model and
/// classify the result. Infeasibility and running out of time are outcomes,
/// not errors; `Err` is reserved for backend failures.
pub trait MipBackend: Send + Sync + Debug {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Solves `program` within `budget`.
    fn solve(&self, program: &BinaryProgram, budget: &SolveBudget) -> Result<SolveOutcome>;
}

impl<B: MipBackend + ?Sized> MipBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, program: &BinaryProgram, budget: &SolveBudget) -> Result<SolveOutcome> {
        (**self).solve(program, budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_from_config() {
        let config = EngineConfig::new()
            .with_termination_seconds(12)
            .with_max_gap(0.1);
        let budget = SolveBudget::from_config(&config);
        assert_eq!(budget.time_limit, Duration::from_secs(12));
        assert_eq!(budget.max_gap, 0.1);
    }

    #[test]
    fn test_default_budget() {
        let budget = SolveBudget::default();
        assert_eq!(budget.time_limit, Duration::from_secs(300));
        assert_eq!(budget.max_gap, 0.05);
    }
}
