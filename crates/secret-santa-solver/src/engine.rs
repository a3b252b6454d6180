//! The assignment engine.
//!
//! Logging levels:
//! - **INFO**: solve start/end, outcome, problem scale
//! - **DEBUG**: constraint and cost construction
//! - **TRACE**: individual decoded pairings

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use secret_santa_config::{EngineConfig, EnvironmentMode, GroupsConfig};
use secret_santa_core::{Assignment, History, Result, SantaError};
use tracing::{info, warn};

use crate::backend::{MicroLpBackend, MipBackend, SolveBudget};
use crate::constraint::ConstraintBuilder;
use crate::cost::CostModel;
use crate::decoder::decode;
use crate::outcome::SolveOutcome;
use crate::program::BinaryProgram;
use crate::registry::ParticipantRegistry;
use crate::verify::verify;

/// What one successful invocation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub assignment: Assignment,
    /// False when the budget ran out before optimality was proven.
    pub proven_optimal: bool,
    pub objective: f64,
    pub best_bound: Option<f64>,
    pub duration: Duration,
}

/// Builds and solves one assignment program per call.
///
/// The engine holds no state between calls; each call draws fresh random
/// costs, so calling twice gives two (usually different) valid assignments.
///
/// # Example
///
/// ```no_run
/// use secret_santa_config::{EngineConfig, GroupsConfig};
/// use secret_santa_core::{History, Participant};
/// use secret_santa_solver::AssignmentEngine;
///
/// let groups = GroupsConfig::new()
///     .with_group("a", [Participant::new("ann", "ann@example.com")])
///     .with_group("b", [Participant::new("ben", "ben@example.com")])
///     .with_group("c", [Participant::new("cat", "cat@example.com")]);
///
/// let engine = AssignmentEngine::new(EngineConfig::default());
/// let assignment = engine.assign(&groups, &History::new()).unwrap();
/// assert_eq!(assignment.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine<B = MicroLpBackend> {
    config: EngineConfig,
    backend: B,
}

impl AssignmentEngine<MicroLpBackend> {
    /// Creates an engine backed by [`MicroLpBackend`].
    pub fn new(config: EngineConfig) -> Self {
        Self::with_backend(config, MicroLpBackend::new())
    }
}

impl Default for AssignmentEngine<MicroLpBackend> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<B: MipBackend> AssignmentEngine<B> {
    pub fn with_backend(config: EngineConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Produces a new assignment for `groups`, avoiding pairings in `history`
    /// where possible.
    ///
    /// # Errors
    ///
    /// `SantaError::NoFeasibleAssignment` when the groups admit no valid
    /// assignment or none was found within the time budget, and
    /// `SantaError::Config` when the engine settings fail validation.
    pub fn assign(&self, groups: &GroupsConfig, history: &History) -> Result<Assignment> {
        self.solve(groups, history).map(|report| report.assignment)
    }

    /// Like [`assign`](Self::assign), returning solve details as well.
    ///
    /// Random costs come from a ChaCha generator seeded with
    /// `random_seed` when one is configured, otherwise from OS entropy.
    pub fn solve(&self, groups: &GroupsConfig, history: &History) -> Result<SolveReport> {
        let registry = ParticipantRegistry::from_config(groups);
        match self.config.random_seed {
            Some(seed) => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                self.solve_registry(&registry, history, &mut rng)
            }
            None => self.solve_registry(&registry, history, &mut StdRng::from_os_rng()),
        }
    }

    /// Solves with a caller-provided random source.
    pub fn solve_with_rng<R: Rng>(
        &self,
        groups: &GroupsConfig,
        history: &History,
        rng: &mut R,
    ) -> Result<SolveReport> {
        let registry = ParticipantRegistry::from_config(groups);
        self.solve_registry(&registry, history, rng)
    }

    /// Solves for an already built registry.
    pub fn solve_registry<R: Rng>(
        &self,
        registry: &ParticipantRegistry,
        history: &History,
        rng: &mut R,
    ) -> Result<SolveReport> {
        let start = Instant::now();
        self.config
            .validate()
            .map_err(|e| SantaError::Config(e.to_string()))?;
        let budget = SolveBudget::from_config(&self.config);

        info!(
            event = "solve_start",
            backend = self.backend.name(),
            participant_count = registry.len(),
            group_count = registry.groups().len(),
            history_periods = history.len(),
            time_limit_secs = budget.time_limit.as_secs(),
            max_gap = budget.max_gap,
        );

        if registry.is_empty() {
            info!(event = "solve_end", outcome = "empty", pairings = 0);
            return Ok(SolveReport {
                assignment: Assignment::empty(),
                proven_optimal: true,
                objective: 0.0,
                best_bound: Some(0.0),
                duration: start.elapsed(),
            });
        }

        let constraints = ConstraintBuilder::new(registry).build();
        let costs =
            CostModel::from_config(&self.config).costs(registry, &constraints.universe, history, rng);
        let program = BinaryProgram::new(&constraints, costs);

        let outcome = self.backend.solve(&program, &budget)?;
        log_outcome(&outcome, start.elapsed());

        let decoded = decode(outcome, registry, &constraints.universe)?;
        if self.config.environment_mode == EnvironmentMode::FullAssert {
            verify(&decoded.assignment, registry, &constraints.exclusions)?;
        }

        let duration = start.elapsed();
        info!(
            event = "solve_end",
            pairings = decoded.assignment.len(),
            proven_optimal = decoded.proven_optimal,
            objective = decoded.objective,
            duration_ms = duration.as_millis() as u64,
        );

        Ok(SolveReport {
            assignment: decoded.assignment,
            proven_optimal: decoded.proven_optimal,
            objective: decoded.objective,
            best_bound: decoded.best_bound,
            duration,
        })
    }
}

fn log_outcome(outcome: &SolveOutcome, elapsed: Duration) {
    let elapsed_ms = elapsed.as_millis() as u64;
    match outcome {
        SolveOutcome::Optimal(solution) => {
            info!(
                event = "solve_outcome",
                outcome = outcome.label(),
                objective = solution.objective,
                elapsed_ms,
            );
        }
        SolveOutcome::Feasible {
            solution,
            best_bound,
        } => {
            info!(
                event = "solve_outcome",
                outcome = outcome.label(),
                objective = solution.objective,
                best_bound = ?best_bound,
                elapsed_ms,
            );
        }
        SolveOutcome::NoSolutionFound { best_bound } => {
            warn!(
                event = "solve_outcome",
                outcome = outcome.label(),
                best_bound = ?best_bound,
                elapsed_ms,
            );
        }
        SolveOutcome::Infeasible => {
            warn!(event = "solve_outcome", outcome = outcome.label(), elapsed_ms);
        }
    }
}
