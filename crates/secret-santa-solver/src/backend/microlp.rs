//! `good_lp` backend using the pure-Rust microlp solver.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use good_lp::{
    default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use secret_santa_core::{Result, SantaError};
use tracing::{debug, warn};

use super::{MipBackend, SolveBudget};
use crate::outcome::{SolveOutcome, SolvedValues};
use crate::program::{BinaryProgram, ConstraintSense};

/// Branch-and-bound through `good_lp`'s microlp solver.
///
/// microlp has no native time limit, so the solve runs on a worker thread and
/// the caller waits at most `budget.time_limit`. When the budget elapses the
/// outcome is [`SolveOutcome::NoSolutionFound`] and the worker is left to
/// finish on its own; its result is discarded. microlp cannot be told to stop
/// at a gap and always proves optimality, so `budget.max_gap` is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpBackend;

impl MicroLpBackend {
    pub fn new() -> Self {
        Self
    }
}

impl MipBackend for MicroLpBackend {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, program: &BinaryProgram, budget: &SolveBudget) -> Result<SolveOutcome> {
        if budget.max_gap > 0.0 {
            debug!(
                event = "max_gap_ignored",
                backend = self.name(),
                max_gap = budget.max_gap,
            );
        }

        let job = program.clone();
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("mip-worker".into())
            .spawn(move || {
                // The receiver is gone if the caller timed out.
                let _ = tx.send(run_job(&job));
            })
            .map_err(|e| SantaError::Backend(format!("failed to spawn solver thread: {e}")))?;

        match rx.recv_timeout(budget.time_limit) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    event = "solve_timeout",
                    time_limit_secs = budget.time_limit.as_secs_f64(),
                );
                Ok(SolveOutcome::NoSolutionFound { best_bound: None })
            }
            Err(RecvTimeoutError::Disconnected) => Err(SantaError::Backend(
                "solver thread exited without a result".to_string(),
            )),
        }
    }
}

fn run_job(program: &BinaryProgram) -> Result<SolveOutcome> {
    let start = Instant::now();

    let mut vars = ProblemVariables::new();
    let xs: Vec<Variable> = (0..program.variable_count())
        .map(|_| vars.add(variable().binary()))
        .collect();

    let mut objective = Expression::with_capacity(xs.len());
    for (&x, &cost) in xs.iter().zip(program.costs()) {
        objective.add_mul(cost, x);
    }

    let mut problem = vars.minimise(objective).using(default_solver);
    for row in program.constraints() {
        let mut lhs = Expression::with_capacity(row.terms.len());
        for &i in &row.terms {
            lhs.add_mul(1.0, xs[i]);
        }
        let constraint = match row.sense {
            ConstraintSense::Equal => lhs.eq(row.rhs),
            ConstraintSense::LessEqual => lhs.leq(row.rhs),
        };
        problem.add_constraint(constraint);
    }

    let outcome = match problem.solve() {
        Ok(solution) => {
            let values: Vec<f64> = xs.iter().map(|&x| solution.value(x)).collect();
            let objective = program.objective_value(&values);
            SolveOutcome::Optimal(SolvedValues::new(values, objective))
        }
        Err(ResolutionError::Infeasible) => SolveOutcome::Infeasible,
        Err(e) => return Err(SantaError::Backend(e.to_string())),
    };

    debug!(
        event = "backend_finished",
        backend = "microlp",
        variables = program.variable_count(),
        constraints = program.constraints().len(),
        outcome = outcome.label(),
        duration_ms = start.elapsed().as_millis() as u64,
    );
    Ok(outcome)
}
