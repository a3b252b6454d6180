//! Solver outcomes.

/// Variable values returned by a backend, indexed like the pairing universe.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedValues {
    pub values: Vec<f64>,
    pub objective: f64,
}

impl SolvedValues {
    pub fn new(values: Vec<f64>, objective: f64) -> Self {
        Self { values, objective }
    }
}

/// Result of one backend solve.
///
/// The decoder matches this exhaustively; a new variant has to be handled
/// there before it can be returned.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Optimal within the configured gap.
    Optimal(SolvedValues),

    /// A valid solution whose optimality was not proven before the budget
    /// ran out.
    Feasible {
        solution: SolvedValues,
        best_bound: Option<f64>,
    },

    /// The budget ran out before any solution was found.
    NoSolutionFound { best_bound: Option<f64> },

    /// No solution exists.
    Infeasible,
}

impl SolveOutcome {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            SolveOutcome::Optimal(_) => "optimal",
            SolveOutcome::Feasible { .. } => "feasible",
            SolveOutcome::NoSolutionFound { .. } => "no_solution_found",
            SolveOutcome::Infeasible => "infeasible",
        }
    }

    /// Returns true for outcomes that carry a usable solution.
    pub fn has_solution(&self) -> bool {
        matches!(
            self,
            SolveOutcome::Optimal(_) | SolveOutcome::Feasible { .. }
        )
    }

    pub fn objective(&self) -> Option<f64> {
        match self {
            SolveOutcome::Optimal(s) | SolveOutcome::Feasible { solution: s, .. } => {
                Some(s.objective)
            }
            SolveOutcome::NoSolutionFound { .. } | SolveOutcome::Infeasible => None,
        }
    }
}
