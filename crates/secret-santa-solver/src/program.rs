//! Binary integer program in a backend-neutral form.
//!
//! Every variable is a 0/1 pairing decision and every constraint is a sum of
//! variables with unit coefficients, so constraints only store the indices
//! they cover.

use secret_santa_core::ParticipantId;

use crate::constraint::ConstraintSet;

/// Constraint sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    Equal,
    LessEqual,
}

/// What a constraint encodes, kept for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Forbidden and self pairings are fixed to zero.
    Forbidden,
    /// The participant gives exactly one present.
    Gives(ParticipantId),
    /// The participant receives exactly one present.
    Receives(ParticipantId),
    /// At most one direction of an unordered pair.
    AntiSymmetry(ParticipantId, ParticipantId),
}

/// `sum(x[i] for i in terms) <sense> rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub kind: ConstraintKind,
    pub terms: Vec<usize>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn eq(kind: ConstraintKind, terms: Vec<usize>, rhs: f64) -> Self {
        Self {
            kind,
            terms,
            sense: ConstraintSense::Equal,
            rhs,
        }
    }

    pub fn leq(kind: ConstraintKind, terms: Vec<usize>, rhs: f64) -> Self {
        Self {
            kind,
            terms,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    /// Evaluates the left-hand side against `values`.
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|&i| values[i]).sum()
    }

    /// Returns true if `values` satisfy the constraint within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            ConstraintSense::Equal => (lhs - self.rhs).abs() <= tolerance,
            ConstraintSense::LessEqual => lhs <= self.rhs + tolerance,
        }
    }
}

/// Minimize `sum(cost[i] * x[i])` over binary `x` subject to the constraints.
#[derive(Debug, Clone)]
pub struct BinaryProgram {
    costs: Vec<f64>,
    constraints: Vec<LinearConstraint>,
}

impl BinaryProgram {
    /// Assembles the program from structural constraints and per-pairing
    /// costs.
    ///
    /// All forbidden pairings go into a single `== 0` constraint, followed by
    /// coverage and anti-symmetry constraints.
    ///
    /// # Panics
    ///
    /// Panics if `costs` does not have one entry per pairing.
    pub fn new(constraints: &ConstraintSet, costs: Vec<f64>) -> Self {
        assert_eq!(
            costs.len(),
            constraints.universe.len(),
            "one cost per pairing is required"
        );

        let mut rows = Vec::with_capacity(
            1 + constraints.coverage.len() + constraints.anti_symmetry.len(),
        );
        if !constraints.forbidden.is_empty() {
            rows.push(LinearConstraint::eq(
                ConstraintKind::Forbidden,
                constraints.forbidden.clone(),
                0.0,
            ));
        }
        rows.extend(constraints.coverage.iter().cloned());
        rows.extend(constraints.anti_symmetry.iter().cloned());

        Self {
            costs,
            constraints: rows,
        }
    }

    pub fn variable_count(&self) -> usize {
        self.costs.len()
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.costs.iter().zip(values).map(|(c, x)| c * x).sum()
    }

    /// Returns the first constraint violated by `values`, if any.
    pub fn first_violation(&self, values: &[f64], tolerance: f64) -> Option<&LinearConstraint> {
        self.constraints
            .iter()
            .find(|c| !c.is_satisfied(values, tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::ConstraintBuilder;
    use crate::test_utils::registry_of;

    #[test]
    fn test_linear_constraint_senses() {
        let values = [1.0, 0.0, 1.0];
        let eq = LinearConstraint::eq(ConstraintKind::Gives(0), vec![0, 1], 1.0);
        let leq = LinearConstraint::leq(ConstraintKind::AntiSymmetry(0, 1), vec![0, 2], 1.0);

        assert_eq!(eq.lhs(&values), 1.0);
        assert!(eq.is_satisfied(&values, 1e-9));
        assert!(!leq.is_satisfied(&values, 1e-9));
    }

    #[test]
    fn test_program_layout() {
        let registry = registry_of(&[&["a", "b"], &["c"]]);
        let constraints = ConstraintBuilder::new(&registry).build();
        let program = BinaryProgram::new(&constraints, vec![0.5; 9]);

        assert_eq!(program.variable_count(), 9);
        // one forbidden row, 3 gives, 3 receives, 3 unordered pairs
        assert_eq!(program.constraints().len(), 1 + 6 + 3);
        assert_eq!(program.constraints()[0].kind, ConstraintKind::Forbidden);
        assert_eq!(program.constraints()[0].sense, ConstraintSense::Equal);
        assert_eq!(program.constraints()[0].rhs, 0.0);
    }

    #[test]
    fn test_objective_and_violation() {
        let registry = registry_of(&[&["a"], &["b"], &["c"]]);
        let constraints = ConstraintBuilder::new(&registry).build();
        let universe = &constraints.universe;
        let program = BinaryProgram::new(&constraints, (0..9u32).map(f64::from).collect());

        let mut values = vec![0.0; 9];
        for (gifter, giftee) in [(0, 1), (1, 2), (2, 0)] {
            values[universe.index(gifter, giftee)] = 1.0;
        }
        assert!(program.first_violation(&values, 1e-6).is_none());
        assert_eq!(program.objective_value(&values), 1.0 + 5.0 + 6.0);

        values[universe.index(0, 0)] = 1.0;
        let violated = program.first_violation(&values, 1e-6).unwrap();
        assert_eq!(violated.kind, ConstraintKind::Forbidden);
    }
}
