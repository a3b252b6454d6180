//! Constraint construction.
//!
//! Expands group membership into the exclusion relation and the structural
//! constraints of a fixed-point-free, 2-cycle-free permutation.

use std::collections::BTreeSet;

use secret_santa_core::ParticipantId;
use tracing::debug;

use crate::program::{ConstraintKind, LinearConstraint};
use crate::registry::ParticipantRegistry;

/// All ordered pairings of `n` participants.
///
/// Pairing `(gifter, giftee)` has index `gifter * n + giftee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingUniverse {
    n: usize,
}

impl PairingUniverse {
    pub fn new(participant_count: usize) -> Self {
        Self {
            n: participant_count,
        }
    }

    pub fn participant_count(&self) -> usize {
        self.n
    }

    /// Number of pairings, `n * n`.
    pub fn len(&self) -> usize {
        self.n * self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn index(&self, gifter: ParticipantId, giftee: ParticipantId) -> usize {
        debug_assert!(gifter < self.n && giftee < self.n);
        gifter * self.n + giftee
    }

    #[inline]
    pub fn pairing(&self, index: usize) -> (ParticipantId, ParticipantId) {
        (index / self.n, index % self.n)
    }

    /// Iterates `(index, gifter, giftee)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, ParticipantId, ParticipantId)> + '_ {
        (0..self.len()).map(move |i| {
            let (gifter, giftee) = self.pairing(i);
            (i, gifter, giftee)
        })
    }
}

/// Unordered pairs of distinct participants that share at least one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRelation {
    pairs: BTreeSet<(ParticipantId, ParticipantId)>,
}

impl ExclusionRelation {
    pub fn from_registry(registry: &ParticipantRegistry) -> Self {
        let mut pairs = BTreeSet::new();
        for group in registry.groups() {
            for (i, &a) in group.members.iter().enumerate() {
                for &b in &group.members[i + 1..] {
                    pairs.insert(Self::key(a, b));
                }
            }
        }
        Self { pairs }
    }

    fn key(a: ParticipantId, b: ParticipantId) -> (ParticipantId, ParticipantId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Returns true if `a` and `b` are distinct co-members of some group.
    pub fn excludes(&self, a: ParticipantId, b: ParticipantId) -> bool {
        a != b && self.pairs.contains(&Self::key(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates pairs as `(smaller, larger)`.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, ParticipantId)> + '_ {
        self.pairs.iter().copied()
    }
}

/// Everything the solver needs besides costs.
#[derive(Debug, Clone)]
pub struct ConstraintSet {
    pub universe: PairingUniverse,
    pub exclusions: ExclusionRelation,
    /// Sorted indices of pairings fixed to zero, self pairings included.
    pub forbidden: Vec<usize>,
    /// One "gives exactly one" and one "receives exactly one" per participant.
    pub coverage: Vec<LinearConstraint>,
    /// One "at most one direction" per unordered pair of distinct participants.
    pub anti_symmetry: Vec<LinearConstraint>,
}

impl ConstraintSet {
    pub fn is_forbidden(&self, gifter: ParticipantId, giftee: ParticipantId) -> bool {
        gifter == giftee || self.exclusions.excludes(gifter, giftee)
    }

    /// Number of non-forbidden pairings.
    pub fn candidate_count(&self) -> usize {
        self.universe.len() - self.forbidden.len()
    }
}

/// Builds a [`ConstraintSet`] from a registry.
///
/// # Example
///
/// ```
/// use secret_santa_config::GroupsConfig;
/// use secret_santa_core::Participant;
/// use secret_santa_solver::{ConstraintBuilder, ParticipantRegistry};
///
/// let config = GroupsConfig::new()
///     .with_group("home", [Participant::new("a", "a@x"), Participant::new("b", "b@x")])
///     .with_group("solo", [Participant::new("c", "c@x")]);
/// let registry = ParticipantRegistry::from_config(&config);
///
/// let constraints = ConstraintBuilder::new(&registry).build();
/// assert_eq!(constraints.universe.len(), 9);
/// // a->a, b->b, c->c, a->b, b->a
/// assert_eq!(constraints.forbidden.len(), 5);
/// assert!(constraints.is_forbidden(0, 1));
/// assert!(!constraints.is_forbidden(0, 2));
/// ```
#[derive(Debug)]
pub struct ConstraintBuilder<'a> {
    registry: &'a ParticipantRegistry,
}

impl<'a> ConstraintBuilder<'a> {
    pub fn new(registry: &'a ParticipantRegistry) -> Self {
        Self { registry }
    }

    pub fn build(&self) -> ConstraintSet {
        let n = self.registry.len();
        let universe = PairingUniverse::new(n);
        let exclusions = ExclusionRelation::from_registry(self.registry);

        let forbidden: Vec<usize> = universe
            .iter()
            .filter(|&(_, gifter, giftee)| gifter == giftee || exclusions.excludes(gifter, giftee))
            .map(|(index, _, _)| index)
            .collect();

        let mut coverage = Vec::with_capacity(2 * n);
        for p in 0..n {
            let gives = (0..n).map(|giftee| universe.index(p, giftee)).collect();
            coverage.push(LinearConstraint::eq(ConstraintKind::Gives(p), gives, 1.0));
        }
        for p in 0..n {
            let receives = (0..n).map(|gifter| universe.index(gifter, p)).collect();
            coverage.push(LinearConstraint::eq(
                ConstraintKind::Receives(p),
                receives,
                1.0,
            ));
        }

        let mut anti_symmetry = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for a in 0..n {
            for b in a + 1..n {
                anti_symmetry.push(LinearConstraint::leq(
                    ConstraintKind::AntiSymmetry(a, b),
                    vec![universe.index(a, b), universe.index(b, a)],
                    1.0,
                ));
            }
        }

        debug!(
            event = "constraints_built",
            participant_count = n,
            excluded_pairs = exclusions.len(),
            forbidden_pairings = forbidden.len(),
            coverage_constraints = coverage.len(),
            anti_symmetry_constraints = anti_symmetry.len(),
        );

        ConstraintSet {
            universe,
            exclusions,
            forbidden,
            coverage,
            anti_symmetry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::ConstraintSense;
    use crate::test_utils::registry_of;

    #[test]
    fn test_universe_indexing() {
        let universe = PairingUniverse::new(4);
        assert_eq!(universe.len(), 16);
        assert_eq!(universe.index(2, 3), 11);
        assert_eq!(universe.pairing(11), (2, 3));
        assert_eq!(universe.iter().count(), 16);
        assert!(PairingUniverse::new(0).is_empty());
    }

    #[test]
    fn test_exclusions_cover_all_group_pairs() {
        let registry = registry_of(&[&["a", "b", "c"], &["d"]]);
        let exclusions = ExclusionRelation::from_registry(&registry);

        assert_eq!(exclusions.len(), 3);
        assert!(exclusions.excludes(0, 1));
        assert!(exclusions.excludes(2, 0));
        assert!(!exclusions.excludes(0, 3));
        assert!(!exclusions.excludes(1, 1));
    }

    #[test]
    fn test_overlapping_groups_union() {
        // b belongs to both groups; a and c are not excluded from each other.
        let registry = registry_of(&[&["a", "b"], &["b", "c"]]);
        let exclusions = ExclusionRelation::from_registry(&registry);

        let pairs: Vec<_> = exclusions.iter().collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2)]);
        assert!(!exclusions.excludes(0, 2));
    }

    #[test]
    fn test_forbidden_includes_self_and_both_directions() {
        let registry = registry_of(&[&["a", "b"], &["c"], &["d"]]);
        let constraints = ConstraintBuilder::new(&registry).build();
        let u = constraints.universe;

        let expected: Vec<usize> = {
            let mut v = vec![
                u.index(0, 0),
                u.index(1, 1),
                u.index(2, 2),
                u.index(3, 3),
                u.index(0, 1),
                u.index(1, 0),
            ];
            v.sort_unstable();
            v
        };
        assert_eq!(constraints.forbidden, expected);
        assert_eq!(constraints.candidate_count(), 10);
    }

    #[test]
    fn test_coverage_rows() {
        let registry = registry_of(&[&["a"], &["b"], &["c"]]);
        let constraints = ConstraintBuilder::new(&registry).build();

        assert_eq!(constraints.coverage.len(), 6);
        let gives_b = &constraints.coverage[1];
        assert_eq!(gives_b.kind, ConstraintKind::Gives(1));
        assert_eq!(gives_b.terms, vec![3, 4, 5]);
        assert_eq!(gives_b.sense, ConstraintSense::Equal);

        let receives_c = &constraints.coverage[5];
        assert_eq!(receives_c.kind, ConstraintKind::Receives(2));
        assert_eq!(receives_c.terms, vec![2, 5, 8]);
    }

    #[test]
    fn test_anti_symmetry_rows() {
        let registry = registry_of(&[&["a"], &["b"], &["c"], &["d"]]);
        let constraints = ConstraintBuilder::new(&registry).build();

        assert_eq!(constraints.anti_symmetry.len(), 6);
        let first = &constraints.anti_symmetry[0];
        assert_eq!(first.kind, ConstraintKind::AntiSymmetry(0, 1));
        assert_eq!(first.terms, vec![1, 4]);
        assert_eq!(first.sense, ConstraintSense::LessEqual);
        assert_eq!(first.rhs, 1.0);
    }

    #[test]
    fn test_single_member_groups_only_forbid_self() {
        let registry = registry_of(&[&["a"], &["b"]]);
        let constraints = ConstraintBuilder::new(&registry).build();
        assert!(constraints.exclusions.is_empty());
        assert_eq!(constraints.forbidden, vec![0, 3]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = registry_of(&[]);
        let constraints = ConstraintBuilder::new(&registry).build();
        assert!(constraints.universe.is_empty());
        assert!(constraints.forbidden.is_empty());
        assert!(constraints.coverage.is_empty());
        assert!(constraints.anti_symmetry.is_empty());
    }
}
