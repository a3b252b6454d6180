//! Pairing costs.
//!
//! A small random cost per pairing makes every solve land on a different
//! optimum. Pairings from earlier periods pay a flat penalty per occurrence.
//! Random costs are drawn from `[0, 1 / n)`, so the random part of any complete
//! assignment sums to less than one unit and a single repeat always outweighs
//! it when the penalty is at least one unit.

use rand::Rng;
use secret_santa_config::EngineConfig;
use secret_santa_core::History;
use tracing::debug;

use crate::constraint::PairingUniverse;
use crate::registry::ParticipantRegistry;

/// Computes the objective coefficient of every pairing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    repeat_penalty: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            repeat_penalty: secret_santa_config::DEFAULT_REPEAT_PENALTY,
        }
    }
}

impl CostModel {
    pub fn new(repeat_penalty: f64) -> Self {
        Self { repeat_penalty }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.repeat_penalty)
    }

    pub fn repeat_penalty(&self) -> f64 {
        self.repeat_penalty
    }

    /// Upper bound (exclusive) of the random cost for `n` participants.
    pub fn jitter(participant_count: usize) -> f64 {
        if participant_count == 0 {
            0.0
        } else {
            1.0 / participant_count as f64
        }
    }

    /// Returns one cost per pairing of `universe`, indexed like the universe.
    ///
    /// History entries naming people who are not registered this time are
    /// skipped.
    pub fn costs<R: Rng>(
        &self,
        registry: &ParticipantRegistry,
        universe: &PairingUniverse,
        history: &History,
        rng: &mut R,
    ) -> Vec<f64> {
        let jitter = Self::jitter(universe.participant_count());
        let mut costs: Vec<f64> = (0..universe.len())
            .map(|_| rng.random::<f64>() * jitter)
            .collect();

        let mut penalized = 0usize;
        let mut skipped = 0usize;
        for (period, assignment) in history.iter() {
            for pairing in assignment {
                match (registry.id(&pairing.gifter), registry.id(&pairing.giftee)) {
                    (Some(gifter), Some(giftee)) => {
                        costs[universe.index(gifter, giftee)] += self.repeat_penalty;
                        penalized += 1;
                    }
                    _ => {
                        skipped += 1;
                        debug!(
                            event = "history_pairing_skipped",
                            period = %period,
                            gifter = %pairing.gifter,
                            giftee = %pairing.giftee,
                        );
                    }
                }
            }
        }

        debug!(
            event = "costs_built",
            pairing_count = costs.len(),
            jitter,
            history_periods = history.len(),
            penalized,
            skipped,
        );
        costs
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use secret_santa_core::{Assignment, Pairing};

    use super::*;
    use crate::test_utils::registry_of;

    #[test]
    fn test_costs_are_bounded_by_jitter() {
        let registry = registry_of(&[&["a"], &["b"], &["c"], &["d"]]);
        let universe = PairingUniverse::new(registry.len());
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let costs = CostModel::default().costs(&registry, &universe, &History::new(), &mut rng);
        assert_eq!(costs.len(), 16);
        assert!(costs.iter().all(|&c| (0.0..0.25).contains(&c)));
    }

    #[test]
    fn test_costs_vary_between_draws() {
        let registry = registry_of(&[&["a"], &["b"], &["c"]]);
        let universe = PairingUniverse::new(registry.len());
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let model = CostModel::default();
        let first = model.costs(&registry, &universe, &History::new(), &mut rng);
        let second = model.costs(&registry, &universe, &History::new(), &mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn test_seeded_costs_repeat() {
        let registry = registry_of(&[&["a"], &["b"], &["c"]]);
        let universe = PairingUniverse::new(registry.len());
        let model = CostModel::default();

        let empty = History::new();

        let a = model.costs(&registry, &universe, &empty, &mut ChaCha8Rng::seed_from_u64(3));
        let b = model.costs(&registry, &universe, &empty, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_history_penalty_per_period() {
        let registry = registry_of(&[&["a"], &["b"], &["c"]]);
        let universe = PairingUniverse::new(registry.len());
        let history = History::new()
            .with_period("2022", Assignment::new(vec![Pairing::new("a", "b")]))
            .with_period(
                "2023",
                Assignment::new(vec![Pairing::new("a", "b"), Pairing::new("c", "a")]),
            );

        let model = CostModel::new(1.0);
        let empty = History::new();
        let base = model.costs(&registry, &universe, &empty, &mut ChaCha8Rng::seed_from_u64(9));
        let costs = model.costs(&registry, &universe, &history, &mut ChaCha8Rng::seed_from_u64(9));

        let ab = universe.index(0, 1);
        let ca = universe.index(2, 0);
        let ba = universe.index(1, 0);
        assert!((costs[ab] - base[ab] - 2.0).abs() < 1e-12);
        assert!((costs[ca] - base[ca] - 1.0).abs() < 1e-12);
        assert_eq!(costs[ba], base[ba]);
    }

    #[test]
    fn test_unknown_history_names_are_ignored() {
        let registry = registry_of(&[&["a"], &["b"]]);
        let universe = PairingUniverse::new(registry.len());
        let history = History::new().with_period(
            "2020",
            Assignment::new(vec![Pairing::new("a", "zed"), Pairing::new("gone", "b")]),
        );

        let model = CostModel::new(5.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let costs = model.costs(&registry, &universe, &history, &mut rng);
        assert!(costs.iter().all(|&c| c < 1.0));
    }

    #[test]
    fn test_random_part_of_any_assignment_stays_below_one_penalty() {
        let n = 7;
        let max_total = CostModel::jitter(n) * n as f64;
        assert!(max_total <= 1.0);
        assert_eq!(CostModel::jitter(0), 0.0);
    }
}
