//! Prior periods' assignments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Assignment;

/// Identifier of a period, usually a year such as `"2024"`.
pub type Period = String;

/// Assignments from earlier periods, keyed by period.
///
/// The engine only reads history to penalize repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    periods: BTreeMap<Period, Assignment>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the assignment of `period`.
    pub fn insert(&mut self, period: impl Into<Period>, assignment: Assignment) {
        self.periods.insert(period.into(), assignment);
    }

    /// Builder-style variant of [`History::insert`].
    pub fn with_period(mut self, period: impl Into<Period>, assignment: Assignment) -> Self {
        self.insert(period, assignment);
        self
    }

    pub fn get(&self, period: &str) -> Option<&Assignment> {
        self.periods.get(period)
    }

    pub fn contains_period(&self, period: &str) -> bool {
        self.periods.contains_key(period)
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Iterates periods in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&Period, &Assignment)> {
        self.periods.iter()
    }

    /// Counts the periods in which `gifter` gave to `giftee`.
    pub fn occurrences(&self, gifter: &str, giftee: &str) -> usize {
        self.periods
            .values()
            .filter(|a| a.contains(gifter, giftee))
            .count()
    }
}

impl FromIterator<(Period, Assignment)> for History {
    fn from_iter<I: IntoIterator<Item = (Period, Assignment)>>(iter: I) -> Self {
        Self {
            periods: iter.into_iter().collect(),
        }
    }
}
