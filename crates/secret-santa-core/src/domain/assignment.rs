//! Complete assignments.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Pairing;

/// The selected pairings of one period.
///
/// Order carries no meaning; call [`Assignment::sorted`] when a stable order
/// is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    pairings: Vec<Pairing>,
}

impl Assignment {
    pub fn new(pairings: Vec<Pairing>) -> Self {
        Self { pairings }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }

    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pairing> {
        self.pairings.iter()
    }

    pub fn contains(&self, gifter: &str, giftee: &str) -> bool {
        self.pairings
            .iter()
            .any(|p| p.gifter == gifter && p.giftee == giftee)
    }

    /// Returns the giftee assigned to `gifter`, if any.
    pub fn giftee_of(&self, gifter: &str) -> Option<&str> {
        self.pairings
            .iter()
            .find(|p| p.gifter == gifter)
            .map(|p| p.giftee.as_str())
    }

    /// Returns a copy ordered by gifter, then giftee.
    pub fn sorted(&self) -> Self {
        let mut pairings = self.pairings.clone();
        pairings.sort();
        Self { pairings }
    }

    /// Returns true if some pairing and its reverse are both present.
    pub fn has_mutual_pairing(&self) -> bool {
        let set: HashSet<(&str, &str)> = self
            .pairings
            .iter()
            .map(|p| (p.gifter.as_str(), p.giftee.as_str()))
            .collect();
        self.pairings
            .iter()
            .any(|p| set.contains(&(p.giftee.as_str(), p.gifter.as_str())))
    }

    pub fn into_pairings(self) -> Vec<Pairing> {
        self.pairings
    }
}

impl FromIterator<Pairing> for Assignment {
    fn from_iter<I: IntoIterator<Item = Pairing>>(iter: I) -> Self {
        Self {
            pairings: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Assignment {
    type Item = Pairing;
    type IntoIter = std::vec::IntoIter<Pairing>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairings.into_iter()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Pairing;
    type IntoIter = std::slice::Iter<'a, Pairing>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairings.iter()
    }
}
