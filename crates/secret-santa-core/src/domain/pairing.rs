//! Ordered (gifter, giftee) pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered pair: `gifter` buys a present for `giftee`.
///
/// Serializes as a two-element array `["gifter", "giftee"]`, the shape used by
/// stored history files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Pairing {
    pub gifter: String,
    pub giftee: String,
}

impl Pairing {
    pub fn new(gifter: impl Into<String>, giftee: impl Into<String>) -> Self {
        Self {
            gifter: gifter.into(),
            giftee: giftee.into(),
        }
    }

    /// Returns the pairing with gifter and giftee swapped.
    pub fn reversed(&self) -> Self {
        Self {
            gifter: self.giftee.clone(),
            giftee: self.gifter.clone(),
        }
    }

    /// Returns true if someone is paired with themselves.
    pub fn is_self_pairing(&self) -> bool {
        self.gifter == self.giftee
    }
}

impl From<(String, String)> for Pairing {
    fn from((gifter, giftee): (String, String)) -> Self {
        Self { gifter, giftee }
    }
}

impl From<Pairing> for (String, String) {
    fn from(pairing: Pairing) -> Self {
        (pairing.gifter, pairing.giftee)
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.gifter, self.giftee)
    }
}
