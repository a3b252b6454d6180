//! Canned assignments and histories.

use secret_santa_core::{Assignment, History, Pairing};

pub fn assignment_of(pairs: &[(&str, &str)]) -> Assignment {
    pairs
        .iter()
        .map(|&(gifter, giftee)| Pairing::new(gifter, giftee))
        .collect()
}

/// History with one assignment per `(period, pairs)` entry.
pub fn history_of(periods: &[(&str, &[(&str, &str)])]) -> History {
    periods
        .iter()
        .map(|&(period, pairs)| (period.to_string(), assignment_of(pairs)))
        .collect()
}
