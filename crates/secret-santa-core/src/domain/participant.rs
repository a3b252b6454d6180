//! Participant records.

use serde::{Deserialize, Serialize};

/// Dense identifier handed out by the registry.
///
/// Only meaningful within the invocation that produced it.
pub type ParticipantId = usize;

/// A member of the exchange.
///
/// The name is the unique key; the email is only used for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
