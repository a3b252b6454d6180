//! Domain types: participants, pairings, assignments and history.

mod assignment;
mod history;
mod pairing;
mod participant;


pub use assignment::Assignment;
pub use history::{History, Period};
pub use pairing::Pairing;
pub use participant::{Participant, ParticipantId};
