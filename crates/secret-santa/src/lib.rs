//! Secret santa assignments as a binary integer program.
//!
//! Participants are split into groups whose members never give to each
//! other. Each run picks a random assignment in which everyone gives and
//! receives exactly one present, nobody draws themselves or a group mate,
//! no two people draw each other, and pairings from earlier years are
//! avoided whenever the groups allow it.
//!
//! # Example
//!
//! ```rust
//! use secret_santa::prelude::*;
//!
//! let groups = GroupsConfig::new()
//!     .with_group("smiths", [
//!         Participant::new("ann", "ann@example.com"),
//!         Participant::new("bob", "bob@example.com"),
//!     ])
//!     .with_group("jones", [
//!         Participant::new("cat", "cat@example.com"),
//!         Participant::new("dan", "dan@example.com"),
//!     ]);
//!
//! let engine = AssignmentEngine::new(EngineConfig::new().with_random_seed(1));
//! let assignment = engine.assign(&groups, &History::new()).unwrap();
//!
//! assert_eq!(assignment.len(), 4);
//! assert!(!assignment.contains("ann", "bob"));
//! ```

pub use secret_santa_config::{
    ConfigDir, ConfigError, EngineConfig, EnvironmentMode, GroupsConfig, SmtpConfig,
    TerminationConfig,
};
pub use secret_santa_core::{
    Assignment, History, NoSolutionReason, Pairing, Participant, Period, SantaError,
};
pub use secret_santa_notify::{
    dispatch, ConsoleNotifier, DeliveryMode, Message, MessageTemplate, Notifier, NotifyError,
    OutboxNotifier, SmtpNotifier,
};
pub use secret_santa_solver::{AssignmentEngine, MicroLpBackend, MipBackend, SolveReport};
pub use secret_santa_store::{
    current_period, validate_period, DirectoryHistoryStore, EncryptedCodec, HistoryCodec,
    HistoryStore, InMemoryHistoryStore, JsonCodec, StoreError,
};

/// Lower-level building blocks of the engine.
pub mod solver {
    pub use secret_santa_solver::*;
}

mod exchange;
pub use exchange::{CheckReport, Exchange, ExchangeError, HISTORY_KEY_ENV};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        Assignment, AssignmentEngine, EngineConfig, GroupsConfig, History, Pairing, Participant,
    };
    pub use super::{DeliveryMode, Exchange, HistoryStore, MessageTemplate, Notifier};
}
