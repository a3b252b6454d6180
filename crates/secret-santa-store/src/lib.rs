//! Assignment history storage.
//!
//! Each period (normally a calendar year) stores exactly one [`Assignment`].
//! Records are plain JSON by default; [`EncryptedCodec`] seals them under a
//! shared passphrase.
//! A stored period is never overwritten: running the exchange twice in one
//! year fails until the old record is removed by hand.
//!
//! ```
//! use secret_santa_core::{Assignment, Pairing};
//! use secret_santa_store::{HistoryStore, InMemoryHistoryStore};
//!
//! let mut store = InMemoryHistoryStore::new();
//! let assignment: Assignment = [Pairing::new("ann", "ben")].into_iter().collect();
//!
//! store.save("2024", &assignment).unwrap();
//! assert!(store.save("2024", &assignment).is_err());
//! assert_eq!(store.load_all().unwrap().len(), 1);
//! ```

mod codec;
mod directory;
mod memory;

use chrono::Datelike;
use secret_santa_core::{Assignment, History};
use thiserror::Error;

pub use codec::{EncryptedCodec, HistoryCodec, JsonCodec};
pub use directory::DirectoryHistoryStore;
pub use memory::InMemoryHistoryStore;

/// History storage error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Assignments already exist for {period}. To create new assignments delete {location} first")]
    PeriodExists { period: String, location: String },

    #[error("No assignments stored for {period}. Create assignments first")]
    PeriodMissing { period: String },

    #[error("Could not read period {period} from {location}: {source}")]
    Record {
        period: String,
        location: String,
        #[source]
        source: Box<StoreError>,
    },

    #[error("Invalid period {period:?}: {reason}")]
    InvalidPeriod { period: String, reason: &'static str },

    #[error("Codec error: {0}")]
    Codec(String),
}

/// Persistent record of past assignments.
pub trait HistoryStore {
    /// Loads every stored period.
    fn load_all(&self) -> Result<History, StoreError>;

    /// Loads one period.
    ///
    /// Fails with [`StoreError::PeriodMissing`] if nothing was stored for it.
    fn load(&self, period: &str) -> Result<Assignment, StoreError>;

    /// Stores `assignment` as `period`.
    ///
    /// Fails with [`StoreError::PeriodExists`] if the period is already
    /// stored; the existing record is left untouched.
    fn save(&mut self, period: &str, assignment: &Assignment) -> Result<(), StoreError>;

    fn contains(&self, period: &str) -> Result<bool, StoreError> {
        match self.load(period) {
            Ok(_) => Ok(true),
            Err(StoreError::PeriodMissing { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Checks that `period` can name a record on its own.
///
/// Period ids become file names, so they must be non-empty, must not start
/// with `.` and must not contain path separators or NUL.
pub fn validate_period(period: &str) -> Result<(), StoreError> {
    let reason = if period.is_empty() {
        "must not be empty"
    } else if period.starts_with('.') {
        "must not start with '.'"
    } else if period.contains(['/', '\\', '\0']) {
        "must not contain path separators"
    } else {
        return Ok(());
    };
    Err(StoreError::InvalidPeriod {
        period: period.to_string(),
        reason,
    })
}

/// The period id for today: the current local calendar year.
pub fn current_period() -> String {
    chrono::Local::now().year().to_string()
}
