use secret_santa_core::{Assignment, History};

use crate::{validate_period, HistoryStore, StoreError};

/// History kept in memory, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    history: History,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing records.
    pub fn from_history(history: History) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn load_all(&self) -> Result<History, StoreError> {
        Ok(self.history.clone())
    }

    fn load(&self, period: &str) -> Result<Assignment, StoreError> {
        self.history
            .get(period)
            .cloned()
            .ok_or_else(|| StoreError::PeriodMissing {
                period: period.to_string(),
            })
    }

    fn save(&mut self, period: &str, assignment: &Assignment) -> Result<(), StoreError> {
        validate_period(period)?;
        if self.history.contains_period(period) {
            return Err(StoreError::PeriodExists {
                period: period.to_string(),
                location: "memory".to_string(),
            });
        }
        self.history.insert(period, assignment.clone());
        Ok(())
    }
}
