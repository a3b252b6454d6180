//! One file per period in a history directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use secret_santa_core::{Assignment, History};
use tracing::{debug, info, warn};

use crate::{validate_period, HistoryCodec, HistoryStore, JsonCodec, StoreError};

/// Stores each period as `<dir>/<period>`.
///
/// The directory is created on first use. Hidden files (names starting with
/// `.`) and subdirectories are ignored when loading.
///
/// A record is written to a hidden `.<period>.tmp` file first and then
/// hard-linked to its final name, so a crash mid-write never leaves a
/// partial record under the period name, and an existing record is never
/// replaced.
#[derive(Debug, Clone)]
pub struct DirectoryHistoryStore<C = JsonCodec> {
    dir: PathBuf,
    codec: C,
}

impl DirectoryHistoryStore<JsonCodec> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_codec(dir, JsonCodec)
    }
}

impl<C: HistoryCodec> DirectoryHistoryStore<C> {
    pub fn with_codec(dir: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            dir: dir.into(),
            codec,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `period`.
    ///
    /// Fails with [`StoreError::InvalidPeriod`] for ids that would resolve
    /// outside the directory or be skipped as hidden.
    pub fn period_path(&self, period: &str) -> Result<PathBuf, StoreError> {
        validate_period(period)?;
        Ok(self.dir.join(period))
    }

    fn temp_path(&self, period: &str) -> PathBuf {
        self.dir.join(format!(".{period}.tmp"))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        if !self.dir.exists() {
            debug!(event = "history_dir_created", path = %self.dir.display());
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    fn read_period(&self, path: &Path) -> Result<Assignment, StoreError> {
        let bytes = fs::read(path)?;
        self.codec.decode(&bytes)
    }
}

impl<C: HistoryCodec> HistoryStore for DirectoryHistoryStore<C> {
    fn load_all(&self) -> Result<History, StoreError> {
        self.ensure_dir()?;

        let mut history = History::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(period) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if period.starts_with('.') {
                continue;
            }
            let path = entry.path();
            let assignment = self
                .read_period(&path)
                .map_err(|source| StoreError::Record {
                    period: period.clone(),
                    location: path.display().to_string(),
                    source: Box::new(source),
                })?;
            history.insert(period, assignment);
        }

        debug!(
            event = "history_loaded",
            path = %self.dir.display(),
            periods = history.len(),
        );
        Ok(history)
    }

    fn load(&self, period: &str) -> Result<Assignment, StoreError> {
        match self.read_period(&self.period_path(period)?) {
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::PeriodMissing {
                    period: period.to_string(),
                })
            }
            other => other,
        }
    }

    fn save(&mut self, period: &str, assignment: &Assignment) -> Result<(), StoreError> {
        let path = self.period_path(period)?;
        self.ensure_dir()?;
        let exists = || StoreError::PeriodExists {
            period: period.to_string(),
            location: path.display().to_string(),
        };
        if path.exists() {
            return Err(exists());
        }

        let bytes = self.codec.encode(assignment)?;
        let temp = self.temp_path(period);
        let written = write_synced(&temp, &bytes).and_then(|()| fs::hard_link(&temp, &path));
        if let Err(e) = fs::remove_file(&temp) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(event = "temp_file_left", path = %temp.display(), error = %e);
            }
        }
        match written {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Err(exists()),
            Err(e) => return Err(e.into()),
        }

        info!(
            event = "history_saved",
            period,
            path = %path.display(),
            pairings = assignment.len(),
        );
        Ok(())
    }
}

// Truncates any temp file left by an interrupted save.
fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
