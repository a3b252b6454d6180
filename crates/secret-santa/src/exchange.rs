//! One gift exchange driven from a config directory.

use std::path::PathBuf;
use std::time::Duration;

use secret_santa_config::{ConfigDir, ConfigError, EngineConfig, GroupsConfig};
use secret_santa_core::{Assignment, History, SantaError};
use secret_santa_notify::{
    dispatch, DeliveryMode, MessageTemplate, Notifier, NotifyError, SmtpNotifier,
};
use secret_santa_solver::{AssignmentEngine, ConstraintBuilder, ParticipantRegistry, SolveReport};
use secret_santa_store::{
    DirectoryHistoryStore, EncryptedCodec, HistoryCodec, HistoryStore, JsonCodec, StoreError,
};
use thiserror::Error;
use tracing::info;

/// Any failure while running an exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solve(#[from] SantaError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

impl ExchangeError {
    /// True when the groups admit no valid assignment.
    pub fn is_no_feasible_assignment(&self) -> bool {
        matches!(self, ExchangeError::Solve(e) if e.is_no_feasible_assignment())
    }
}

/// Problem size summary, available without solving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub participants: usize,
    pub groups: usize,
    /// Unordered pairs of distinct participants sharing a group.
    pub excluded_pairs: usize,
    /// Ordered pairings still allowed after exclusions.
    pub candidate_pairings: usize,
    pub history_periods: usize,
    /// Set when the groups can be seen to admit no assignment at all.
    pub infeasible_reason: Option<String>,
}

/// Environment variable holding the history passphrase. Takes precedence
/// over `history_key` in the config file.
pub const HISTORY_KEY_ENV: &str = "SECRET_SANTA_HISTORY_KEY";

/// Everything one exchange needs: participants, engine settings, message
/// template and the directory holding its history.
#[derive(Debug, Clone)]
pub struct Exchange {
    groups: GroupsConfig,
    engine: EngineConfig,
    template: MessageTemplate,
    history_dir: PathBuf,
    history_key: Option<String>,
}

impl Exchange {
    /// Loads every part of `dir`.
    pub fn open(dir: &ConfigDir) -> Result<Self, ExchangeError> {
        let groups = dir.groups()?;
        let engine = dir.engine()?;

        let mut template = MessageTemplate::default();
        if let Some(content) = dir.content()? {
            template.content = content;
        }
        if let Some(header) = dir.header()? {
            template.header = header;
        }
        if let Some(footer) = dir.footer()? {
            template.footer = footer;
        }
        if let Some(subject) = &groups.subject {
            template.subject = subject.clone();
        }

        let history_key = std::env::var(HISTORY_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| groups.history_key.clone());

        info!(
            event = "exchange_opened",
            path = %dir.root().display(),
            groups = groups.group_count(),
            encrypted_history = history_key.is_some(),
        );
        Ok(Self {
            groups,
            engine,
            template,
            history_dir: dir.history_dir(),
            history_key,
        })
    }

    pub fn groups(&self) -> &GroupsConfig {
        &self.groups
    }

    pub fn engine_config(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// Replaces the engine settings, e.g. to apply a command line seed.
    pub fn with_engine_config(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Sets or clears the passphrase history records are encrypted with.
    pub fn with_history_key(mut self, key: Option<String>) -> Self {
        self.history_key = key;
        self
    }

    /// The store backing this exchange's `history/` directory.
    ///
    /// Records are encrypted when a history key is configured, and plain
    /// JSON otherwise.
    pub fn history_store(&self) -> DirectoryHistoryStore<Box<dyn HistoryCodec>> {
        let codec: Box<dyn HistoryCodec> = match &self.history_key {
            Some(key) => Box::new(EncryptedCodec::new(key)),
            None => Box::new(JsonCodec),
        };
        DirectoryHistoryStore::with_codec(&self.history_dir, codec)
    }

    /// An SMTP notifier for the configured sender account.
    ///
    /// Needs both `sender` and `password` in the config; the login name
    /// defaults to the sender address.
    pub fn smtp_notifier(&self) -> Result<SmtpNotifier, ExchangeError> {
        let sender = self.sender()?;
        let password = self.groups.password.as_deref().ok_or_else(|| {
            ConfigError::Invalid(
                "no SMTP password configured; add `password:` to the config".to_string(),
            )
        })?;
        let smtp = &self.groups.smtp;
        let username = smtp.username.as_deref().unwrap_or(sender);

        Ok(SmtpNotifier::starttls(
            &smtp.host,
            smtp.port,
            username,
            password,
            Duration::from_secs(smtp.timeout_secs),
        )?)
    }

    fn sender(&self) -> Result<&str, ConfigError> {
        self.groups.sender.as_deref().ok_or_else(|| {
            ConfigError::Invalid("no sender configured; add `sender:` to the config".to_string())
        })
    }

    /// Counts participants and exclusions without solving.
    pub fn check(&self, history: &History) -> CheckReport {
        let registry = ParticipantRegistry::from_config(&self.groups);
        let constraints = ConstraintBuilder::new(&registry).build();
        let n = registry.len();
        let largest = registry
            .groups()
            .iter()
            .map(|group| group.members.len())
            .max()
            .unwrap_or(0);

        let infeasible_reason = if n == 1 || n == 2 {
            Some(format!("{n} participants cannot avoid giving to themselves or each other"))
        } else if largest * 2 > n {
            Some(format!("a group holds {largest} of {n} participants, more than half"))
        } else {
            None
        };

        CheckReport {
            participants: n,
            groups: registry.groups().len(),
            excluded_pairs: constraints.exclusions.len(),
            candidate_pairings: constraints.candidate_count(),
            history_periods: history.len(),
            infeasible_reason,
        }
    }

    /// Solves a new assignment for `period` against the stored history and
    /// records it.
    ///
    /// The period is checked before solving, so an existing record fails fast
    /// with [`StoreError::PeriodExists`].
    pub fn assign<S: HistoryStore>(
        &self,
        period: &str,
        store: &mut S,
    ) -> Result<SolveReport, ExchangeError> {
        if store.contains(period)? {
            return Err(StoreError::PeriodExists {
                period: period.to_string(),
                location: "history".to_string(),
            }
            .into());
        }

        let history = store.load_all()?;
        let report = AssignmentEngine::new(self.engine.clone()).solve(&self.groups, &history)?;
        store.save(period, &report.assignment)?;
        Ok(report)
    }

    /// Sends one message per gifter in `assignment`.
    pub fn notify<N: Notifier>(
        &self,
        assignment: &Assignment,
        mode: DeliveryMode,
        notifier: &mut N,
    ) -> Result<usize, ExchangeError> {
        let sender = self.sender()?;
        let emails = self.groups.emails();
        Ok(dispatch(
            assignment,
            &emails,
            &self.template,
            sender,
            mode,
            notifier,
        )?)
    }
}
