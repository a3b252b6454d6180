//! Configuration system for the secret santa engine.
//!
//! Two kinds of configuration live here:
//!
//! - [`EngineConfig`]: solver settings (time budget, optimality gap, random
//!   seed, repeat penalty), loaded from TOML or YAML.
//! - [`GroupsConfig`]: who takes part and which groups exclude each other,
//!   usually a `config.yaml` inside a [`ConfigDir`].
//!
//! # Examples
//!
//! Load engine configuration from a TOML string:
//!
//! ```
//! use secret_santa_config::EngineConfig;
//! use std::time::Duration;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     random_seed = 7
//!     max_gap = 0.01
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Duration::from_secs(30));
//! assert_eq!(config.random_seed, Some(7));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use secret_santa_config::EngineConfig;
//!
//! let config = EngineConfig::load("solver.toml").unwrap_or_default();
//! assert_eq!(config.max_gap, 0.05);
//! ```

mod dir;
mod groups;


use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use dir::ConfigDir;
pub use groups::{GroupsConfig, SmtpConfig, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};

/// Default wall-clock budget for one solve.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 300;

/// Default relative optimality gap accepted as optimal.
pub const DEFAULT_MAX_GAP: f64 = 0.05;

/// Default cost added per prior occurrence of a pairing.
pub const DEFAULT_REPEAT_PENALTY: f64 = 1.0;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible cost perturbation.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Relative gap to the proven bound that counts as optimal.
    #[serde(default = "default_max_gap")]
    pub max_gap: f64,

    /// Cost added to a pairing for each prior period it occurred in.
    #[serde(default = "default_repeat_penalty")]
    pub repeat_penalty: f64,
}

fn default_max_gap() -> f64 {
    DEFAULT_MAX_GAP
}

fn default_repeat_penalty() -> f64 {
    DEFAULT_REPEAT_PENALTY
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            termination: None,
            max_gap: DEFAULT_MAX_GAP,
            repeat_penalty: DEFAULT_REPEAT_PENALTY,
        }
    }
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the accepted optimality gap.
    pub fn with_max_gap(mut self, max_gap: f64) -> Self {
        self.max_gap = max_gap;
        self
    }

    /// Sets the per-occurrence repeat penalty.
    pub fn with_repeat_penalty(mut self, penalty: f64) -> Self {
        self.repeat_penalty = penalty;
        self
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Returns the solve time budget, falling back to
    /// [`DEFAULT_TIME_LIMIT_SECS`] when no termination is configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use secret_santa_config::EngineConfig;
    /// use std::time::Duration;
    ///
    /// assert_eq!(EngineConfig::new().time_limit(), Duration::from_secs(300));
    /// assert_eq!(
    ///     EngineConfig::new().with_termination_seconds(5).time_limit(),
    ///     Duration::from_secs(5),
    /// );
    /// ```
    pub fn time_limit(&self) -> Duration {
        self.termination
            .as_ref()
            .and_then(|t| t.time_limit())
            .unwrap_or(Duration::from_secs(DEFAULT_TIME_LIMIT_SECS))
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.max_gap) {
            return Err(ConfigError::Invalid(format!(
                "max_gap must be in [0, 1), got {}",
                self.max_gap
            )));
        }
        if !self.repeat_penalty.is_finite() || self.repeat_penalty < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "repeat_penalty must be a finite non-negative number, got {}",
                self.repeat_penalty
            )));
        }
        if self.environment_mode == EnvironmentMode::Reproducible && self.random_seed.is_none() {
            return Err(ConfigError::Invalid(
                "reproducible mode requires random_seed".to_string(),
            ));
        }
        Ok(())
    }
}

/// Environment mode affecting engine behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Fresh random costs on every run.
    #[default]
    NonReproducible,

    /// Seeded costs; the same input yields the same assignment.
    Reproducible,

    /// Re-verify every decoded assignment before returning it.
    FullAssert,
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}
