//! Participant and exclusion-group configuration.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use secret_santa_core::Participant;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ConfigError;

/// Who takes part, grouped into mutually exclusive sets.
///
/// Group order and member order are preserved as written, so the first
/// occurrence of a name decides its email.
///
/// ```
/// use secret_santa_config::GroupsConfig;
///
/// let config = GroupsConfig::from_yaml_str(r#"
/// sender: santa@example.com
/// password: app-password
/// subject: "Secret Santa for {gifter}"
/// smtp:
///   host: smtp.example.com
/// groups:
///   smiths:
///     - name: alice
///       email: alice@example.com
///     - name: bob
///       email: bob@example.com
///   carol:
///     - name: carol
///       email: carol@example.com
/// "#).unwrap();
///
/// assert_eq!(config.group_count(), 2);
/// assert_eq!(config.members("smiths").map(|m| m.len()), Some(2));
/// assert_eq!(config.smtp.port, 587);
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupsConfig {
    /// Named groups whose members never give to each other.
    #[serde(default, deserialize_with = "nullable_groups")]
    pub groups: IndexMap<String, Vec<Participant>>,

    /// Address messages are sent from.
    #[serde(default)]
    pub sender: Option<String>,

    /// Subject line template; `{gifter}` is substituted.
    #[serde(default)]
    pub subject: Option<String>,

    /// SMTP login password for the sender account.
    #[serde(default)]
    pub password: Option<String>,

    /// Outgoing mail server.
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Passphrase history records are encrypted with. Overridden by the
    /// `SECRET_SANTA_HISTORY_KEY` environment variable.
    #[serde(default)]
    pub history_key: Option<String>,
}

/// Default SMTP relay, as used by the original mail setup.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// STARTTLS submission port.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Connection settings for real mail delivery over STARTTLS.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Login name, the sender address when unset.
    #[serde(default)]
    pub username: Option<String>,

    /// Connection and command timeout.
    #[serde(default = "default_smtp_timeout")]
    pub timeout_secs: u64,
}

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn default_smtp_timeout() -> u64 {
    30
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            timeout_secs: default_smtp_timeout(),
        }
    }
}

// `groups:` or `family:` with nothing after it parses as null in YAML.
fn nullable_groups<'de, D>(deserializer: D) -> Result<IndexMap<String, Vec<Participant>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<Vec<Participant>>>> =
        Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, members)| (name, members.unwrap_or_default()))
        .collect())
}

impl GroupsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a groups file, choosing the format by extension
    /// (`.toml` for TOML, anything else for YAML).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }

    /// Parses YAML. An empty document is an empty configuration.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Appends a group, replacing any group with the same name.
    pub fn with_group<I>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = Participant>,
    {
        self.groups.insert(name.into(), members.into_iter().collect());
        self
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_history_key(mut self, key: impl Into<String>) -> Self {
        self.history_key = Some(key.into());
        self
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn members(&self, group: &str) -> Option<&[Participant]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Iterates groups in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Participant])> {
        self.groups
            .iter()
            .map(|(name, members)| (name.as_str(), members.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Name to email map; the first listed email wins for repeated names.
    pub fn emails(&self) -> HashMap<String, String> {
        let mut emails = HashMap::new();
        for member in self.groups.values().flatten() {
            emails
                .entry(member.name.clone())
                .or_insert_with(|| member.email.clone());
        }
        emails
    }
}
