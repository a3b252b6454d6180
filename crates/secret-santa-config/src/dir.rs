//! Configuration directory layout.

use std::io;
use std::path::{Path, PathBuf};

use crate::{ConfigError, EngineConfig, GroupsConfig};

const GROUPS_YAML: &str = "config.yaml";
const GROUPS_TOML: &str = "config.toml";
const ENGINE_TOML: &str = "solver.toml";
const HEADER: &str = "email_header.txt";
const CONTENT: &str = "content.txt";
const FOOTER: &str = "email_footer.txt";
const HISTORY: &str = "history";

/// A directory holding everything one exchange needs.
///
/// ```text
/// <dir>/
///   config.yaml        participants and groups (config.toml also accepted)
///   solver.toml        engine settings, optional
///   email_header.txt   message template parts, optional
///   content.txt
///   email_footer.txt
///   history/           one file per past period
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    /// Opens an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "config directory {} does not exist",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn history_dir(&self) -> PathBuf {
        self.root.join(HISTORY)
    }

    /// Path of the groups file, preferring YAML when both exist.
    pub fn groups_path(&self) -> PathBuf {
        let yaml = self.root.join(GROUPS_YAML);
        let toml = self.root.join(GROUPS_TOML);
        if !yaml.exists() && toml.exists() {
            toml
        } else {
            yaml
        }
    }

    pub fn groups(&self) -> Result<GroupsConfig, ConfigError> {
        GroupsConfig::load(self.groups_path())
    }

    /// Loads `solver.toml`, or the defaults if the file is absent.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn engine(&self) -> Result<EngineConfig, ConfigError> {
        match EngineConfig::load(self.root.join(ENGINE_TOML)) {
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                Ok(EngineConfig::default())
            }
            other => other,
        }
    }

    pub fn header(&self) -> Result<Option<String>, ConfigError> {
        self.read_optional(HEADER)
    }

    pub fn content(&self) -> Result<Option<String>, ConfigError> {
        self.read_optional(CONTENT)
    }

    pub fn footer(&self) -> Result<Option<String>, ConfigError> {
        self.read_optional(FOOTER)
    }

    fn read_optional(&self, name: &str) -> Result<Option<String>, ConfigError> {
        match std::fs::read_to_string(self.root.join(name)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
