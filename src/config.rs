//! Configuration file
//!
//! ```json
//! {
//!   "state_file": "achdb-state.json",
//!   "log_level": "warn",
//!   "default_export_format": "markdown"
//! }
//! ```
//!
//! Every field is optional. A relative `state_file` is resolved against the
//! directory holding the config file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::ExportFormat;
use crate::observability::{log_event_with_fields, Event, Severity};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Config already exists: {0}")]
    AlreadyExists(String),

    #[error("Failed to write config: {0}")]
    Write(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "ACH_CONFIG_READ",
            ConfigError::Invalid(_) => "ACH_CONFIG_INVALID",
            ConfigError::AlreadyExists(_) => "ACH_CONFIG_EXISTS",
            ConfigError::Write(_) => "ACH_CONFIG_WRITE",
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchConfig {
    /// Workspace state file
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// trace | info | warn | error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// markdown | json
    #[serde(default = "default_export_format")]
    pub default_export_format: String,
}

fn default_state_file() -> String {
    "achdb-state.json".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_export_format() -> String {
    "markdown".to_string()
}

impl Default for AchConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            log_level: default_log_level(),
            default_export_format: default_export_format(),
        }
    }
}

impl AchConfig {
    /// Load and validate
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: AchConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Invalid(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[("path", &path.display().to_string())],
        );
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.state_file.trim().is_empty() {
            return Err(ConfigError::Invalid("state_file must not be empty".into()));
        }
        self.severity()?;
        self.export_format()?;
        Ok(())
    }

    pub fn severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse().map_err(|_| {
            ConfigError::Invalid(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error.",
                self.log_level
            ))
        })
    }

    pub fn export_format(&self) -> ConfigResult<ExportFormat> {
        self.default_export_format.parse().map_err(|_| {
            ConfigError::Invalid(format!(
                "Invalid default_export_format: '{}'. Must be 'markdown' or 'json'.",
                self.default_export_format
            ))
        })
    }

    /// State file location for a config loaded from `config_path`
    pub fn state_path(&self, config_path: &Path) -> PathBuf {
        let state = Path::new(&self.state_file);
        if state.is_absolute() {
            return state.to_path_buf();
        }
        match config_path.parent() {
            Some(dir) => dir.join(state),
            None => state.to_path_buf(),
        }
    }

    /// Write this config to a new file. Refuses to overwrite.
    pub fn write_new(&self, path: &Path) -> ConfigResult<()> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.display().to_string()));
        }
        self.validate()?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Write(e.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::Write(e.to_string()))?;
            }
        }
        fs::write(path, json).map_err(|e| ConfigError::Write(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("achdb.json");
        fs::write(&path, "{}").unwrap();

        let config = AchConfig::load(&path).unwrap();
        assert_eq!(config, AchConfig::default());
        assert_eq!(config.severity().unwrap(), Severity::Warn);
        assert_eq!(config.export_format().unwrap(), ExportFormat::Markdown);
    }

    #[test]
    fn test_rejects_bad_log_level() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("achdb.json");
        fs::write(&path, json!({"log_level": "loud"}).to_string()).unwrap();

        let err = AchConfig::load(&path).unwrap_err();
        assert_eq!(err.code(), "ACH_CONFIG_INVALID");
    }

    #[test]
    fn test_rejects_bad_export_format() {
        let config = AchConfig {
            default_export_format: "pdf".into(),
            ..AchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = AchConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.code(), "ACH_CONFIG_READ");
    }

    #[test]
    fn test_relative_state_path_follows_config() {
        let config = AchConfig::default();
        let path = config.state_path(Path::new("/srv/ach/achdb.json"));
        assert_eq!(path, PathBuf::from("/srv/ach/achdb-state.json"));

        let absolute = AchConfig {
            state_file: "/var/lib/ach.json".into(),
            ..AchConfig::default()
        };
        assert_eq!(
            absolute.state_path(Path::new("/srv/ach/achdb.json")),
            PathBuf::from("/var/lib/ach.json")
        );
    }

    #[test]
    fn test_write_new_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("achdb.json");

        AchConfig::default().write_new(&path).unwrap();
        assert_eq!(AchConfig::load(&path).unwrap(), AchConfig::default());

        let err = AchConfig::default().write_new(&path).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
    }
}
