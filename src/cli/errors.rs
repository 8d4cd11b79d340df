//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::persistence::PersistenceError;
use crate::repository::RepositoryError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout, files)
    IoError,
    /// Config file already present
    AlreadyInitialized,
    /// No config file
    NotInitialized,
    /// State file unreadable or unwritable
    StateError,
    /// Command needs an active analysis
    NoActiveAnalysis,
    /// Named entity does not exist
    NotFound,
    /// Argument could not be parsed
    InvalidArgument,
    /// Import blob rejected
    ImportFailed,
    /// Report could not be produced
    ExportFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ACH_CLI_CONFIG_ERROR",
            Self::IoError => "ACH_CLI_IO_ERROR",
            Self::AlreadyInitialized => "ACH_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized => "ACH_CLI_NOT_INITIALIZED",
            Self::StateError => "ACH_CLI_STATE_ERROR",
            Self::NoActiveAnalysis => "ACH_CLI_NO_ACTIVE_ANALYSIS",
            Self::NotFound => "ACH_CLI_NOT_FOUND",
            Self::InvalidArgument => "ACH_CLI_INVALID_ARGUMENT",
            Self::ImportFailed => "ACH_CLI_IMPORT_FAILED",
            Self::ExportFailed => "ACH_CLI_EXPORT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn already_initialized(path: impl fmt::Display) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Config already exists at {}", path),
        )
    }

    pub fn not_initialized(path: impl fmt::Display) -> Self {
        Self::new(
            CliErrorCode::NotInitialized,
            format!("No config at {}. Run 'achdb init' first.", path),
        )
    }

    pub fn state_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StateError, msg)
    }

    pub fn no_active_analysis() -> Self {
        Self::new(
            CliErrorCode::NoActiveAnalysis,
            "No active analysis. Create or select one first.",
        )
    }

    pub fn not_found(what: &str, key: &str) -> Self {
        Self::new(CliErrorCode::NotFound, format!("{} not found: {}", what, key))
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::AlreadyExists(path) => Self::already_initialized(path),
            other => Self::config_error(format!("{} ({})", other, other.code())),
        }
    }
}

impl From<PersistenceError> for CliError {
    fn from(e: PersistenceError) -> Self {
        Self::state_error(format!("{} ({})", e, e.code()))
    }
}

impl From<RepositoryError> for CliError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::AnalysisNotFound(id) => Self::not_found("Analysis", &id.to_string()),
            other => Self::new(
                CliErrorCode::ImportFailed,
                format!("{} ({})", other, other.code()),
            ),
        }
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        Self::new(CliErrorCode::ExportFailed, format!("{} ({})", e, e.code()))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
