//! # Suggestion Errors

use thiserror::Error;

pub type SuggestionResult<T> = Result<T, SuggestionError>;

/// Failure of a suggestion provider. Never reaches engine state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    /// Provider unreachable, not configured, or refused the request
    #[error("Suggestion provider unavailable: {0}")]
    Unavailable(String),

    /// Provider answered with something that is not a suggestion list
    #[error("Malformed suggestion response: {0}")]
    Malformed(String),
}

impl SuggestionError {
    pub fn code(&self) -> &'static str {
        match self {
            SuggestionError::Unavailable(_) => "ACH_SUGGEST_UNAVAILABLE",
            SuggestionError::Malformed(_) => "ACH_SUGGEST_MALFORMED",
        }
    }
}
