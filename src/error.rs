use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Serialize, Deserialize)]
pub enum RouteError {
    #[error("failed to parse route table: {0}")]
    ParseError(String),

    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("duplicate route pattern `{0}`")]
    DuplicatePattern(String),

    #[error("poisoned lock error: {0}")]
    PoisonedLock(String),
}

impl RouteError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for RouteError {
    fn from(err: serde_json::Error) -> Self {
        RouteError::ParseError(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for RouteError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        RouteError::PoisonedLock(err.to_string())
    }
}
