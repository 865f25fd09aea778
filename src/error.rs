//! Crate error type.

use thiserror::Error as ThisError;

/// Errors reported by the oracle.
///
/// The search itself cannot fail once an [`Instance`](crate::models::Instance)
/// exists; errors come from input validation, configuration validation and
/// result output.
#[derive(Debug, ThisError)]
pub enum OracleError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, OracleError>;

impl OracleError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
