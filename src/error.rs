//! Error types for escaping and formatting operations

use thiserror::Error;

/// Errors that can occur while turning values into SQL text
#[derive(Debug, Error)]
pub enum SqlStringError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Value nesting exceeds maximum depth of {0}")]
    DepthExceeded(usize),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SqlStringError {
    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SqlStringError>;
