// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for sfls

use thiserror::Error;

/// Result type alias
pub type SflsResult<T> = Result<T, SflsError>;

/// Main error type
#[derive(Error, Debug)]
pub enum SflsError {
    #[error("Invalid terminal width: {0}")]
    InvalidWidth(usize),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Listing source error ({source_id}): {message}")]
    Source { source_id: String, message: String },

    #[error("{0}")]
    Other(String),
}

impl SflsError {
    /// Errors caused by what the user passed in, as opposed to the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SflsError::InvalidWidth(_)
                | SflsError::NotFound(_)
                | SflsError::Serialization(_)
                | SflsError::Config(_)
        )
    }
}

impl From<serde_json::Error> for SflsError {
    fn from(err: serde_json::Error) -> Self {
        SflsError::Serialization(err.to_string())
    }
}
