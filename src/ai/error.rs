//! AI backend error types

use thiserror::Error;

/// Errors that can occur while talking to the AI backend
#[derive(Debug, Error)]
pub enum AiError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

impl AiError {
    /// Check if retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            AiError::Api { status, .. } => *status == 429 || *status >= 500,
            AiError::Network(_) => true,
            AiError::InvalidResponse(_) => false,
            AiError::Json(_) => false,
            AiError::Config(_) => false,
        }
    }
}
