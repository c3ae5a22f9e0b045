//! Error types for the chat-completion client.

use thiserror::Error;

/// Errors that can occur when calling the model API.
///
/// None of these are fatal to store creation: the ingestion orchestrator
/// absorbs every variant into "zero products extracted".
#[derive(Debug, Error)]
pub enum ChatError {
    /// HTTP request failed (network error, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error payload.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Error type from the API.
        error_type: String,
        /// Error message.
        message: String,
    },

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Failed to parse the response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response carried no usable completion text.
    #[error("empty completion")]
    Empty,
}

/// API error response envelope (`{"error": {"message": ..., "type": ...}}`).
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Error type.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Error message.
    pub message: String,
}
