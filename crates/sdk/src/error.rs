//! Error types for the Bank Sheets SDK.

use serde::{Deserialize, Serialize};

/// Result type for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

/// Error types that can occur when calling the Bank Sheets API.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// The API key was rejected (HTTP 401).
    #[error("Invalid API key")]
    Unauthorized,

    /// The API key lacks the scope for this call (HTTP 403).
    #[error("Insufficient permissions")]
    Forbidden,

    /// The service is throttling this key (HTTP 429).
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Any other transport failure or non-success response.
    #[error("API request failed: {0}")]
    RemoteFailure(String),

    /// A required request field was empty.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SdkError {
    /// Map a non-success HTTP status and its body to an error.
    ///
    /// Every API call goes through here, so a given status surfaces as the
    /// same variant regardless of which endpoint produced it.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            429 => Self::RateLimited,
            _ => {
                let message = match serde_json::from_str::<ErrorResponse>(body) {
                    Ok(response) => response.error,
                    Err(_) if body.trim().is_empty() => "no response body".to_string(),
                    Err(_) => body.trim().to_string(),
                };
                Self::RemoteFailure(format!("status {}: {}", status, message))
            }
        }
    }

    /// Short machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::RateLimited => "rate_limited",
            Self::RemoteFailure(_) => "remote_failure",
            Self::MissingArgument(_) => "missing_argument",
            Self::Config(_) => "config",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_status(status.as_u16(), "");
        }
        if err.is_timeout() {
            return Self::RemoteFailure(format!("request timed out: {}", err));
        }
        Self::RemoteFailure(err.to_string())
    }
}

/// Error body returned by the Bank Sheets API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
