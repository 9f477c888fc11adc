//! Configuration types for the Bank Sheets SDK.

use std::time::Duration;
use url::Url;

/// Production endpoint of the Bank Sheets API.
pub const DEFAULT_BASE_URL: &str = "https://us-central1-get-bank-sheets.cloudfunctions.net";

/// Timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Bank Sheets client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Bank Sheets API.
    pub base_url: Url,
    /// API key sent in the `X-API-Key` header.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL and key.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
