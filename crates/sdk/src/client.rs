//! Main client for the Bank Sheets SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{SdkError, SdkResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the Bank Sheets API.
///
/// This is the only component that performs network I/O. Configuration is
/// fixed at construction.
#[derive(Debug, Clone)]
pub struct BankSheetsClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl BankSheetsClient {
    /// Create a new client builder.
    pub fn builder() -> BankSheetsClientBuilder {
        BankSheetsClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> SdkResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Get the key management API.
    pub fn management(&self) -> ManagementApi<'_> {
        ManagementApi::new(self)
    }

    /// Get the transactions API.
    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi::new(self)
    }

    /// Get the bank accounts API.
    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi::new(self)
    }

    /// Get the spreadsheets API.
    pub fn sheets(&self) -> SheetsApi<'_> {
        SheetsApi::new(self)
    }

    /// Liveness check: `true` iff the account status call succeeds.
    ///
    /// Never returns an error; every failure reads as `false`.
    pub async fn test_connection(&self) -> bool {
        match self.management().account_status_raw().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Connection test failed");
                false
            }
        }
    }
}

/// Builder for creating a BankSheetsClient.
pub struct BankSheetsClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl BankSheetsClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL. Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> SdkResult<BankSheetsClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SdkError::Config("api_key is required".to_string()))?;

        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let config = ClientConfig {
            base_url,
            api_key,
            timeout: self.timeout,
        };

        BankSheetsClient::from_config(config)
    }
}

impl Default for BankSheetsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
