//! Key management and account endpoints under `/api/mcp`.

use crate::client::BankSheetsClient;
use crate::error::SdkResult;
use banksheets_core::{AccountStatus, ApiKey, NewApiKey, Scope, UsageStats};
use serde::Deserialize;
use serde_json::Value;

const LIST_API_KEYS: &str = "/api/mcp/listMyApiKeys";
const ACCOUNT_STATUS: &str = "/api/mcp/checkAccountStatus";
const USAGE_STATS: &str = "/api/mcp/viewUsageStats";
const GENERATE_API_KEY: &str = "/api/mcp/generateNewApiKey";

/// Management API for API keys, account status and usage.
///
/// Every call has a `_raw` twin returning the response body untouched.
pub struct ManagementApi<'a> {
    client: &'a BankSheetsClient,
}

impl<'a> ManagementApi<'a> {
    pub(crate) fn new(client: &'a BankSheetsClient) -> Self {
        Self { client }
    }

    /// List all API keys of the authenticated user.
    pub async fn list_credentials(&self) -> SdkResult<Vec<ApiKey>> {
        let response: ListApiKeysResponse<Vec<ApiKey>> =
            self.client.http.get(LIST_API_KEYS).await?;
        Ok(response.api_keys)
    }

    /// The `apiKeys` member of the listing, as sent; `null` when absent.
    pub async fn list_credentials_raw(&self) -> SdkResult<Value> {
        let response: ListApiKeysResponse<Value> = self.client.http.get(LIST_API_KEYS).await?;
        Ok(response.api_keys)
    }

    /// Check Plaid and Google Sheets connection status.
    pub async fn account_status(&self) -> SdkResult<AccountStatus> {
        self.client.http.get(ACCOUNT_STATUS).await
    }

    pub async fn account_status_raw(&self) -> SdkResult<Value> {
        self.client.http.get(ACCOUNT_STATUS).await
    }

    /// View API usage statistics and limits.
    pub async fn usage_stats(&self) -> SdkResult<UsageStats> {
        self.client.http.get(USAGE_STATS).await
    }

    pub async fn usage_stats_raw(&self) -> SdkResult<Value> {
        self.client.http.get(USAGE_STATS).await
    }

    /// Issue a new API key.
    ///
    /// With `permissions` set to `None` the service picks its default scopes.
    pub async fn issue_credential(
        &self,
        name: impl Into<String>,
        permissions: Option<Vec<Scope>>,
    ) -> SdkResult<ApiKey> {
        self.client
            .http
            .post(GENERATE_API_KEY, &new_api_key(name, permissions))
            .await
    }

    pub async fn issue_credential_raw(
        &self,
        name: impl Into<String>,
        permissions: Option<Vec<Scope>>,
    ) -> SdkResult<Value> {
        self.client
            .http
            .post(GENERATE_API_KEY, &new_api_key(name, permissions))
            .await
    }
}

fn new_api_key(name: impl Into<String>, permissions: Option<Vec<Scope>>) -> NewApiKey {
    NewApiKey {
        name: name.into(),
        permissions,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListApiKeysResponse<T> {
    #[serde(default)]
    api_keys: T,
}
