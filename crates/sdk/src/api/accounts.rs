//! Bank accounts API endpoints.

use crate::client::BankSheetsClient;
use crate::error::SdkResult;
use banksheets_core::AccountList;
use serde_json::Value;

const ACCOUNTS: &str = "/api/accounts";

/// Accounts API for listing authorized bank accounts.
pub struct AccountsApi<'a> {
    client: &'a BankSheetsClient,
}

impl<'a> AccountsApi<'a> {
    pub(crate) fn new(client: &'a BankSheetsClient) -> Self {
        Self { client }
    }

    /// List authorized bank accounts.
    pub async fn list(&self) -> SdkResult<AccountList> {
        self.client.http.get(ACCOUNTS).await
    }

    /// Same listing, body returned as sent.
    pub async fn list_raw(&self) -> SdkResult<Value> {
        self.client.http.get(ACCOUNTS).await
    }
}
