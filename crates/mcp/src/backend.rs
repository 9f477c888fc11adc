// Remote calls the dispatcher relies on

use banksheets_core::{Scope, TransactionQuery};
use banksheets_sdk::{BankSheetsClient, SdkResult};
use serde_json::Value;

/// One method per remote capability
///
/// Bodies come back as the service sent them, so fields this build does not
/// model still reach the client. Implemented by [`BankSheetsClient`]; the
/// dispatcher only sees this trait.
#[async_trait::async_trait]
pub trait BankSheetsApi: Send + Sync {
    /// The `apiKeys` array of the key listing
    async fn list_credentials(&self) -> SdkResult<Value>;

    async fn account_status(&self) -> SdkResult<Value>;

    async fn usage_stats(&self) -> SdkResult<Value>;

    async fn issue_credential(
        &self,
        name: String,
        permissions: Option<Vec<Scope>>,
    ) -> SdkResult<Value>;

    async fn list_transactions(&self, query: TransactionQuery) -> SdkResult<Value>;

    async fn list_accounts(&self) -> SdkResult<Value>;

    async fn list_spreadsheets(&self) -> SdkResult<Value>;

    /// Liveness check; never fails
    async fn test_connection(&self) -> bool;
}

#[async_trait::async_trait]
impl BankSheetsApi for BankSheetsClient {
    async fn list_credentials(&self) -> SdkResult<Value> {
        self.management().list_credentials_raw().await
    }

    async fn account_status(&self) -> SdkResult<Value> {
        self.management().account_status_raw().await
    }

    async fn usage_stats(&self) -> SdkResult<Value> {
        self.management().usage_stats_raw().await
    }

    async fn issue_credential(
        &self,
        name: String,
        permissions: Option<Vec<Scope>>,
    ) -> SdkResult<Value> {
        self.management()
            .issue_credential_raw(name, permissions)
            .await
    }

    async fn list_transactions(&self, query: TransactionQuery) -> SdkResult<Value> {
        self.transactions().list_raw(&query).await
    }

    async fn list_accounts(&self) -> SdkResult<Value> {
        self.accounts().list_raw().await
    }

    async fn list_spreadsheets(&self) -> SdkResult<Value> {
        self.sheets().list_raw().await
    }

    async fn test_connection(&self) -> bool {
        BankSheetsClient::test_connection(self).await
    }
}
