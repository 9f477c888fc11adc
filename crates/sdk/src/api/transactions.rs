//! Transactions API endpoints.

use crate::client::BankSheetsClient;
use crate::error::{SdkError, SdkResult};
use banksheets_core::{TransactionPage, TransactionQuery};
use serde_json::Value;

const TRANSACTIONS: &str = "/api/transactions";

/// Transactions API for reading bank transactions.
pub struct TransactionsApi<'a> {
    client: &'a BankSheetsClient,
}

impl<'a> TransactionsApi<'a> {
    pub(crate) fn new(client: &'a BankSheetsClient) -> Self {
        Self { client }
    }

    /// List transactions of one account.
    ///
    /// `startDate` and `accountId` must be non-empty; otherwise this fails
    /// with [`SdkError::MissingArgument`] without touching the network.
    pub async fn list(&self, query: &TransactionQuery) -> SdkResult<TransactionPage> {
        check_query(query)?;
        self.client.http.get_with_query(TRANSACTIONS, query).await
    }

    /// Same as [`list`](Self::list), body returned as sent.
    pub async fn list_raw(&self, query: &TransactionQuery) -> SdkResult<Value> {
        check_query(query)?;
        self.client.http.get_with_query(TRANSACTIONS, query).await
    }
}

fn check_query(query: &TransactionQuery) -> SdkResult<()> {
    if query.start_date.trim().is_empty() {
        return Err(SdkError::MissingArgument("startDate"));
    }
    if query.account_id.trim().is_empty() {
        return Err(SdkError::MissingArgument("accountId"));
    }
    Ok(())
}
