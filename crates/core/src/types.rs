use crate::scope::Scope;
use serde::{Deserialize, Serialize};

/// API key issued by the Bank Sheets service
///
/// Permissions are kept as raw strings since the service may grant scopes
/// this build does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<String>,
    pub is_active: bool,
}

/// Connection status for Plaid and Google Sheets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    pub plaid_connected: bool,
    pub google_sheets_connected: bool,
    pub api_access_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<String>,
    pub bank_accounts_count: u64,
    pub active_spreadsheets_count: u64,
}

/// Rate-limit counters for the calling key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub daily_used: u64,
    pub daily_limit: u64,
    pub daily_remaining: u64,
    pub minute_used: u64,
    pub minute_limit: u64,
    pub minute_remaining: u64,
    pub daily_reset: String,
    pub minute_reset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub account_id: String,
    pub account_name: String,
    pub account_number: String,
    pub account_type: String,
    pub account_subtype: String,
    pub institution_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub amount: f64,
    pub date: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    pub pending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_channel: Option<String>,
    /// Opaque category object, passed through as received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_finance_category: Option<serde_json::Value>,
}

/// Google Sheets spreadsheet linked to the account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub is_active: bool,
}

/// Query parameters for the transactions endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    /// Start date in YYYY-MM-DD format
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl TransactionQuery {
    pub fn new(start_date: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: None,
            account_id: account_id.into(),
            limit: None,
        }
    }

    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total: u64,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountList {
    pub accounts: Vec<BankAccount>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadsheetList {
    pub sheets: Vec<Spreadsheet>,
    pub total: u64,
}

/// Body of a key generation request
///
/// `permissions` is left out of the JSON entirely when `None`, so the
/// service applies its own default scope set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApiKey {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Scope>>,
}
