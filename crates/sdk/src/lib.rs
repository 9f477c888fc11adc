//! # Bank Sheets SDK
//!
//! Rust client for the Bank Sheets API: API key management, account status,
//! usage statistics, bank accounts, transactions and spreadsheets.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use banksheets_sdk::{BankSheetsClient, SdkResult, TransactionQuery};
//!
//! #[tokio::main]
//! async fn main() -> SdkResult<()> {
//!     let client = BankSheetsClient::builder()
//!         .api_key("bsk_your_api_key")
//!         .build()?;
//!
//!     let accounts = client.accounts().list().await?;
//!     println!("Found {} accounts", accounts.total);
//!
//!     let query = TransactionQuery::new("2024-01-01", "acc_123").with_limit(20);
//!     let page = client.transactions().list(&query).await?;
//!     println!("{} transactions, more: {}", page.transactions.len(), page.has_more);
//!
//!     Ok(())
//! }
//! ```
//!
//! Failed calls are never retried. HTTP 401, 403 and 429 surface as
//! [`SdkError::Unauthorized`], [`SdkError::Forbidden`] and
//! [`SdkError::RateLimited`] for every endpoint; anything else is
//! [`SdkError::RemoteFailure`].

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main client
pub use client::{BankSheetsClient, BankSheetsClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{SdkError, SdkResult};

// Re-export core types for convenience
pub use banksheets_core::{
    AccountList, AccountStatus, ApiKey, BankAccount, NewApiKey, Scope, Spreadsheet,
    SpreadsheetList, Transaction, TransactionPage, TransactionQuery, UsageStats,
};
