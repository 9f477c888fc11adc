//! Spreadsheets API endpoints.

use crate::client::BankSheetsClient;
use crate::error::SdkResult;
use banksheets_core::SpreadsheetList;
use serde_json::Value;

const SHEETS: &str = "/api/sheets";

/// Sheets API for the user's Google Sheets spreadsheets.
pub struct SheetsApi<'a> {
    client: &'a BankSheetsClient,
}

impl<'a> SheetsApi<'a> {
    pub(crate) fn new(client: &'a BankSheetsClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> SdkResult<SpreadsheetList> {
        self.client.http.get(SHEETS).await
    }

    pub async fn list_raw(&self) -> SdkResult<Value> {
        self.client.http.get(SHEETS).await
    }
}
