//! Basic SDK usage example.
//!
//! Checks the connection, then prints account status, bank accounts and the
//! last 30 days of transactions of the first account.
//!
//! Run with: MCP_API_KEY=bsk_... cargo run --example basic_usage

use banksheets_sdk::{BankSheetsClient, SdkError, SdkResult, TransactionQuery};

#[tokio::main]
async fn main() -> SdkResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("MCP_API_KEY")
        .map_err(|_| SdkError::Config("set MCP_API_KEY to run this example".to_string()))?;

    let client = BankSheetsClient::builder().api_key(api_key).build()?;

    if !client.test_connection().await {
        println!("Could not reach the Bank Sheets API at {}", client.base_url());
        return Ok(());
    }

    let status = client.management().account_status().await?;
    println!("Plaid connected: {}", status.plaid_connected);
    println!("Google Sheets connected: {}", status.google_sheets_connected);

    println!("\nListing bank accounts...");
    let accounts = client.accounts().list().await?;
    println!("Found {} accounts", accounts.total);

    for account in accounts.accounts.iter().take(5) {
        println!(
            "  {} ({}) at {}",
            account.account_name, account.account_id, account.institution_name
        );
    }

    if let Some(account) = accounts.accounts.first() {
        let start = chrono::Utc::now().date_naive() - chrono::Duration::days(30);
        let query = TransactionQuery::new(start.format("%Y-%m-%d").to_string(), &account.account_id)
            .with_limit(10);

        let page = client.transactions().list(&query).await?;
        println!("\nLatest transactions for {}:", account.account_name);
        for tx in &page.transactions {
            println!("  {} {:>10.2} {}", tx.date, tx.amount, tx.name);
        }
    }

    Ok(())
}
