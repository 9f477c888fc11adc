// MCP (Model Context Protocol) server for the Bank Sheets API
// Exposes Bank Sheets tools and resources to agent clients over stdio

pub mod backend;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod server;

pub use backend::BankSheetsApi;
pub use catalog::Catalog;
pub use dispatch::Dispatcher;
pub use error::{McpError, McpResult};
pub use server::McpServer;
