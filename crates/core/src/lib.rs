// Core types for the Bank Sheets MCP adapter

pub mod scope;
pub mod types;

pub use scope::{Scope, ScopeParseError};
pub use types::*;
