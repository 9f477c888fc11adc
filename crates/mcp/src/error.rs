// Errors raised while dispatching a protocol request

use crate::protocol::JsonRpcError;
use banksheets_sdk::SdkError;
use std::fmt;
use thiserror::Error;

/// Which catalog table a lookup missed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Tool,
    Resource,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Tool => f.write_str("Tool"),
            EntryKind::Resource => f.write_str("Resource"),
        }
    }
}

#[derive(Error, Debug)]
pub enum McpError {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: EntryKind, name: String },

    #[error("{kind} '{name}' not implemented")]
    NotImplemented { kind: EntryKind, name: String },

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Remote(#[from] SdkError),

    #[error("Failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type McpResult<T> = Result<T, McpError>;

impl McpError {
    pub fn tool_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntryKind::Tool,
            name: name.into(),
        }
    }

    pub fn resource_not_found(uri: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntryKind::Resource,
            name: uri.into(),
        }
    }

    /// Short machine-readable name of the error
    pub fn kind(&self) -> &'static str {
        match self {
            McpError::NotFound { .. } => "not_found",
            McpError::NotImplemented { .. } => "not_implemented",
            McpError::MissingArgument(_) => "missing_argument",
            McpError::InvalidArguments(_) => "invalid_arguments",
            McpError::Remote(e) => e.kind(),
            McpError::Serialization(_) => "serialization",
        }
    }
}

impl From<McpError> for JsonRpcError {
    fn from(err: McpError) -> Self {
        let data = serde_json::json!({ "kind": err.kind() });
        let message = err.to_string();

        let error = match err {
            McpError::NotFound { .. }
            | McpError::MissingArgument(_)
            | McpError::InvalidArguments(_)
            | McpError::Remote(SdkError::MissingArgument(_)) => JsonRpcError::invalid_params(message),
            McpError::NotImplemented { .. }
            | McpError::Remote(_)
            | McpError::Serialization(_) => JsonRpcError::internal_error(message),
        };

        error.with_data(data)
    }
}
