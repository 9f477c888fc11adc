use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permission scope attached to an API key or advertised by a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "data:read")]
    DataRead,
    #[serde(rename = "data:write")]
    DataWrite,
    #[serde(rename = "management:read")]
    ManagementRead,
    #[serde(rename = "management:write")]
    ManagementWrite,
    #[serde(rename = "analytics:read")]
    AnalyticsRead,
    #[serde(rename = "mcp:access")]
    McpAccess,
}

impl Scope {
    pub const ALL: [Scope; 6] = [
        Scope::DataRead,
        Scope::DataWrite,
        Scope::ManagementRead,
        Scope::ManagementWrite,
        Scope::AnalyticsRead,
        Scope::McpAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::DataRead => "data:read",
            Scope::DataWrite => "data:write",
            Scope::ManagementRead => "management:read",
            Scope::ManagementWrite => "management:write",
            Scope::AnalyticsRead => "analytics:read",
            Scope::McpAccess => "mcp:access",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known scopes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission scope: {0}")]
pub struct ScopeParseError(pub String);

impl FromStr for Scope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| ScopeParseError(s.to_string()))
    }
}
