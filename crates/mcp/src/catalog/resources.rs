// Resource catalog entries

use crate::protocol::ResourceSchema;
use banksheets_core::Scope;

pub const JSON_MIME_TYPE: &str = "application/json";

/// Every resource this server knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    BankAccounts,
    Transactions,
    ApiKeys,
    UsageStats,
    Spreadsheets,
    AccountStatus,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::BankAccounts,
        ResourceKind::Transactions,
        ResourceKind::ApiKeys,
        ResourceKind::UsageStats,
        ResourceKind::Spreadsheets,
        ResourceKind::AccountStatus,
    ];

    pub fn uri(&self) -> &'static str {
        match self {
            ResourceKind::BankAccounts => "bank-accounts",
            ResourceKind::Transactions => "transactions",
            ResourceKind::ApiKeys => "api-keys",
            ResourceKind::UsageStats => "usage-stats",
            ResourceKind::Spreadsheets => "spreadsheets",
            ResourceKind::AccountStatus => "account-status",
        }
    }

    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.uri() == uri)
    }

    pub fn definition(&self) -> ResourceDefinition {
        let (name, description, scope) = match self {
            ResourceKind::BankAccounts => (
                "Bank Accounts",
                "List of user's authorized bank accounts",
                Scope::DataRead,
            ),
            ResourceKind::Transactions => (
                "Transactions",
                "User's bank transaction data",
                Scope::DataRead,
            ),
            ResourceKind::ApiKeys => (
                "API Keys",
                "User's API key management information",
                Scope::ManagementRead,
            ),
            ResourceKind::UsageStats => (
                "Usage Statistics",
                "API usage statistics and limits",
                Scope::AnalyticsRead,
            ),
            ResourceKind::Spreadsheets => (
                "Spreadsheets",
                "User's Google Sheets spreadsheets",
                Scope::DataRead,
            ),
            ResourceKind::AccountStatus => (
                "Account Status",
                "Connection status for Plaid and Google Sheets",
                Scope::ManagementRead,
            ),
        };

        ResourceDefinition::new(self.uri(), name, description, JSON_MIME_TYPE, vec![scope])
    }
}

/// A readable resource and the scopes it advertises
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDefinition {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
    pub required_permissions: Vec<Scope>,
}

impl ResourceDefinition {
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        mime_type: impl Into<String>,
        required_permissions: Vec<Scope>,
    ) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: description.into(),
            mime_type: mime_type.into(),
            required_permissions,
        }
    }

    pub fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            uri: self.uri.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            mime_type: self.mime_type.clone(),
        }
    }
}

pub fn builtin_resources() -> Vec<ResourceDefinition> {
    ResourceKind::ALL.iter().map(ResourceKind::definition).collect()
}
