// Tool catalog entries

use super::schema::{
    json_schema_array, json_schema_empty_object, json_schema_enum, json_schema_number,
    json_schema_object, json_schema_string,
};
use crate::protocol::ToolSchema;
use banksheets_core::Scope;
use serde_json::json;

/// Every tool this server knows how to dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    ListMyApiKeys,
    CheckAccountStatus,
    ViewUsageStats,
    GetTransactions,
    GetAccounts,
    GetSpreadsheets,
    GenerateApiKey,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::ListMyApiKeys,
        ToolKind::CheckAccountStatus,
        ToolKind::ViewUsageStats,
        ToolKind::GetTransactions,
        ToolKind::GetAccounts,
        ToolKind::GetSpreadsheets,
        ToolKind::GenerateApiKey,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::ListMyApiKeys => "list_my_api_keys",
            ToolKind::CheckAccountStatus => "check_account_status",
            ToolKind::ViewUsageStats => "view_usage_stats",
            ToolKind::GetTransactions => "get_transactions",
            ToolKind::GetAccounts => "get_accounts",
            ToolKind::GetSpreadsheets => "get_spreadsheets",
            ToolKind::GenerateApiKey => "generate_api_key",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Catalog entry for this tool
    pub fn definition(&self) -> ToolDefinition {
        match self {
            ToolKind::ListMyApiKeys => ToolDefinition::new(
                self.name(),
                "List all API keys for the authenticated user",
                json_schema_empty_object(),
                vec![Scope::ManagementRead],
            ),
            ToolKind::CheckAccountStatus => ToolDefinition::new(
                self.name(),
                "Check Plaid and Google Sheets connection status",
                json_schema_empty_object(),
                vec![Scope::ManagementRead],
            ),
            ToolKind::ViewUsageStats => ToolDefinition::new(
                self.name(),
                "View API usage statistics and limits",
                json_schema_empty_object(),
                vec![Scope::AnalyticsRead],
            ),
            ToolKind::GetTransactions => ToolDefinition::new(
                self.name(),
                "Get transactions from authorized bank accounts",
                json_schema_object(
                    json!({
                        "startDate": json_schema_string("Start date in YYYY-MM-DD format"),
                        "endDate": json_schema_string(
                            "End date in YYYY-MM-DD format (optional, defaults to today)"
                        ),
                        "accountId": json_schema_string("Bank account ID"),
                        "limit": json_schema_number(
                            "Number of transactions to return (1-100, default 50)"
                        )
                    }),
                    vec!["startDate", "accountId"],
                ),
                vec![Scope::DataRead],
            ),
            ToolKind::GetAccounts => ToolDefinition::new(
                self.name(),
                "Get list of authorized bank accounts",
                json_schema_empty_object(),
                vec![Scope::DataRead],
            ),
            ToolKind::GetSpreadsheets => ToolDefinition::new(
                self.name(),
                "Get list of user's Google Sheets spreadsheets",
                json_schema_empty_object(),
                vec![Scope::DataRead],
            ),
            ToolKind::GenerateApiKey => {
                let scopes: Vec<&str> = Scope::ALL.iter().map(Scope::as_str).collect();
                ToolDefinition::new(
                    self.name(),
                    "Generate a new API key with specified permissions",
                    json_schema_object(
                        json!({
                            "name": json_schema_string("Name for the API key"),
                            "permissions": json_schema_array(
                                json_schema_enum(&scopes),
                                "Permissions to grant to the API key"
                            )
                        }),
                        vec!["name"],
                    ),
                    vec![Scope::ManagementWrite],
                )
            }
        }
    }
}

/// A callable tool: wire schema plus the scopes it advertises
///
/// `required_permissions` is documentation only and never sent on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
    pub required_permissions: Vec<Scope>,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
        required_permissions: Vec<Scope>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            required_permissions,
        }
    }

    pub fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.input_schema.clone(),
        }
    }
}

pub fn builtin_tools() -> Vec<ToolDefinition> {
    ToolKind::ALL.iter().map(ToolKind::definition).collect()
}
