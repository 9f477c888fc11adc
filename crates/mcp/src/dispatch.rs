// Dispatch of tool calls and resource reads onto the Bank Sheets API

use crate::backend::BankSheetsApi;
use crate::catalog::{Catalog, ResourceKind, ToolKind};
use crate::error::{EntryKind, McpError, McpResult};
use crate::protocol::{CallToolResult, ReadResourceResult, ResourceContents, ToolContent};
use banksheets_core::{Scope, TransactionQuery};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Days covered by the `transactions` resource, ending today
pub const TRANSACTIONS_WINDOW_DAYS: i64 = 30;

/// Account the `transactions` resource reads from.
///
/// Resource reads take no arguments, so this is a fixed placeholder rather
/// than an aggregate over all authorized accounts.
pub const TRANSACTIONS_RESOURCE_ACCOUNT: &str = "default";

/// Page size of the `transactions` resource
pub const TRANSACTIONS_RESOURCE_LIMIT: u32 = 50;

/// Query sent when reading the `transactions` resource on `today`
pub fn transactions_resource_query(today: NaiveDate) -> TransactionQuery {
    let start = today - Duration::days(TRANSACTIONS_WINDOW_DAYS);
    TransactionQuery::new(start.format("%Y-%m-%d").to_string(), TRANSACTIONS_RESOURCE_ACCOUNT)
        .with_limit(TRANSACTIONS_RESOURCE_LIMIT)
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Maps one protocol operation onto one backend call
///
/// Stateless across calls; the catalog and backend are shared read-only.
#[derive(Clone)]
pub struct Dispatcher {
    catalog: Arc<Catalog>,
    api: Arc<dyn BankSheetsApi>,
    today: fn() -> NaiveDate,
}

impl Dispatcher {
    pub fn new(catalog: Arc<Catalog>, api: Arc<dyn BankSheetsApi>) -> Self {
        Self {
            catalog,
            api,
            today: utc_today,
        }
    }

    /// Replace the date source used for the `transactions` resource window
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn test_connection(&self) -> bool {
        self.api.test_connection().await
    }

    /// Invoke a tool by name
    pub async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<CallToolResult> {
        let tool = self
            .catalog
            .tool(name)
            .ok_or_else(|| McpError::tool_not_found(name))?;

        let kind = ToolKind::from_name(&tool.name).ok_or_else(|| McpError::NotImplemented {
            kind: EntryKind::Tool,
            name: name.to_string(),
        })?;

        info!(tool = name, "Calling tool");
        let result = self.execute_tool(kind, arguments).await.inspect_err(|e| {
            warn!(tool = name, error = %e, "Tool call failed");
        })?;

        Ok(CallToolResult {
            content: vec![ToolContent::text(serde_json::to_string_pretty(&result)?)],
            is_error: None,
        })
    }

    /// Read a resource by URI
    pub async fn read_resource(&self, uri: &str) -> McpResult<ReadResourceResult> {
        let resource = self
            .catalog
            .resource(uri)
            .ok_or_else(|| McpError::resource_not_found(uri))?;

        let kind = ResourceKind::from_uri(&resource.uri).ok_or_else(|| McpError::NotImplemented {
            kind: EntryKind::Resource,
            name: uri.to_string(),
        })?;

        info!(uri, "Reading resource");
        let data = self.fetch_resource(kind).await.inspect_err(|e| {
            warn!(uri, error = %e, "Resource read failed");
        })?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: uri.to_string(),
                mime_type: resource.mime_type.clone(),
                text: serde_json::to_string_pretty(&data)?,
            }],
        })
    }

    async fn execute_tool(&self, kind: ToolKind, arguments: Value) -> McpResult<Value> {
        let args = argument_map(arguments)?;

        let body = match kind {
            ToolKind::ListMyApiKeys => {
                let keys = self.api.list_credentials().await?;
                json!({ "apiKeys": keys })
            }
            ToolKind::CheckAccountStatus => self.api.account_status().await?,
            ToolKind::ViewUsageStats => self.api.usage_stats().await?,
            ToolKind::GetTransactions => {
                let query = transaction_query_from_args(&args)?;
                self.api.list_transactions(query).await?
            }
            ToolKind::GetAccounts => self.api.list_accounts().await?,
            ToolKind::GetSpreadsheets => self.api.list_spreadsheets().await?,
            ToolKind::GenerateApiKey => {
                let name = required_string(&args, "name")?;
                let permissions = permissions_from_args(&args)?;
                self.api.issue_credential(name, permissions).await?
            }
        };
        Ok(body)
    }

    async fn fetch_resource(&self, kind: ResourceKind) -> McpResult<Value> {
        let body = match kind {
            ResourceKind::BankAccounts => self.api.list_accounts().await?,
            ResourceKind::Transactions => {
                let query = transactions_resource_query((self.today)());
                self.api.list_transactions(query).await?
            }
            ResourceKind::ApiKeys => {
                let keys = self.api.list_credentials().await?;
                json!({ "apiKeys": keys })
            }
            ResourceKind::UsageStats => self.api.usage_stats().await?,
            ResourceKind::Spreadsheets => self.api.list_spreadsheets().await?,
            ResourceKind::AccountStatus => self.api.account_status().await?,
        };
        Ok(body)
    }
}

/// Absent or null arguments read as an empty object
fn argument_map(arguments: Value) -> McpResult<Map<String, Value>> {
    match arguments {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(McpError::InvalidArguments(format!(
            "arguments must be an object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn optional_string(args: &Map<String, Value>, field: &str) -> McpResult<Option<String>> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(McpError::InvalidArguments(format!(
            "'{}' must be a string, got {}",
            field,
            json_type_name(other)
        ))),
    }
}

fn required_string(args: &Map<String, Value>, field: &str) -> McpResult<String> {
    optional_string(args, field)?.ok_or_else(|| McpError::MissingArgument(field.to_string()))
}

fn transaction_query_from_args(args: &Map<String, Value>) -> McpResult<TransactionQuery> {
    let start_date = required_string(args, "startDate")?;
    let account_id = required_string(args, "accountId")?;
    let end_date = optional_string(args, "endDate")?;

    let limit = match args.get("limit") {
        None | Some(Value::Null) => None,
        Some(value) => Some(whole_number(value).ok_or_else(|| {
            McpError::InvalidArguments(format!(
                "'limit' must be a non-negative whole number, got {}",
                value
            ))
        })?),
    };

    Ok(TransactionQuery {
        start_date,
        end_date,
        account_id,
        limit,
    })
}

/// `20` and `20.0` both read as 20; fractions, negatives and non-numbers do not
fn whole_number(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let n = value.as_f64()?;
    if n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n) {
        Some(n as u32)
    } else {
        None
    }
}

fn permissions_from_args(args: &Map<String, Value>) -> McpResult<Option<Vec<Scope>>> {
    let items = match args.get("permissions") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(McpError::InvalidArguments(format!(
                "'permissions' must be an array, got {}",
                json_type_name(other)
            )))
        }
    };

    items
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| {
                    McpError::InvalidArguments("'permissions' entries must be strings".to_string())
                })?
                .parse::<Scope>()
                .map_err(|e| McpError::InvalidArguments(e.to_string()))
        })
        .collect::<McpResult<Vec<_>>>()
        .map(Some)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::{builtin_resources, builtin_tools, ResourceDefinition, JSON_MIME_TYPE};
    use banksheets_sdk::{SdkError, SdkResult};
    use std::sync::Mutex;

    /// In-memory backend that records every call it receives
    #[derive(Default)]
    pub(crate) struct RecordingApi {
        pub calls: Mutex<Vec<String>>,
        pub transaction_queries: Mutex<Vec<TransactionQuery>>,
        pub issued: Mutex<Vec<(String, Option<Vec<Scope>>)>>,
        pub fail_with_status: Option<u16>,
    }

    impl RecordingApi {
        pub fn failing(status: u16) -> Self {
            Self {
                fail_with_status: Some(status),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &str) -> SdkResult<()> {
            self.calls.lock().unwrap().push(call.to_string());
            match self.fail_with_status {
                Some(status) => Err(SdkError::from_status(status, "")),
                None => Ok(()),
            }
        }
    }

    pub(crate) fn sample_account_status() -> Value {
        json!({
            "plaidConnected": true,
            "googleSheetsConnected": true,
            "apiAccessEnabled": true,
            "subscriptionStatus": "active",
            "bankAccountsCount": 1,
            "activeSpreadsheetsCount": 1
        })
    }

    #[async_trait::async_trait]
    impl BankSheetsApi for RecordingApi {
        async fn list_credentials(&self) -> SdkResult<Value> {
            self.record("list_credentials")?;
            Ok(json!([{
                "id": "key_1",
                "name": "laptop",
                "permissions": ["data:read"],
                "createdAt": "2024-01-01T00:00:00Z",
                "isActive": true
            }]))
        }

        async fn account_status(&self) -> SdkResult<Value> {
            self.record("account_status")?;
            Ok(sample_account_status())
        }

        async fn usage_stats(&self) -> SdkResult<Value> {
            self.record("usage_stats")?;
            Ok(json!({
                "dailyUsed": 1,
                "dailyLimit": 100,
                "dailyRemaining": 99,
                "minuteUsed": 1,
                "minuteLimit": 10,
                "minuteRemaining": 9,
                "dailyReset": "2024-01-02T00:00:00Z",
                "minuteReset": "2024-01-01T00:01:00Z"
            }))
        }

        async fn issue_credential(
            &self,
            name: String,
            permissions: Option<Vec<Scope>>,
        ) -> SdkResult<Value> {
            self.record("issue_credential")?;
            self.issued
                .lock()
                .unwrap()
                .push((name.clone(), permissions.clone()));
            Ok(json!({
                "id": "key_generated",
                "name": name,
                "permissions": permissions.unwrap_or_else(|| vec![Scope::DataRead]),
                "createdAt": "2024-03-01T00:00:00Z",
                "isActive": true
            }))
        }

        async fn list_transactions(&self, query: TransactionQuery) -> SdkResult<Value> {
            self.record("list_transactions")?;
            self.transaction_queries.lock().unwrap().push(query);
            Ok(json!({"transactions": [], "total": 0, "hasMore": false}))
        }

        async fn list_accounts(&self) -> SdkResult<Value> {
            self.record("list_accounts")?;
            Ok(json!({
                "accounts": [{
                    "accountId": "acc_1",
                    "accountName": "Checking",
                    "accountNumber": "****1234",
                    "accountType": "depository",
                    "accountSubtype": "checking",
                    "institutionName": "First Bank"
                }],
                "total": 1
            }))
        }

        async fn list_spreadsheets(&self) -> SdkResult<Value> {
            self.record("list_spreadsheets")?;
            Ok(json!({"sheets": [], "total": 0}))
        }

        async fn test_connection(&self) -> bool {
            self.record("account_status").is_ok()
        }
    }

    fn dispatcher(api: Arc<RecordingApi>) -> Dispatcher {
        Dispatcher::new(Arc::new(Catalog::builtin()), api)
    }

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn text_of(result: &CallToolResult) -> Value {
        match &result.content[0] {
            ToolContent::Text { text } => serde_json::from_str(text).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_never_reaches_backend() {
        let api = Arc::new(RecordingApi::default());
        let err = dispatcher(api.clone())
            .call_tool("delete_everything", json!({}))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            McpError::NotFound {
                kind: EntryKind::Tool,
                ..
            }
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_resource_is_not_found() {
        let api = Arc::new(RecordingApi::default());
        let err = dispatcher(api.clone())
            .read_resource("budgets")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            McpError::NotFound {
                kind: EntryKind::Resource,
                ..
            }
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_catalogued_but_undispatched_resource_is_not_implemented() {
        let mut resources = builtin_resources();
        resources.push(ResourceDefinition::new(
            "budgets",
            "Budgets",
            "Monthly budgets",
            JSON_MIME_TYPE,
            vec![Scope::DataRead],
        ));
        let api = Arc::new(RecordingApi::default());
        let dispatcher = Dispatcher::new(Arc::new(Catalog::new(builtin_tools(), resources)), api.clone());

        let err = dispatcher.read_resource("budgets").await.unwrap_err();
        assert!(matches!(
            err,
            McpError::NotImplemented {
                kind: EntryKind::Resource,
                ..
            }
        ));
        assert_eq!(err.to_string(), "Resource 'budgets' not implemented");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_transactions_without_account_id_fails_before_backend() {
        let api = Arc::new(RecordingApi::default());
        let err = dispatcher(api.clone())
            .call_tool("get_transactions", json!({"startDate": "2024-01-01"}))
            .await
            .unwrap_err();

        assert!(matches!(err, McpError::MissingArgument(ref field) if field == "accountId"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_transactions_without_start_date_fails() {
        let api = Arc::new(RecordingApi::default());
        let err = dispatcher(api.clone())
            .call_tool("get_transactions", json!({"accountId": "acc_1"}))
            .await
            .unwrap_err();

        assert!(matches!(err, McpError::MissingArgument(ref field) if field == "startDate"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_transactions_passes_arguments_verbatim() {
        let api = Arc::new(RecordingApi::default());
        let d = dispatcher(api.clone());

        d.call_tool(
            "get_transactions",
            json!({"startDate": "2024-01-01", "accountId": "acc_1"}),
        )
        .await
        .unwrap();
        d.call_tool(
            "get_transactions",
            json!({
                "startDate": "2024-01-01",
                "endDate": "2024-01-31",
                "accountId": "acc_1",
                "limit": 5
            }),
        )
        .await
        .unwrap();

        let queries = api.transaction_queries.lock().unwrap().clone();
        // No defaults injected on the tool path
        assert_eq!(queries[0], TransactionQuery::new("2024-01-01", "acc_1"));
        assert_eq!(
            queries[1],
            TransactionQuery::new("2024-01-01", "acc_1")
                .with_end_date("2024-01-31")
                .with_limit(5)
        );
    }

    #[tokio::test]
    async fn test_get_transactions_rejects_bad_limit() {
        let api = Arc::new(RecordingApi::default());
        let d = dispatcher(api.clone());

        for limit in [json!("ten"), json!(2.5), json!(-1), json!(1e12)] {
            let err = d
                .call_tool(
                    "get_transactions",
                    json!({"startDate": "2024-01-01", "accountId": "acc_1", "limit": limit}),
                )
                .await
                .unwrap_err();
            assert!(matches!(err, McpError::InvalidArguments(_)), "limit {}", limit);
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_transactions_accepts_whole_float_limit() {
        let api = Arc::new(RecordingApi::default());
        dispatcher(api.clone())
            .call_tool(
                "get_transactions",
                json!({"startDate": "2024-01-01", "accountId": "acc_1", "limit": 20.0}),
            )
            .await
            .unwrap();

        let queries = api.transaction_queries.lock().unwrap().clone();
        assert_eq!(queries[0].limit, Some(20));
    }

    #[tokio::test]
    async fn test_transactions_resource_uses_trailing_window() {
        let api = Arc::new(RecordingApi::default());
        let result = dispatcher(api.clone())
            .with_clock(fixed_today)
            .read_resource("transactions")
            .await
            .unwrap();

        let queries = api.transaction_queries.lock().unwrap().clone();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].start_date, "2024-02-14");
        assert_eq!(queries[0].account_id, "default");
        assert_eq!(queries[0].limit, Some(50));
        assert_eq!(queries[0].end_date, None);

        assert_eq!(result.contents[0].uri, "transactions");
        assert_eq!(result.contents[0].mime_type, "application/json");
    }

    #[test]
    fn test_transactions_resource_query_crosses_year() {
        let query = transactions_resource_query(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(query.start_date, "2023-12-11");
    }

    #[tokio::test]
    async fn test_generate_api_key_without_permissions() {
        let api = Arc::new(RecordingApi::default());
        let result = dispatcher(api.clone())
            .call_tool("generate_api_key", json!({"name": "ci-bot"}))
            .await
            .unwrap();

        let issued = api.issued.lock().unwrap().clone();
        assert_eq!(issued, vec![("ci-bot".to_string(), None)]);

        let key = text_of(&result);
        assert_eq!(key["id"], "key_generated");
        assert_eq!(key["name"], "ci-bot");
    }

    #[tokio::test]
    async fn test_generate_api_key_parses_permissions() {
        let api = Arc::new(RecordingApi::default());
        let d = dispatcher(api.clone());

        d.call_tool(
            "generate_api_key",
            json!({"name": "reader", "permissions": ["data:read", "analytics:read"]}),
        )
        .await
        .unwrap();

        let err = d
            .call_tool(
                "generate_api_key",
                json!({"name": "root", "permissions": ["everything"]}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::InvalidArguments(_)));

        let err = d.call_tool("generate_api_key", json!({})).await.unwrap_err();
        assert!(matches!(err, McpError::MissingArgument(ref field) if field == "name"));

        let issued = api.issued.lock().unwrap().clone();
        assert_eq!(
            issued,
            vec![(
                "reader".to_string(),
                Some(vec![Scope::DataRead, Scope::AnalyticsRead])
            )]
        );
    }

    #[tokio::test]
    async fn test_get_accounts_and_bank_accounts_match() {
        let api = Arc::new(RecordingApi::default());
        let d = dispatcher(api.clone());

        let tool = d.call_tool("get_accounts", Value::Null).await.unwrap();
        let resource = d.read_resource("bank-accounts").await.unwrap();

        assert_eq!(api.calls(), vec!["list_accounts", "list_accounts"]);

        let from_tool = text_of(&tool);
        let from_resource: Value = serde_json::from_str(&resource.contents[0].text).unwrap();
        assert_eq!(from_tool, from_resource);
        assert!(from_tool["accounts"].is_array());
        assert_eq!(from_tool["total"], 1);
    }

    #[tokio::test]
    async fn test_api_keys_wrapped_on_both_paths() {
        let api = Arc::new(RecordingApi::default());
        let d = dispatcher(api.clone());

        let tool = text_of(&d.call_tool("list_my_api_keys", json!({})).await.unwrap());
        let resource = d.read_resource("api-keys").await.unwrap();
        let resource: Value = serde_json::from_str(&resource.contents[0].text).unwrap();

        assert_eq!(tool["apiKeys"][0]["id"], "key_1");
        assert_eq!(tool, resource);
    }

    #[tokio::test]
    async fn test_every_tool_and_resource_dispatches() {
        let api = Arc::new(RecordingApi::default());
        let d = dispatcher(api.clone());

        for tool in ["list_my_api_keys", "check_account_status", "view_usage_stats", "get_spreadsheets"] {
            d.call_tool(tool, json!({})).await.unwrap();
        }
        for kind in ResourceKind::ALL {
            d.read_resource(kind.uri()).await.unwrap();
        }

        assert_eq!(
            api.calls(),
            vec![
                "list_credentials",
                "account_status",
                "usage_stats",
                "list_spreadsheets",
                "list_accounts",
                "list_transactions",
                "list_credentials",
                "usage_stats",
                "list_spreadsheets",
                "account_status",
            ]
        );
    }

    #[tokio::test]
    async fn test_result_is_pretty_json() {
        let api = Arc::new(RecordingApi::default());
        let result = dispatcher(api)
            .call_tool("check_account_status", json!({}))
            .await
            .unwrap();

        let ToolContent::Text { text } = &result.content[0];
        assert_eq!(
            text,
            &serde_json::to_string_pretty(&sample_account_status()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_remote_errors_propagate() {
        let api = Arc::new(RecordingApi::failing(403));
        let err = dispatcher(api.clone())
            .call_tool("get_spreadsheets", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::Remote(SdkError::Forbidden)));

        let err = dispatcher(api)
            .read_resource("usage-stats")
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::Remote(SdkError::Forbidden)));
    }

    #[tokio::test]
    async fn test_non_object_arguments_rejected() {
        let api = Arc::new(RecordingApi::default());
        let err = dispatcher(api.clone())
            .call_tool("get_accounts", json!([1, 2]))
            .await
            .unwrap_err();

        assert!(matches!(err, McpError::InvalidArguments(_)));
        assert!(api.calls().is_empty());
    }
}
