//! HTTP transport layer for the Bank Sheets SDK.

use crate::config::ClientConfig;
use crate::error::{SdkError, SdkResult};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> SdkResult<Self> {
        let mut headers = header::HeaderMap::new();

        let mut api_key = header::HeaderValue::from_str(&config.api_key)
            .map_err(|_| SdkError::Config("Invalid API key format".to_string()))?;
        api_key.set_sensitive(true);
        headers.insert(header::HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| SdkError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path, keeping any path prefix of the base URL.
    fn build_url(&self, path: &str) -> SdkResult<url::Url> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(url::Url::parse(&format!("{}/{}", base, path))?)
    }

    /// Send a request once and map any failure through [`SdkError::from_status`].
    async fn execute(&self, request_builder: RequestBuilder) -> SdkResult<Response> {
        let response = request_builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "Request failed");
        Err(SdkError::from_status(status.as_u16(), &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> SdkResult<T> {
        response
            .json()
            .await
            .map_err(|e| SdkError::RemoteFailure(format!("invalid response body: {}", e)))
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> SdkResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let response = self.execute(self.client.get(url)).await?;
        Self::decode(response).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> SdkResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        let response = self.execute(self.client.get(url).query(query)).await?;
        Self::decode(response).await
    }

    /// Execute a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> SdkResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        let response = self.execute(self.client.post(url).json(body)).await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
        value: i32,
    }

    #[derive(Debug, Serialize)]
    struct TestRequest {
        name: String,
    }

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig {
            base_url: url::Url::parse(base_url).unwrap(),
            api_key: "bsk_test".to_string(),
            timeout: Duration::from_secs(30),
        })
    }

    #[tokio::test]
    async fn test_get_request_sends_api_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/test"))
            .and(header("x-api-key", "bsk_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "success".to_string(),
                value: 42,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TestResponse = transport.get("/api/test").await.unwrap();
        assert_eq!(result.message, "success");
        assert_eq!(result.value, 42);
    }

    #[tokio::test]
    async fn test_get_with_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("term", "coffee"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "found".to_string(),
                value: 3,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TestResponse = transport
            .get_with_query("/api/search", &[("term", "coffee")])
            .await
            .unwrap();
        assert_eq!(result.value, 3);
    }

    #[tokio::test]
    async fn test_post_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/create"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"name": "test"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "created".to_string(),
                value: 1,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let request = TestRequest {
            name: "test".to_string(),
        };
        let result: TestResponse = transport.post("/api/create", &request).await.unwrap();
        assert_eq!(result.message, "created");
    }

    #[tokio::test]
    async fn test_error_on_400_carries_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/bad"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "Bad Request"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: SdkResult<TestResponse> = transport.get("/api/bad").await;
        match result {
            Err(SdkError::RemoteFailure(message)) => assert!(message.contains("Bad Request")),
            other => panic!("Expected RemoteFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_body_is_remote_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: SdkResult<TestResponse> = transport.get("/api/garbled").await;
        assert!(matches!(result, Err(SdkError::RemoteFailure(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_remote_failure() {
        // Nothing listens on port 9 locally
        let transport = HttpTransport::new(create_config("http://127.0.0.1:9")).unwrap();

        let result: SdkResult<TestResponse> = transport.get("/api/test").await;
        assert!(matches!(result, Err(SdkError::RemoteFailure(_))));
    }

    #[test]
    fn test_build_url() {
        let transport = HttpTransport::new(create_config("http://localhost:8080")).unwrap();

        let url = transport.build_url("/api/test").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/test");
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let transport = HttpTransport::new(create_config("http://localhost:8080/proxy/")).unwrap();

        let url = transport.build_url("/api/test").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/api/test");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let config = Arc::new(ClientConfig {
            base_url: url::Url::parse("http://localhost").unwrap(),
            api_key: "bad\nkey".to_string(),
            timeout: Duration::from_secs(30),
        });

        assert!(matches!(HttpTransport::new(config), Err(SdkError::Config(_))));
    }
}
