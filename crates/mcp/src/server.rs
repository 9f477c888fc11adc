// MCP server: JSON-RPC 2.0 over newline-delimited stdio

use crate::dispatch::Dispatcher;
use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ListChangedCapability, ListResourcesResult, ListToolsResult, ReadResourceParams,
    ServerCapabilities, ServerInfo, PROTOCOL_VERSION,
};
use anyhow::{Context, Result};
use bytes::BytesMut;
use futures_util::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{
    AnyDelimiterCodec, AnyDelimiterCodecError, Decoder, FramedRead, FramedWrite, LinesCodec,
};

pub const SERVER_NAME: &str = "banksheets-mcp-server";

/// Longest accepted request line
const MAX_FRAME_BYTES: usize = 8 * 1024 * 1024;

pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Startup diagnostic; `false` on any failure
    pub async fn test_connection(&self) -> bool {
        self.dispatcher.test_connection().await
    }

    /// Serve on the process's stdin/stdout until stdin closes
    pub async fn serve_stdio(&self) -> Result<()> {
        tracing::info!("MCP server listening on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Read one request, answer it, then read the next; returns at EOF
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut frames = FramedRead::new(reader, RequestFrames::new(MAX_FRAME_BYTES));
        let mut out = FramedWrite::new(writer, LinesCodec::new());

        while let Some(frame) = frames.next().await {
            let response = match frame.context("Failed to read MCP message")? {
                Frame::Line(line) => self.handle_line(&line).await,
                Frame::Oversized => {
                    tracing::warn!("Discarding oversized request frame");
                    Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
                }
                Frame::NotUtf8 => {
                    tracing::warn!("Discarding request frame that is not UTF-8");
                    Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
                }
            };

            if let Some(response) = response {
                let encoded = serde_json::to_string(&response)?;
                out.send(encoded)
                    .await
                    .context("Failed to write MCP response")?;
            }
        }

        tracing::info!("MCP transport closed");
        Ok(())
    }

    /// Handle a single framed message. Notifications yield no response.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Unparsable request");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(_) => return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request())),
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        self.handle_request(request).await
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        };

        let params = request.params.unwrap_or(Value::Null);
        Some(match self.dispatch(&request.method, params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    async fn dispatch(&self, method: &str, params: Value) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => {
                // Params are informational; malformed ones read as empty
                let params: InitializeParams = serde_json::from_value(params).unwrap_or_default();
                match &params.client_info {
                    Some(client) => tracing::info!(
                        client = %client.name,
                        client_version = %client.version,
                        protocol = %params.protocol_version,
                        "Client initialized"
                    ),
                    None => tracing::info!(protocol = %params.protocol_version, "Client initialized"),
                }
                to_result(self.initialize_result())
            }
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => to_result(ListToolsResult {
                tools: self.dispatcher.catalog().list_tool_schemas(),
            }),
            "tools/call" => {
                let params: CallToolParams = parse_params(method, params)?;
                let result = self
                    .dispatcher
                    .call_tool(&params.name, params.arguments)
                    .await?;
                to_result(result)
            }
            "resources/list" => to_result(ListResourcesResult {
                resources: self.dispatcher.catalog().list_resource_schemas(),
            }),
            "resources/read" => {
                let params: ReadResourceParams = parse_params(method, params)?;
                let result = self.dispatcher.read_resource(&params.uri).await?;
                to_result(result)
            }
            _ => Err(JsonRpcError::method_not_found(method)),
        }
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ListChangedCapability { list_changed: false }),
                resources: Some(ListChangedCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// One newline-delimited request as read off the wire
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    Line(String),
    /// Longer than the frame limit; the rest of the line is skipped
    Oversized,
    NotUtf8,
}

/// Newline framing that yields bad lines as frames instead of failing the stream
struct RequestFrames {
    inner: AnyDelimiterCodec,
}

impl RequestFrames {
    fn new(max_length: usize) -> Self {
        Self {
            inner: AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), b"\n".to_vec(), max_length),
        }
    }

    fn frame(
        chunk: Result<Option<bytes::Bytes>, AnyDelimiterCodecError>,
    ) -> std::io::Result<Option<Frame>> {
        match chunk {
            Ok(Some(bytes)) => Ok(Some(match String::from_utf8(bytes.to_vec()) {
                Ok(line) => Frame::Line(line),
                Err(_) => Frame::NotUtf8,
            })),
            Ok(None) => Ok(None),
            Err(AnyDelimiterCodecError::MaxChunkLengthExceeded) => Ok(Some(Frame::Oversized)),
            Err(AnyDelimiterCodecError::Io(e)) => Err(e),
        }
    }
}

impl Decoder for RequestFrames {
    type Item = Frame;
    type Error = std::io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> std::io::Result<Option<Frame>> {
        Self::frame(self.inner.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> std::io::Result<Option<Frame>> {
        Self::frame(self.inner.decode_eof(buf))
    }
}

fn parse_params<T: DeserializeOwned>(method: &str, params: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params for {}: {}", method, e)))
}

fn to_result<T: serde::Serialize>(value: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
