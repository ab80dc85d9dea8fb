//! Transport-agnostic request dispatch.
//!
//! The dispatcher maps a decoded request envelope to a tool invocation and
//! shapes the response. It is the single place where the two-tier error
//! contract is enforced:
//!
//! - routing failures (unknown method, unknown or unregistered tool) and
//!   unexpected faults become protocol-level errors (-32601 / -32603);
//! - everything a tool itself reports — bad arguments, invalid series ids,
//!   missing data — is delivered as a tool-level failure *inside* a normal
//!   response payload.
//!
//! Every transport (stdio, HTTP) hands its envelopes to the same dispatcher,
//! so the tool set behaves identically over both channels. Dispatch holds no
//! per-request state; the registry is read-only after construction, so
//! concurrent dispatch calls never contend.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::tools::Registry;

use super::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION, SERVER_NAME,
};

/// Server capabilities advertised during initialisation.
#[derive(Debug, Clone, Serialize)]
pub struct ServerCapabilities {
    /// Tool-related capabilities.
    pub tools: ToolCapabilities,
}

impl Default for ServerCapabilities {
    fn default() -> Self {
        Self {
            tools: ToolCapabilities { list_changed: false },
        }
    }
}

/// Tool-specific capabilities.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCapabilities {
    /// Whether the tool list can change during the session. It cannot: the
    /// registry is sealed at construction.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Server information for the initialisation response.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Parameters for tools/call requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call.
    pub name: String,
    /// Arguments for the tool.
    #[serde(default)]
    pub arguments: Value,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

/// Wire shape of a tools/call result.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
}

impl ToolCallResult {
    fn from_payload(payload: &Value) -> Self {
        let text = serde_json::to_string_pretty(payload)
            .unwrap_or_else(|_| payload.to_string());
        Self {
            content: vec![ToolContent::Text { text }],
        }
    }
}

/// Maps request envelopes to tool invocations over a fixed registry.
pub struct Dispatcher {
    registry: Registry,
}

impl Dispatcher {
    /// Creates a dispatcher over a sealed registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher serves.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Dispatches a single request and shapes the response.
    ///
    /// # Errors
    ///
    /// Returns a protocol-level `JsonRpcError` for routing failures and
    /// unexpected faults; tool-level failures are part of the `Ok` response.
    pub fn dispatch(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        debug!(method = %req.method, id = %req.id, "dispatching request");

        match req.method.as_str() {
            "initialize" => Ok(Self::handle_initialize(req)),
            "tools/list" => Ok(self.handle_tools_list(req)),
            "tools/call" => self.handle_tools_call(req),
            "ping" => Ok(JsonRpcResponse::success(req.id.clone(), json!({}))),
            _ => Err(JsonRpcError::method_not_found(req.id.clone(), &req.method)),
        }
    }

    /// Handles the initialize request.
    ///
    /// Independent of registry contents; the response advertises identity
    /// and capabilities, not the tool list.
    fn handle_initialize(req: &JsonRpcRequest) -> JsonRpcResponse {
        let result = json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": ServerCapabilities::default(),
            "serverInfo": ServerInfo::default(),
        });

        JsonRpcResponse::success(req.id.clone(), result)
    }

    /// Handles the tools/list request. Order is registration order.
    fn handle_tools_list(&self, req: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(req.id.clone(), json!({ "tools": self.registry.list() }))
    }

    /// Handles the tools/call request.
    fn handle_tools_call(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        let params: ToolCallParams = req
            .params
            .as_ref()
            .map(|p| serde_json::from_value(p.clone()))
            .transpose()
            .map_err(|e| {
                JsonRpcError::invalid_params(
                    req.id.clone(),
                    format!("Invalid tool call params: {e}"),
                )
            })?
            .ok_or_else(|| {
                JsonRpcError::invalid_params(req.id.clone(), "Missing tool call params")
            })?;

        let Some(tool) = self.registry.lookup(&params.name) else {
            info!(tool = %params.name, "tool not registered");
            return Err(JsonRpcError::unknown_tool(req.id.clone(), &params.name));
        };

        // Last-resort fault barrier: a panicking tool must surface as a
        // protocol-level internal error, never tear down the transport.
        let outcome = catch_unwind(AssertUnwindSafe(|| tool.execute(&params.arguments)))
            .map_err(|panic| {
                let message = panic_message(panic.as_ref());
                error!(tool = %params.name, message, "tool execution panicked");
                JsonRpcError::internal_error(
                    req.id.clone(),
                    format!("Tool execution failed: {message}"),
                )
            })?;

        let payload = outcome.into_payload();
        let result = serde_json::to_value(ToolCallResult::from_payload(&payload)).map_err(|e| {
            error!(error = %e, "failed to serialise tool call result");
            JsonRpcError::internal_error(req.id.clone(), "Failed to serialise result")
        })?;

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
