//! Method dispatcher: the protocol core.
//!
//! Given one request, produce exactly one response (or none, for the one-way
//! `notifications/initialized` acknowledgement). Routing order:
//!
//! 1. `initialize` bypasses the auth gate unconditionally.
//! 2. Every other method consults the auth gate first; on failure the method
//!    body is never executed.
//! 3. `notifications/initialized` produces no response body.
//! 4. `tools/list`, `tools/call`, and the legacy `query` surface.
//! 5. Anything else is "Method not found".
//!
//! The dispatcher holds no mutable state; every entity it creates lives and
//! dies within one request.

use crate::auth::AuthGate;
use crate::constants::{PROTOCOL_VERSION, SQL_SELECT_TOOL};
use crate::database::{Row, SqlExecutor};
use crate::error::ServerError;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::security::sanitize_query;
use crate::tools::{legacy_query_result, list_tools_result, tool_call_result};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The top-level request dispatcher.
pub struct McpServer {
    executor: Arc<dyn SqlExecutor>,
    auth: AuthGate,
}

impl McpServer {
    /// Create a dispatcher around a database collaborator and an auth gate.
    pub fn new(executor: Arc<dyn SqlExecutor>, auth: AuthGate) -> Self {
        Self { executor, auth }
    }

    /// Route one request to its handler and produce the response.
    ///
    /// Returns `None` only for the one-way notification method. Every
    /// failure along the way is mapped into an error response echoing the
    /// request id; this function never propagates an error.
    pub async fn dispatch(
        &self,
        request: JsonRpcRequest,
        credential: Option<&str>,
    ) -> Option<JsonRpcResponse> {
        let id = request.id.clone();
        debug!("Dispatching method '{}'", request.method);

        // The handshake is the only unauthenticated call.
        if request.method == "initialize" {
            info!("Client initializing");
            return Some(JsonRpcResponse::success(id, initialize_result()));
        }

        if let Err(e) = self.auth.verify(credential) {
            warn!("Rejected '{}' request: missing or invalid credential", request.method);
            return Some(JsonRpcResponse::error(id, e.to_rpc_error()));
        }

        match request.method.as_str() {
            // Fire-and-forget handshake acknowledgement; no response body.
            "notifications/initialized" => None,

            "tools/list" => Some(self.respond(id, list_tools_result())),

            "tools/call" => {
                let result = self.handle_tools_call(&request.params).await;
                Some(self.respond(id, result))
            }

            // Legacy surface for non-tool clients: raw rows, unwrapped.
            "query" => {
                let result = self.handle_legacy_query(&request.params).await;
                Some(self.respond(id, result))
            }

            other => Some(self.respond(
                id,
                Err(ServerError::MethodNotFound(other.to_string())),
            )),
        }
    }

    /// Liveness probe used by the HTTP health endpoints.
    pub async fn ping(&self) -> Result<(), ServerError> {
        self.executor.ping().await
    }

    /// Handle `tools/call`: tool-name check, sanitize, execute, format.
    async fn handle_tools_call(&self, params: &Value) -> Result<Value, ServerError> {
        let name = params.get("name").and_then(Value::as_str).unwrap_or("");
        if name != SQL_SELECT_TOOL {
            return Err(ServerError::ToolNotFound(name.to_string()));
        }

        let sql = params
            .get("arguments")
            .and_then(|args| args.get("sql"))
            .and_then(Value::as_str);

        let rows = self.run_query(sql).await?;
        tool_call_result(&rows)
    }

    /// Handle the legacy `query` method: same pipeline, raw row envelope.
    async fn handle_legacy_query(&self, params: &Value) -> Result<Value, ServerError> {
        let sql = params.get("sql").and_then(Value::as_str);
        let rows = self.run_query(sql).await?;
        legacy_query_result(&rows)
    }

    /// The sanitize-execute sequence shared by both query surfaces.
    async fn run_query(&self, sql: Option<&str>) -> Result<Vec<Row>, ServerError> {
        let directive = sanitize_query(sql)?;
        self.executor.execute(&directive).await
    }

    /// Map a handler outcome into a response, logging failures.
    fn respond(&self, id: Value, result: Result<Value, ServerError>) -> JsonRpcResponse {
        match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => {
                warn!("Request failed: {}", e);
                JsonRpcResponse::error(id, e.to_rpc_error())
            }
        }
    }
}

/// Build the `initialize` result: protocol version, capability descriptor,
/// and fixed server identity metadata.
fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_result_shape() {
        let result = initialize_result();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert!(result["capabilities"]["tools"].is_object());
        assert_eq!(result["serverInfo"]["name"], "pg-mcp-server");
    }
}
