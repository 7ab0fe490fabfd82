//! JSON-RPC wire types.
//!
//! The request `id` is caller-supplied and opaque: string, number, or null.
//! It is echoed verbatim on the response and never interpreted. A response
//! carries exactly one of `result` or `error`; the constructors enforce the
//! exclusivity so no other code path can produce a malformed envelope.

use crate::constants::JSONRPC_VERSION;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound JSON-RPC request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Opaque caller-supplied identifier. Absent is treated as null.
    #[serde(default)]
    pub id: Value,

    /// Method name, e.g. `initialize` or `tools/call`.
    pub method: String,

    /// Method parameters. Absent is treated as null.
    #[serde(default)]
    pub params: Value,
}

/// An outbound JSON-RPC response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol marker, always "2.0".
    pub jsonrpc: String,

    /// Echo of the request id.
    pub id: Value,

    /// Successful result. Mutually exclusive with `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error object. Mutually exclusive with `result`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// Wire-level error object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcError {
    /// JSON-RPC error code.
    pub code: i32,

    /// Human-readable error message.
    pub message: String,
}

impl JsonRpcResponse {
    /// Build a success response echoing the request id.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Build an error response echoing the request id.
    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Whether this response carries an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
