//! Error types for the Postgres MCP Server.
//!
//! Every failure that can surface on the wire maps onto a fixed JSON-RPC
//! error-code taxonomy. Failures are recovered at the request boundary and
//! turned into an error response; no handler failure terminates the process
//! or leaves a request unanswered.

use crate::constants::{
    CODE_INTERNAL_ERROR, CODE_INVALID_QUERY, CODE_NOT_FOUND, CODE_UNAUTHORIZED,
};
use crate::protocol::RpcError;
use thiserror::Error;

/// Domain errors for the Postgres MCP Server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Credential missing or mismatched.
    #[error("Unauthorized")]
    Unauthorized,

    /// Unknown top-level method.
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Tool name other than `sql_select`.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// SQL absent, empty, or not a SELECT statement.
    #[error("{0}")]
    InvalidQuery(String),

    /// Query execution failed inside the database.
    #[error("Query execution error: {0}")]
    QueryExecution(String),

    /// Could not obtain a database connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Configuration error (startup only).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Create an invalid-query error.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The JSON-RPC error code for this error.
    pub fn rpc_code(&self) -> i32 {
        match self {
            Self::Unauthorized => CODE_UNAUTHORIZED,
            Self::MethodNotFound(_) | Self::ToolNotFound(_) => CODE_NOT_FOUND,
            Self::InvalidQuery(_) => CODE_INVALID_QUERY,
            Self::QueryExecution(_) | Self::Connection(_) | Self::Config(_) | Self::Internal(_) => {
                CODE_INTERNAL_ERROR
            }
        }
    }

    /// Convert into the wire-level error object.
    pub fn to_rpc_error(&self) -> RpcError {
        RpcError {
            code: self.rpc_code(),
            message: self.to_string(),
        }
    }
}

impl From<tokio_postgres::Error> for ServerError {
    fn from(e: tokio_postgres::Error) -> Self {
        ServerError::QueryExecution(e.to_string())
    }
}

impl From<deadpool_postgres::PoolError> for ServerError {
    fn from(e: deadpool_postgres::PoolError) -> Self {
        ServerError::Connection(e.to_string())
    }
}

impl From<deadpool_postgres::BuildError> for ServerError {
    fn from(e: deadpool_postgres::BuildError) -> Self {
        ServerError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(e: serde_json::Error) -> Self {
        ServerError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(ServerError::Unauthorized.rpc_code(), -32098);
        assert_eq!(
            ServerError::MethodNotFound("foo".into()).rpc_code(),
            -32601
        );
        assert_eq!(ServerError::ToolNotFound("bar".into()).rpc_code(), -32601);
        assert_eq!(
            ServerError::invalid_query("Only SELECT queries are allowed").rpc_code(),
            -32000
        );
        assert_eq!(
            ServerError::QueryExecution("boom".into()).rpc_code(),
            -32001
        );
        assert_eq!(ServerError::Connection("down".into()).rpc_code(), -32001);
        assert_eq!(ServerError::internal("oops").rpc_code(), -32001);
    }

    #[test]
    fn test_unauthorized_message() {
        assert_eq!(ServerError::Unauthorized.to_string(), "Unauthorized");
    }

    #[test]
    fn test_rpc_error_carries_message() {
        let err = ServerError::invalid_query("Only SELECT queries are allowed").to_rpc_error();
        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "Only SELECT queries are allowed");
    }
}
