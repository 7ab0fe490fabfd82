//! Centralized constants for the Postgres MCP Server.

// =============================================================================
// Protocol Constants
// =============================================================================

/// JSON-RPC protocol marker carried on every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol version reported during the initialize handshake.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name of the single tool exposed by this server.
pub const SQL_SELECT_TOOL: &str = "sql_select";

// =============================================================================
// JSON-RPC Error Codes
// =============================================================================

/// Credential missing or mismatched, for any method except the handshake.
pub const CODE_UNAUTHORIZED: i32 = -32098;

/// Unknown top-level method, or tool name other than `sql_select`.
pub const CODE_NOT_FOUND: i32 = -32601;

/// SQL absent, empty, or not prefixed with `select`.
pub const CODE_INVALID_QUERY: i32 = -32000;

/// Any failure during execution or formatting, including database failures.
pub const CODE_INTERNAL_ERROR: i32 = -32001;

// =============================================================================
// Query Constants
// =============================================================================

/// Row cap appended to SELECT queries that carry no LIMIT of their own.
pub const DEFAULT_ROW_LIMIT: u32 = 100;

// =============================================================================
// HTTP Defaults
// =============================================================================

/// Default host to bind the HTTP server to.
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";

/// Default port for the HTTP server.
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Default maximum connections in the database pool.
pub const DEFAULT_POOL_MAX: usize = 10;
