//! # Postgres MCP Server
//!
//! A single-endpoint MCP server exposing read-only SQL access to PostgreSQL.
//!
//! The server speaks a JSON-RPC-shaped protocol over one HTTP endpoint:
//! - `initialize`: unauthenticated handshake returning protocol version and
//!   capabilities
//! - `tools/list`: the singleton `sql_select` tool definition
//! - `tools/call`: execute a sanitized SELECT query and return the rows as a
//!   text content block
//! - `query`: legacy surface returning raw rows for non-tool clients
//!
//! Every method except the handshake is guarded by a shared-secret bearer
//! credential. Responses are delivered either as a plain JSON document or as
//! a single server-sent event, negotiated per request from the `Accept`
//! header.

pub mod auth;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod protocol;
pub mod security;
pub mod server;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::ServerError;
pub use server::McpServer;
