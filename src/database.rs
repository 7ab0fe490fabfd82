//! Database access layer.
//!
//! The rest of the server depends only on the [`SqlExecutor`] trait, keeping
//! the dispatcher and sanitizer testable against a fake collaborator.

pub mod executor;
pub mod types;

pub use executor::{build_pool, PostgresExecutor, Row, SqlExecutor};
