//! Query execution against PostgreSQL.

use crate::config::Config;
use crate::database::types::row_to_json;
use crate::error::ServerError;
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;
use tracing::debug;

/// A single result row: column values indexed by column name, in JSON form.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// The one operation the dispatcher needs from the database collaborator.
///
/// Connection lifecycle, pooling, and TLS are the implementor's concern.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Execute a SQL string and return the ordered result rows.
    async fn execute(&self, sql: &str) -> Result<Vec<Row>, ServerError>;

    /// Liveness probe: a trivial round-trip proving connectivity.
    async fn ping(&self) -> Result<(), ServerError> {
        self.execute("SELECT 1").await.map(|_| ())
    }
}

/// [`SqlExecutor`] backed by a deadpool-managed tokio-postgres pool.
pub struct PostgresExecutor {
    pool: Pool,
}

impl PostgresExecutor {
    /// Create an executor around an existing pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SqlExecutor for PostgresExecutor {
    async fn execute(&self, sql: &str) -> Result<Vec<Row>, ServerError> {
        debug!("Executing query: {}", truncate_for_log(sql, 200));

        let client = self.pool.get().await?;
        let rows = client.query(sql, &[]).await?;

        let result: Result<Vec<Row>, ServerError> = rows.iter().map(row_to_json).collect();
        let result = result?;

        debug!("Query completed: {} row(s)", result.len());
        Ok(result)
    }
}

/// Build a connection pool from the configured database URL.
pub fn build_pool(config: &Config) -> Result<Pool, ServerError> {
    let pg_config: tokio_postgres::Config = config
        .database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| {
            ServerError::config(format!("invalid database URL: {e}"))
        })?;

    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );

    let pool = Pool::builder(manager)
        .max_size(config.pool.max_connections)
        .build()?;

    Ok(pool)
}

/// Truncate a string for logging purposes, respecting char boundaries.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(
            truncate_for_log("SELECT * FROM a_very_long_table", 10),
            "SELECT * F..."
        );
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        // A cut point inside a multibyte char must back up to the previous
        // boundary instead of panicking.
        let sql = "é".repeat(200);
        assert_eq!(truncate_for_log(&sql, 201), format!("{}...", "é".repeat(100)));

        let sql = format!("SELECT '{}' AS greeting", "日本語".repeat(100));
        let out = truncate_for_log(&sql, 200);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }

    #[test]
    fn test_build_pool_rejects_bad_url() {
        let config = Config {
            database_url: "not a url".into(),
            secret_token: "s".into(),
            http: Default::default(),
            pool: Default::default(),
        };
        assert!(matches!(
            build_pool(&config),
            Err(ServerError::Config(_))
        ));
    }
}
