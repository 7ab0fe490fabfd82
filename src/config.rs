//! Configuration management for the Postgres MCP Server.
//!
//! Configuration is loaded from environment variables following the 12-factor
//! app pattern. `PGMCP_`-prefixed variables take precedence; the conventional
//! unprefixed names (`DATABASE_URL`, `SECRET_TOKEN`, `PORT`) are accepted as
//! fallbacks.

use crate::constants::{DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT, DEFAULT_POOL_MAX};
use crate::error::ServerError;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,

    /// Shared secret required on every non-handshake request.
    pub secret_token: String,

    /// HTTP listener configuration.
    pub http: HttpConfig,

    /// Connection pool configuration.
    pub pool: PoolConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Host to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Enable permissive CORS.
    pub enable_cors: bool,
}

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool.
    pub max_connections: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            enable_cors: true,
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_POOL_MAX,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// ## Required
    /// - `PGMCP_DATABASE_URL` (or `DATABASE_URL`): PostgreSQL connection string
    /// - `PGMCP_SECRET_TOKEN` (or `SECRET_TOKEN`): shared secret
    ///
    /// ## Optional
    /// - `PGMCP_HTTP_HOST`: bind host (default: 127.0.0.1)
    /// - `PGMCP_HTTP_PORT` (or `PORT`): listen port (default: 3000)
    /// - `PGMCP_HTTP_CORS`: enable CORS (default: true)
    /// - `PGMCP_POOL_MAX`: maximum pool connections (default: 10)
    pub fn from_env() -> Result<Self, ServerError> {
        let database_url = env_fallback("PGMCP_DATABASE_URL", "DATABASE_URL").ok_or_else(|| {
            ServerError::config("PGMCP_DATABASE_URL (or DATABASE_URL) is required")
        })?;

        let secret_token = env_fallback("PGMCP_SECRET_TOKEN", "SECRET_TOKEN").ok_or_else(|| {
            ServerError::config("PGMCP_SECRET_TOKEN (or SECRET_TOKEN) is required")
        })?;

        let host =
            std::env::var("PGMCP_HTTP_HOST").unwrap_or_else(|_| DEFAULT_HTTP_HOST.to_string());

        let port = env_fallback("PGMCP_HTTP_PORT", "PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);

        let enable_cors = std::env::var("PGMCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        let max_connections = std::env::var("PGMCP_POOL_MAX")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_POOL_MAX);

        Ok(Config {
            database_url,
            secret_token,
            http: HttpConfig {
                host,
                port,
                enable_cors,
            },
            pool: PoolConfig { max_connections },
        })
    }
}

/// Read an environment variable, falling back to an unprefixed alias.
fn env_fallback(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .ok()
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "PGMCP_DATABASE_URL",
            "DATABASE_URL",
            "PGMCP_SECRET_TOKEN",
            "SECRET_TOKEN",
            "PGMCP_HTTP_HOST",
            "PGMCP_HTTP_PORT",
            "PORT",
            "PGMCP_HTTP_CORS",
            "PGMCP_POOL_MAX",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let http = HttpConfig::default();
        assert_eq!(http.host, "127.0.0.1");
        assert_eq!(http.port, 3000);
        assert!(http.enable_cors);
        assert_eq!(PoolConfig::default().max_connections, 10);
    }

    #[test]
    #[serial]
    fn test_from_env_requires_database_url() {
        clear_env();
        std::env::set_var("PGMCP_SECRET_TOKEN", "s");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_with_fallback_names() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/db");
        std::env::set_var("SECRET_TOKEN", "hunter2");
        std::env::set_var("PORT", "8080");

        let config = Config::from_env().unwrap();
        assert_eq!(config.database_url, "postgres://localhost/db");
        assert_eq!(config.secret_token, "hunter2");
        assert_eq!(config.http.port, 8080);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_prefixed_names_take_precedence() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://fallback/db");
        std::env::set_var("PGMCP_DATABASE_URL", "postgres://primary/db");
        std::env::set_var("PGMCP_SECRET_TOKEN", "s");

        let config = Config::from_env().unwrap();
        assert_eq!(config.database_url, "postgres://primary/db");
        clear_env();
    }
}
