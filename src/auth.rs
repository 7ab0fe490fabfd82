//! Shared-secret authorization gate.
//!
//! Every method except the `initialize` handshake requires a credential
//! carried as an `Authorization: Bearer <secret>` header. The secret is
//! static process-wide configuration compared per request; there is no
//! session or token-issuance lifecycle and no caching of "already
//! authenticated" state.

use crate::error::ServerError;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

/// Validates the shared-secret credential.
#[derive(Debug, Clone)]
pub struct AuthGate {
    secret: String,
}

impl AuthGate {
    /// Create a gate around the configured shared secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Check a caller-supplied credential against the shared secret.
    pub fn verify(&self, credential: Option<&str>) -> Result<(), ServerError> {
        match credential {
            Some(token) if token == self.secret => Ok(()),
            _ => Err(ServerError::Unauthorized),
        }
    }
}

/// Extract the bearer token from the `Authorization` header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_matching_credential_passes() {
        let gate = AuthGate::new("s3cret");
        assert!(gate.verify(Some("s3cret")).is_ok());
    }

    #[test]
    fn test_missing_credential_fails() {
        let gate = AuthGate::new("s3cret");
        let err = gate.verify(None).unwrap_err();
        assert_eq!(err.rpc_code(), -32098);
    }

    #[test]
    fn test_wrong_credential_fails() {
        let gate = AuthGate::new("s3cret");
        assert!(gate.verify(Some("wrong")).is_err());
        assert!(gate.verify(Some("")).is_err());
        assert!(gate.verify(Some("s3cret ")).is_err());
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_absent_or_malformed() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);
    }
}
