//! Session verification and route protection.
//!
//! The identity provider is external: sign-in/sign-up and token issuance
//! happen elsewhere. This module only verifies the EdDSA-signed session
//! JWTs it issues, and guards the internal task endpoint with a shared
//! signing key. Any verification failure is a 401 — protected routes are
//! unreachable without a valid session.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;

/// Header the external task platform signs its trigger requests with.
pub const TASK_SIGNATURE_HEADER: &str = "x-task-signature";

/// Claims carried in a verified session JWT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — the provider's opaque user id.
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// OIDC `picture` claim.
    #[serde(default, rename = "picture")]
    pub avatar_url: Option<String>,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Verifies session JWTs against the identity provider's public key.
#[derive(Clone)]
pub struct AuthVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthVerifier {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let decoding_key = DecodingKey::from_ed_pem(config.auth_jwt_public_key_pem.as_bytes())
            .map_err(|e| anyhow::anyhow!("bad AUTH_JWT_PUBLIC_KEY_PEM: {e}"))?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[&config.auth_jwt_issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Decodes and verifies a session token (signature, expiry, issuer).
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("session token rejected: {e}");
                AppError::Unauthorized
            })
    }
}

/// Extractor for authenticated routes: verifies the `Authorization: Bearer`
/// session token and yields its claims.
pub struct AuthUser(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;
        let claims = state.auth.verify(token)?;

        Ok(AuthUser(claims))
    }
}

/// Extractor guarding internal task endpoints: the caller must present the
/// shared signing key in `x-task-signature`. Compared in constant time.
pub struct TaskTrigger;

#[async_trait]
impl FromRequestParts<AppState> for TaskTrigger {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let provided = parts
            .headers
            .get(TASK_SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        if signature_matches(provided, &state.config.task_signing_key) {
            Ok(TaskTrigger)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

fn signature_matches(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    provided.len() == expected.len() && bool::from(provided.ct_eq(expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_matches_equal_keys() {
        assert!(signature_matches("sweep-key-123", "sweep-key-123"));
    }

    #[test]
    fn test_signature_rejects_wrong_key() {
        assert!(!signature_matches("sweep-key-124", "sweep-key-123"));
    }

    #[test]
    fn test_signature_rejects_different_length() {
        assert!(!signature_matches("short", "sweep-key-123"));
    }

    #[test]
    fn test_session_claims_optional_profile_fields() {
        let json = r#"{
            "sub": "ext_123",
            "email": "dev@example.com",
            "iss": "https://auth.example.com",
            "iat": 1700000000,
            "exp": 1700000900
        }"#;
        let claims: SessionClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "ext_123");
        assert!(claims.name.is_none());
        assert!(claims.avatar_url.is_none());
    }

    #[test]
    fn test_session_claims_picture_maps_to_avatar_url() {
        let json = r#"{
            "sub": "ext_123",
            "email": "dev@example.com",
            "name": "Dev",
            "picture": "https://cdn.example.com/a.png",
            "iss": "https://auth.example.com",
            "iat": 1700000000,
            "exp": 1700000900
        }"#;
        let claims: SessionClaims = serde_json::from_str(json).unwrap();
        assert_eq!(
            claims.avatar_url.as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }
}
