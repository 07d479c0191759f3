use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails with a named error if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    /// PEM-encoded Ed25519 public key of the external identity provider,
    /// used to verify session JWTs. We never issue tokens ourselves.
    pub auth_jwt_public_key_pem: String,
    pub auth_jwt_issuer: String,
    /// Shared secret presented by the external task platform when it
    /// triggers the insight refresh sweep.
    pub task_signing_key: String,
    pub port: u16,
    pub rust_log: String,
    /// When set, the scheduled sweep refreshes only rows whose next_update
    /// has passed. Default is the full sweep: every industry, every tick.
    pub refresh_only_stale: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            auth_jwt_public_key_pem: require_env("AUTH_JWT_PUBLIC_KEY_PEM")?,
            auth_jwt_issuer: require_env("AUTH_JWT_ISSUER")?,
            task_signing_key: require_env("TASK_SIGNING_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            refresh_only_stale: env_flag("REFRESH_ONLY_STALE"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_flag(key: &str) -> bool {
    matches!(
        std::env::var(key).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}
