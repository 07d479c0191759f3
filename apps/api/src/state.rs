use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::AuthVerifier;
use crate::config::Config;
use crate::insights::generate::InsightGenerator;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Pluggable insight generator. Production: `LlmInsightGenerator`;
    /// tests stub it to exercise sweep behavior without a provider.
    pub insight_generator: Arc<dyn InsightGenerator>,
    pub auth: AuthVerifier,
    pub config: Config,
}
