//! Insight generation — one prompt, one strictly-validated JSON reply.
//!
//! `generate_insight` performs no storage I/O; persistence lives in
//! `store` so this step stays testable without a database.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::insights::prompts::insight_prompt;
use crate::llm_client::LlmClient;
use crate::models::insight::InsightPayload;

/// Produces the market-data record for one industry.
///
/// `industry` must be non-empty and already normalized — normalization is
/// the caller's job. A reply that fails to parse, misses a key, or carries
/// an out-of-enum value fails the whole call; there is no partial recovery
/// and no defaulting.
pub async fn generate_insight(llm: &LlmClient, industry: &str) -> Result<InsightPayload, AppError> {
    let prompt = insight_prompt(industry);
    llm.call_json::<InsightPayload>(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("insight generation for '{industry}' failed: {e}")))
}

/// The generation seam. Carried in `AppState` as `Arc<dyn InsightGenerator>`
/// so the sweep's failure isolation is testable with a stub backend.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, industry: &str) -> Result<InsightPayload, AppError>;
}

/// Production backend: one Gemini call per industry.
pub struct LlmInsightGenerator {
    llm: LlmClient,
}

impl LlmInsightGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl InsightGenerator for LlmInsightGenerator {
    async fn generate(&self, industry: &str) -> Result<InsightPayload, AppError> {
        generate_insight(&self.llm, industry).await
    }
}

#[cfg(test)]
mod tests {
    use crate::llm_client::strip_json_fences;
    use crate::models::insight::{DemandLevel, InsightPayload, MarketOutlook};

    const WELL_FORMED_REPLY: &str = r#"{
        "salaryRanges": [
            {"role": "Backend Engineer", "min": 90000, "max": 180000, "median": 135000},
            {"role": "Data Engineer", "min": 85000, "max": 170000, "median": 128000}
        ],
        "growthRate": 5.5,
        "demandLevel": "HIGH",
        "topSkills": ["Rust", "PostgreSQL", "Kubernetes"],
        "marketOutlook": "POSITIVE",
        "keyTrends": ["AI tooling", "Remote-first hiring"],
        "recommendedSkills": ["Distributed systems", "Observability"]
    }"#;

    #[test]
    fn test_well_formed_reply_fully_populates_payload() {
        let payload: InsightPayload = serde_json::from_str(WELL_FORMED_REPLY).unwrap();
        assert_eq!(payload.salary_ranges.len(), 2);
        assert_eq!(payload.salary_ranges[0].role, "Backend Engineer");
        assert!((payload.growth_rate - 5.5).abs() < f64::EPSILON);
        assert_eq!(payload.demand_level, DemandLevel::High);
        assert_eq!(payload.market_outlook, MarketOutlook::Positive);
        assert_eq!(payload.top_skills.len(), 3);
        assert_eq!(payload.key_trends.len(), 2);
        assert_eq!(payload.recommended_skills.len(), 2);
    }

    #[test]
    fn test_fenced_and_unfenced_replies_parse_identically() {
        let fenced = format!("```json\n{WELL_FORMED_REPLY}\n```");
        let from_fenced: InsightPayload =
            serde_json::from_str(strip_json_fences(&fenced)).unwrap();
        let from_plain: InsightPayload = serde_json::from_str(WELL_FORMED_REPLY).unwrap();
        assert_eq!(from_fenced, from_plain);
    }

    #[test]
    fn test_missing_key_fails_whole_payload() {
        // topSkills absent
        let reply = r#"{
            "salaryRanges": [],
            "growthRate": 2.0,
            "demandLevel": "MEDIUM",
            "marketOutlook": "NEUTRAL",
            "keyTrends": [],
            "recommendedSkills": []
        }"#;
        let result: Result<InsightPayload, _> = serde_json::from_str(reply);
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_enum_demand_level_fails_whole_payload() {
        let reply = r#"{
            "salaryRanges": [],
            "growthRate": 2.0,
            "demandLevel": "VERY_HIGH",
            "topSkills": [],
            "marketOutlook": "NEUTRAL",
            "keyTrends": [],
            "recommendedSkills": []
        }"#;
        let result: Result<InsightPayload, _> = serde_json::from_str(reply);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_arrays_are_accepted() {
        let reply = r#"{
            "salaryRanges": [],
            "growthRate": 0.0,
            "demandLevel": "LOW",
            "topSkills": [],
            "marketOutlook": "NEGATIVE",
            "keyTrends": [],
            "recommendedSkills": []
        }"#;
        let payload: InsightPayload = serde_json::from_str(reply).unwrap();
        assert!(payload.salary_ranges.is_empty());
        assert_eq!(payload.demand_level, DemandLevel::Low);
    }

    #[test]
    fn test_non_json_reply_fails() {
        let reply = "I'm sorry, I can't provide market data right now.";
        let result: Result<InsightPayload, _> = serde_json::from_str(reply);
        assert!(result.is_err());
    }
}
