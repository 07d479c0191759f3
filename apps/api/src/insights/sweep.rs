//! Scheduled refresh sweep over all stored industries.
//!
//! Each industry is an independent unit of work: a generation or storage
//! failure for one is logged and collected, and the remaining industries
//! still process. No ordering is guaranteed across industries.

use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::insights::generate::InsightGenerator;
use crate::insights::store;
use crate::models::insight::InsightPayload;

/// Outcome of one sweep run, returned to the task platform.
#[derive(Debug, Default, Serialize)]
pub struct SweepReport {
    pub refreshed: Vec<String>,
    pub failed: Vec<SweepFailure>,
}

#[derive(Debug, Serialize)]
pub struct SweepFailure {
    pub industry: String,
    pub error: String,
}

/// Refreshes every stored industry (or only stale ones, per config):
/// generate, then upsert with fresh timestamps. A failed industry keeps its
/// prior row untouched.
pub async fn refresh_all_insights(
    pool: &PgPool,
    generator: &dyn InsightGenerator,
    only_stale: bool,
) -> Result<SweepReport, AppError> {
    let industries = store::list_industries(pool, only_stale).await?;
    info!("insight sweep starting over {} industries", industries.len());

    let (generated, mut failed) = generate_for(generator, &industries).await;

    let mut refreshed = Vec::with_capacity(generated.len());
    for (industry, payload) in generated {
        match store::upsert_insight(pool, &industry, &payload).await {
            Ok(_) => refreshed.push(industry),
            Err(e) => {
                warn!("insight upsert failed for {industry}: {e}");
                failed.push(SweepFailure {
                    industry,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "insight sweep finished: {} refreshed, {} failed",
        refreshed.len(),
        failed.len()
    );
    Ok(SweepReport { refreshed, failed })
}

/// Generation phase of the sweep. Failures are collected per industry, not
/// propagated, so one bad reply never aborts the run.
async fn generate_for(
    generator: &dyn InsightGenerator,
    industries: &[String],
) -> (Vec<(String, InsightPayload)>, Vec<SweepFailure>) {
    let mut generated = Vec::new();
    let mut failed = Vec::new();

    for industry in industries {
        match generator.generate(industry).await {
            Ok(payload) => generated.push((industry.clone(), payload)),
            Err(e) => {
                warn!("insight generation failed for {industry}: {e}");
                failed.push(SweepFailure {
                    industry: industry.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    (generated, failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::insight::{DemandLevel, MarketOutlook, SalaryRange};
    use async_trait::async_trait;

    fn sample_payload(growth_rate: f64) -> InsightPayload {
        InsightPayload {
            salary_ranges: vec![SalaryRange {
                role: "Engineer".to_string(),
                min: 80000.0,
                max: 160000.0,
                median: 120000.0,
            }],
            growth_rate,
            demand_level: DemandLevel::High,
            top_skills: vec!["Rust".to_string()],
            market_outlook: MarketOutlook::Positive,
            key_trends: vec!["AI tooling".to_string()],
            recommended_skills: vec!["SQL".to_string()],
        }
    }

    /// Stub backend that fails for one configured industry.
    struct FlakyGenerator {
        failing_industry: String,
    }

    #[async_trait]
    impl InsightGenerator for FlakyGenerator {
        async fn generate(&self, industry: &str) -> Result<InsightPayload, AppError> {
            if industry == self.failing_industry {
                Err(AppError::Llm(format!(
                    "insight generation for '{industry}' failed: simulated provider error"
                )))
            } else {
                Ok(sample_payload(3.0))
            }
        }
    }

    #[tokio::test]
    async fn test_one_failing_industry_does_not_abort_the_rest() {
        let generator = FlakyGenerator {
            failing_industry: "finance".to_string(),
        };
        let industries = vec![
            "energy".to_string(),
            "finance".to_string(),
            "healthcare".to_string(),
        ];

        let (generated, failed) = generate_for(&generator, &industries).await;

        let ok_industries: Vec<&str> = generated.iter().map(|(i, _)| i.as_str()).collect();
        assert_eq!(ok_industries, vec!["energy", "healthcare"]);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].industry, "finance");
        assert!(failed[0].error.contains("simulated provider error"));
    }

    #[tokio::test]
    async fn test_all_industries_succeed() {
        let generator = FlakyGenerator {
            failing_industry: String::new(),
        };
        let industries = vec!["energy".to_string(), "healthcare".to_string()];

        let (generated, failed) = generate_for(&generator, &industries).await;

        assert_eq!(generated.len(), 2);
        assert!(failed.is_empty());
    }

    #[tokio::test]
    async fn test_empty_industry_list_yields_empty_report() {
        let generator = FlakyGenerator {
            failing_industry: String::new(),
        };

        let (generated, failed) = generate_for(&generator, &[]).await;

        assert!(generated.is_empty());
        assert!(failed.is_empty());
    }
}
