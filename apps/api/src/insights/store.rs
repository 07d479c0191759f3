//! Insight persistence. One row per industry, keyed by the unique industry
//! name; all writes go through a single upsert so concurrent creations for
//! the same industry cannot duplicate rows.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::insight::{IndustryInsightRow, InsightPayload};

/// Fixed refresh cadence. `next_update` is set this far past `last_updated`
/// on every write.
pub const REFRESH_INTERVAL_DAYS: i32 = 7;

/// Creates or replaces the insight row for `industry` and resets both
/// timestamps. The ON CONFLICT arm makes the second of two racing creations
/// an in-place update.
pub async fn upsert_insight<'e, E>(
    db: E,
    industry: &str,
    payload: &InsightPayload,
) -> Result<IndustryInsightRow, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as(
        r#"
        INSERT INTO industry_insights
            (industry, salary_ranges, growth_rate, demand_level, top_skills,
             market_outlook, key_trends, recommended_skills, last_updated, next_update)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now(), now() + make_interval(days => $9))
        ON CONFLICT (industry) DO UPDATE SET
            salary_ranges = EXCLUDED.salary_ranges,
            growth_rate = EXCLUDED.growth_rate,
            demand_level = EXCLUDED.demand_level,
            top_skills = EXCLUDED.top_skills,
            market_outlook = EXCLUDED.market_outlook,
            key_trends = EXCLUDED.key_trends,
            recommended_skills = EXCLUDED.recommended_skills,
            last_updated = EXCLUDED.last_updated,
            next_update = EXCLUDED.next_update
        RETURNING *
        "#,
    )
    .bind(industry)
    .bind(Json(&payload.salary_ranges))
    .bind(payload.growth_rate)
    .bind(payload.demand_level)
    .bind(&payload.top_skills)
    .bind(payload.market_outlook)
    .bind(&payload.key_trends)
    .bind(&payload.recommended_skills)
    .bind(REFRESH_INTERVAL_DAYS)
    .fetch_one(db)
    .await
}

pub async fn get_by_industry<'e, E>(
    db: E,
    industry: &str,
) -> Result<Option<IndustryInsightRow>, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as("SELECT * FROM industry_insights WHERE industry = $1")
        .bind(industry)
        .fetch_optional(db)
        .await
}

/// Industries with a stored insight row. With `only_stale` the list narrows
/// to rows whose `next_update` has passed; the default sweep takes all of
/// them regardless of staleness.
pub async fn list_industries(pool: &PgPool, only_stale: bool) -> Result<Vec<String>, sqlx::Error> {
    let query = if only_stale {
        "SELECT industry FROM industry_insights WHERE next_update <= now() ORDER BY industry"
    } else {
        "SELECT industry FROM industry_insights ORDER BY industry"
    };
    sqlx::query_scalar(query).fetch_all(pool).await
}
