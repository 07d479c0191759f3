use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Hiring demand for an industry. Closed set — an out-of-set value from the
/// model is a deserialization error, never coerced to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "demand_level", rename_all = "UPPERCASE")]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

/// Overall market direction for an industry. Closed set, same contract as
/// `DemandLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "market_outlook", rename_all = "UPPERCASE")]
pub enum MarketOutlook {
    Positive,
    Neutral,
    Negative,
}

/// One salary band within an industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// The full market-data record the model must return for one industry.
///
/// Every field is required: a reply missing any key fails deserialization as
/// a whole, so a malformed model reply can never produce a partially-shaped
/// record. Arrays may be empty but must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPayload {
    pub salary_ranges: Vec<SalaryRange>,
    /// Percent, e.g. 5.5 for 5.5% projected growth.
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
}

/// One stored row of industry market data. Unique per industry name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IndustryInsightRow {
    pub id: Uuid,
    pub industry: String,
    pub salary_ranges: Json<Vec<SalaryRange>>,
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demand_level_serde_uppercase() {
        let level: DemandLevel = serde_json::from_str(r#""HIGH""#).unwrap();
        assert_eq!(level, DemandLevel::High);
        assert_eq!(serde_json::to_string(&level).unwrap(), r#""HIGH""#);
    }

    #[test]
    fn test_demand_level_rejects_out_of_set_value() {
        let result: Result<DemandLevel, _> = serde_json::from_str(r#""VERY_HIGH""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_market_outlook_serde_uppercase() {
        let outlook: MarketOutlook = serde_json::from_str(r#""NEGATIVE""#).unwrap();
        assert_eq!(outlook, MarketOutlook::Negative);
        assert_eq!(serde_json::to_string(&outlook).unwrap(), r#""NEGATIVE""#);
    }

    #[test]
    fn test_market_outlook_rejects_lowercase() {
        let result: Result<MarketOutlook, _> = serde_json::from_str(r#""positive""#);
        assert!(result.is_err());
    }
}
