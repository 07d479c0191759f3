use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::insights::store::{get_by_industry, upsert_insight};
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::users::resolver::ensure_user;

/// GET /api/v1/users/me
pub async fn handle_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<UserRow>, AppError> {
    let user = ensure_user(&state.db, &claims).await?;
    Ok(Json(user))
}

#[derive(Debug, Serialize)]
pub struct OnboardingStatus {
    pub is_onboarded: bool,
}

/// GET /api/v1/users/onboarding-status
pub async fn handle_onboarding_status(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<OnboardingStatus>, AppError> {
    let user = ensure_user(&state.db, &claims).await?;
    Ok(Json(OnboardingStatus {
        is_onboarded: user.industry.is_some(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub industry: String,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// PUT /api/v1/users/profile
///
/// Onboarding/profile update. If the chosen industry has no insight row yet
/// it is seeded first (one generation call), then the seed-upsert and the
/// user update run in a single transaction. The generation call stays
/// outside the transaction so a slow provider never holds a DB connection.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserRow>, AppError> {
    let user = ensure_user(&state.db, &claims).await?;

    let industry = normalize_industry(&req.industry);
    if industry.is_empty() {
        return Err(AppError::Validation("industry must not be empty".to_string()));
    }

    let seed = match get_by_industry(&state.db, &industry).await? {
        Some(_) => None,
        None => {
            info!("seeding insight for new industry {industry}");
            Some(state.insight_generator.generate(&industry).await?)
        }
    };

    let mut tx = state.db.begin().await?;

    if let Some(payload) = &seed {
        upsert_insight(&mut *tx, &industry, payload).await?;
    }

    let updated: UserRow = sqlx::query_as(
        r#"
        UPDATE users
        SET industry = $1, bio = $2, experience_years = $3, skills = $4, updated_at = now()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(&industry)
    .bind(&req.bio)
    .bind(req.experience_years)
    .bind(&req.skills)
    .bind(user.id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Json(updated))
}

/// Normalizes a user-supplied industry name into the canonical key the
/// insight workflow expects: lowercase, whitespace runs collapsed to single
/// hyphens.
fn normalize_industry(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
