use axum::{extract::State, Json};

use crate::auth::{AuthUser, TaskTrigger};
use crate::errors::AppError;
use crate::insights::{store, sweep};
use crate::models::insight::IndustryInsightRow;
use crate::state::AppState;
use crate::users::resolver::ensure_user;

/// GET /api/v1/insights
///
/// The authenticated user's industry insight. If the user picked an industry
/// no one has seeded yet, this is the on-demand creation path: generate once
/// and upsert, so a concurrent identical request updates instead of
/// duplicating.
pub async fn handle_get_insights(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<IndustryInsightRow>, AppError> {
    let user = ensure_user(&state.db, &claims).await?;

    let industry = user.industry.ok_or_else(|| {
        AppError::Validation("No industry set. Complete onboarding first.".to_string())
    })?;

    if let Some(row) = store::get_by_industry(&state.db, &industry).await? {
        return Ok(Json(row));
    }

    let payload = state.insight_generator.generate(&industry).await?;
    let row = store::upsert_insight(&state.db, &industry, &payload).await?;
    Ok(Json(row))
}

/// POST /internal/tasks/refresh-insights
///
/// Invoked by the external task platform on its schedule. Responds 200 with
/// the sweep report even when individual industries failed — per-industry
/// failures are the report's content, not a request failure.
pub async fn handle_refresh_insights(
    State(state): State<AppState>,
    _trigger: TaskTrigger,
) -> Result<Json<sweep::SweepReport>, AppError> {
    let report = sweep::refresh_all_insights(
        &state.db,
        state.insight_generator.as_ref(),
        state.config.refresh_only_stale,
    )
    .await?;
    Ok(Json(report))
}
