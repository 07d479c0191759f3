use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resumes::prompts::improve_prompt;
use crate::state::AppState;
use crate::users::resolver::ensure_user;

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ResumeRow>, AppError> {
    let user = ensure_user(&state.db, &claims).await?;

    let resume: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1")
        .bind(user.id)
        .fetch_optional(&state.db)
        .await?;

    resume
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No resume saved yet".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub content: String,
}

/// PUT /api/v1/resume
///
/// Wholesale save. Keyed on the unique `user_id` so repeated saves replace
/// the single row instead of accumulating versions.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<SaveResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::Validation("resume content must not be empty".to_string()));
    }

    let user = ensure_user(&state.db, &claims).await?;

    let row: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (user_id, content)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE SET
            content = EXCLUDED.content,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&req.content)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    /// Which part of the resume is being rewritten, e.g. "experience".
    pub section: String,
    pub current: String,
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub improved: String,
}

/// POST /api/v1/resume/improve
///
/// Rewrites one section with the LLM and returns the result. Stores
/// nothing — the client decides whether to keep the rewrite.
pub async fn handle_improve(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let user = ensure_user(&state.db, &claims).await?;

    let industry = user.industry.ok_or_else(|| {
        AppError::Validation("No industry set. Complete onboarding first.".to_string())
    })?;

    let prompt = improve_prompt(&req.section, &industry, &req.current);
    let improved = state
        .llm
        .call(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("resume improvement failed: {e}")))?;

    Ok(Json(ImproveResponse {
        improved: improved.trim().to_string(),
    }))
}
