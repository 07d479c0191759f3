use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::cover_letters::prompts::{cover_letter_prompt, CoverLetterContext};
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterRow;
use crate::state::AppState;
use crate::users::resolver::ensure_user;

#[derive(Debug, Deserialize)]
pub struct GenerateCoverLetterRequest {
    pub job_title: String,
    pub company_name: String,
    pub job_description: Option<String>,
}

/// POST /api/v1/cover-letters
pub async fn handle_generate(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<GenerateCoverLetterRequest>,
) -> Result<Json<CoverLetterRow>, AppError> {
    if req.job_title.trim().is_empty() || req.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "job_title and company_name must not be empty".to_string(),
        ));
    }

    let user = ensure_user(&state.db, &claims).await?;

    let industry = user.industry.ok_or_else(|| {
        AppError::Validation("No industry set. Complete onboarding first.".to_string())
    })?;

    let prompt = cover_letter_prompt(&CoverLetterContext {
        job_title: &req.job_title,
        company_name: &req.company_name,
        job_description: req.job_description.as_deref(),
        name: user.name.as_deref(),
        industry: &industry,
        experience_years: user.experience_years,
        skills: &user.skills,
        bio: user.bio.as_deref(),
    });

    let content = state
        .llm
        .call(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("cover letter generation failed: {e}")))?;

    let row: CoverLetterRow = sqlx::query_as(
        r#"
        INSERT INTO cover_letters (user_id, content, job_description, company_name, job_title)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(content.trim())
    .bind(&req.job_description)
    .bind(&req.company_name)
    .bind(&req.job_title)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/cover-letters
pub async fn handle_list(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    let user = ensure_user(&state.db, &claims).await?;

    let rows: Vec<CoverLetterRow> =
        sqlx::query_as("SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(rows))
}

/// GET /api/v1/cover-letters/:id
pub async fn handle_get_one(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CoverLetterRow>, AppError> {
    let user = ensure_user(&state.db, &claims).await?;

    let row: Option<CoverLetterRow> =
        sqlx::query_as("SELECT * FROM cover_letters WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))
}

/// DELETE /api/v1/cover-letters/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let user = ensure_user(&state.db, &claims).await?;

    let result = sqlx::query("DELETE FROM cover_letters WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Cover letter {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
