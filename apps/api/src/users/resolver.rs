//! Session/profile resolver: maps a verified external identity to the local
//! user row, creating it on first sight.

use sqlx::PgPool;

use crate::auth::SessionClaims;
use crate::errors::AppError;
use crate::models::user::UserRow;

/// Returns the local user row for a verified session, creating it if this
/// is the identity's first observed request.
///
/// Concurrent first requests from the same identity may both reach the
/// insert; the unique constraint on `external_id` makes the loser's insert
/// a no-op and the re-select observes the winner's row. No in-process
/// locking — other service instances race through the same path.
pub async fn ensure_user(pool: &PgPool, claims: &SessionClaims) -> Result<UserRow, AppError> {
    if let Some(user) = find_by_external_id(pool, &claims.sub).await? {
        return Ok(user);
    }

    sqlx::query(
        r#"
        INSERT INTO users (external_id, email, name, avatar_url)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (external_id) DO NOTHING
        "#,
    )
    .bind(&claims.sub)
    .bind(&claims.email)
    .bind(&claims.name)
    .bind(&claims.avatar_url)
    .execute(pool)
    .await?;

    find_by_external_id(pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("user row missing after insert")))
}

async fn find_by_external_id(pool: &PgPool, external_id: &str) -> Result<Option<UserRow>, AppError> {
    let user = sqlx::query_as("SELECT * FROM users WHERE external_id = $1")
        .bind(external_id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}
