pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::cover_letters::handlers as cover_letters;
use crate::insights::handlers as insights;
use crate::interview::handlers as interview;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users & onboarding
        .route("/api/v1/users/me", get(users::handle_me))
        .route(
            "/api/v1/users/onboarding-status",
            get(users::handle_onboarding_status),
        )
        .route("/api/v1/users/profile", put(users::handle_update_profile))
        // Industry insights
        .route("/api/v1/insights", get(insights::handle_get_insights))
        // Interview prep
        .route("/api/v1/interview/quiz", post(interview::handle_generate_quiz))
        .route(
            "/api/v1/interview/assessments",
            get(interview::handle_list_assessments).post(interview::handle_save_assessment),
        )
        // Resume
        .route(
            "/api/v1/resume",
            get(resumes::handle_get_resume).put(resumes::handle_save_resume),
        )
        .route("/api/v1/resume/improve", post(resumes::handle_improve))
        // Cover letters
        .route(
            "/api/v1/cover-letters",
            get(cover_letters::handle_list).post(cover_letters::handle_generate),
        )
        .route(
            "/api/v1/cover-letters/:id",
            get(cover_letters::handle_get_one).delete(cover_letters::handle_delete),
        )
        // Task platform trigger (signing-key guarded, not user auth)
        .route(
            "/internal/tasks/refresh-insights",
            post(insights::handle_refresh_insights),
        )
        .with_state(state)
}
