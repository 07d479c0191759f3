use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as SqlJson;
use tracing::warn;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::interview::prompts::{improvement_tip_prompt, quiz_prompt};
use crate::models::assessment::{AssessmentRow, QuestionResult};
use crate::state::AppState;
use crate::users::resolver::ensure_user;

/// A generated quiz question as returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct QuizPayload {
    pub questions: Vec<QuizQuestion>,
}

/// POST /api/v1/interview/quiz
///
/// Generates a quiz for the user's industry and skills. Same fail-closed
/// contract as insight generation: a malformed reply fails the call.
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<QuizQuestion>>, AppError> {
    let user = ensure_user(&state.db, &claims).await?;

    let industry = user.industry.ok_or_else(|| {
        AppError::Validation("No industry set. Complete onboarding first.".to_string())
    })?;

    let prompt = quiz_prompt(&industry, &user.skills);
    let payload: QuizPayload = state
        .llm
        .call_json(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("quiz generation failed: {e}")))?;

    Ok(Json(payload.questions))
}

#[derive(Debug, Deserialize)]
pub struct SaveAssessmentRequest {
    pub results: Vec<QuestionResult>,
    pub score: f64,
}

/// POST /api/v1/interview/assessments
///
/// Stores a completed quiz. If any answers were wrong, one extra LLM call
/// produces an improvement tip; a failed tip call degrades to no tip rather
/// than failing the save.
pub async fn handle_save_assessment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<SaveAssessmentRequest>,
) -> Result<Json<AssessmentRow>, AppError> {
    let user = ensure_user(&state.db, &claims).await?;

    let industry = user.industry.ok_or_else(|| {
        AppError::Validation("No industry set. Complete onboarding first.".to_string())
    })?;

    let improvement_tip = match mistakes_text(&req.results) {
        Some(mistakes) => {
            let prompt = improvement_tip_prompt(&industry, &mistakes);
            match state.llm.call(&prompt).await {
                Ok(tip) => Some(tip.trim().to_string()),
                Err(e) => {
                    warn!("improvement tip generation failed: {e}");
                    None
                }
            }
        }
        None => None,
    };

    let row: AssessmentRow = sqlx::query_as(
        r#"
        INSERT INTO assessments (user_id, quiz_score, questions, category, improvement_tip)
        VALUES ($1, $2, $3, 'Technical', $4)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(req.score)
    .bind(SqlJson(&req.results))
    .bind(&improvement_tip)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/interview/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    let user = ensure_user(&state.db, &claims).await?;

    let rows: Vec<AssessmentRow> =
        sqlx::query_as("SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at ASC")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(rows))
}

/// Renders the wrong answers into the tip prompt's mistakes block.
/// Returns None when every answer was correct.
fn mistakes_text(results: &[QuestionResult]) -> Option<String> {
    let wrong: Vec<String> = results
        .iter()
        .filter(|r| !r.is_correct)
        .map(|r| {
            format!(
                "Question: \"{}\"\nCorrect Answer: \"{}\"\nUser Answer: \"{}\"",
                r.question, r.answer, r.user_answer
            )
        })
        .collect();

    if wrong.is_empty() {
        None
    } else {
        Some(wrong.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(question: &str, correct: bool) -> QuestionResult {
        QuestionResult {
            question: question.to_string(),
            answer: "right".to_string(),
            user_answer: if correct { "right" } else { "wrong" }.to_string(),
            is_correct: correct,
        }
    }

    #[test]
    fn test_quiz_payload_deserializes_camel_case() {
        let json = r#"{
            "questions": [
                {
                    "question": "Which keyword declares an immutable binding in Rust?",
                    "options": ["let", "mut", "const fn", "static mut"],
                    "correctAnswer": "let",
                    "explanation": "let bindings are immutable by default."
                }
            ]
        }"#;
        let payload: QuizPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.questions.len(), 1);
        assert_eq!(payload.questions[0].correct_answer, "let");
        assert_eq!(payload.questions[0].options.len(), 4);
    }

    #[test]
    fn test_quiz_payload_missing_correct_answer_fails() {
        let json = r#"{
            "questions": [
                {
                    "question": "q",
                    "options": ["a", "b", "c", "d"],
                    "explanation": "e"
                }
            ]
        }"#;
        let result: Result<QuizPayload, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_mistakes_text_none_when_all_correct() {
        let results = vec![result("q1", true), result("q2", true)];
        assert!(mistakes_text(&results).is_none());
    }

    #[test]
    fn test_mistakes_text_lists_only_wrong_answers() {
        let results = vec![result("q1", true), result("q2", false), result("q3", false)];
        let text = mistakes_text(&results).unwrap();
        assert!(!text.contains("q1"));
        assert!(text.contains("q2"));
        assert!(text.contains("q3"));
    }
}
