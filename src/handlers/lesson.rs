use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::AppError;
use crate::services::prompt::{lesson_instruction, LessonStyle};
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLessonRequest {
    #[validate(length(min = 1, message = "prompt cannot be empty"))]
    pub prompt: String,
    #[validate(length(min = 1, message = "topic cannot be empty"))]
    pub topic: String,
    pub style: LessonStyle,
    #[validate(range(min = 1, message = "chapters must be at least 1"))]
    pub chapters: u32,
    pub age_group: String,
}

/// Relays a lesson-generation request to the upstream text model. The
/// response body (lesson text plus inline quiz JSON) is passed through
/// without parsing.
#[tracing::instrument(skip(state, request), fields(style = %request.style, chapters = request.chapters))]
pub async fn generate_lesson(
    State(state): State<AppState>,
    Json(request): Json<GenerateLessonRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    let instruction = lesson_instruction(
        &request.prompt,
        &request.topic,
        request.style,
        request.chapters,
        &request.age_group,
    );

    let body = state.text_provider.generate(&instruction).await?;
    Ok(Json(body))
}
