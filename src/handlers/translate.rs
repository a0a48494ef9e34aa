use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::AppError;
use crate::services::prompt::translation_instruction;
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TranslateLessonRequest {
    #[validate(length(min = 1, message = "text cannot be empty"))]
    pub text: String,
    #[validate(length(min = 1, message = "targetLanguage cannot be empty"))]
    pub target_language: String,
}

#[tracing::instrument(skip(state, request), fields(target_language = %request.target_language))]
pub async fn translate_lesson(
    State(state): State<AppState>,
    Json(request): Json<TranslateLessonRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    let instruction = translation_instruction(&request.text, &request.target_language);

    let body = state.text_provider.generate(&instruction).await?;
    Ok(Json(body))
}
