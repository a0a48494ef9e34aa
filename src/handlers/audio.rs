use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::AppError;
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAudioRequest {
    #[validate(length(min = 1, message = "text cannot be empty"))]
    pub text: String,
    #[validate(length(min = 1, message = "voiceName cannot be empty"))]
    pub voice_name: String,
}

/// Relays a speech-synthesis request to the upstream TTS model. Upstream
/// failures are forwarded with their status and raw body text.
#[tracing::instrument(skip(state, request), fields(voice = %request.voice_name))]
pub async fn generate_audio(
    State(state): State<AppState>,
    Json(request): Json<GenerateAudioRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    let body = state
        .speech_provider
        .synthesize(&request.text, &request.voice_name)
        .await?;
    Ok(Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockSpeechProvider;
    use crate::startup::AppState;
    use serde_json::json;
    use std::sync::Arc;

    fn request() -> GenerateAudioRequest {
        GenerateAudioRequest {
            text: "Welcome to the lesson".to_string(),
            voice_name: "Kore".to_string(),
        }
    }

    #[tokio::test]
    async fn relays_provider_response_unmodified() {
        let provider = Arc::new(
            MockSpeechProvider::new(true)
                .with_response_value(json!({"candidates": [{"content": {}}]})),
        );
        let state = AppState::for_speech_tests(provider.clone());

        let Json(body) = generate_audio(State(state), Json(request()))
            .await
            .expect("Handler failed");

        assert_eq!(body, json!({"candidates": [{"content": {}}]}));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn upstream_failure_is_forwarded_with_status_and_details() {
        let provider =
            Arc::new(MockSpeechProvider::new(true).with_upstream_error(503, "quota exceeded"));
        let state = AppState::for_speech_tests(provider.clone());

        let err = generate_audio(State(state), Json(request()))
            .await
            .expect_err("Expected upstream error");

        match err {
            AppError::Upstream { status, details } => {
                assert_eq!(status, 503);
                assert!(details.contains("quota exceeded"));
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_credential_fails_without_provider_call() {
        let provider = Arc::new(MockSpeechProvider::new(false));
        let state = AppState::for_speech_tests(provider.clone());

        let err = generate_audio(State(state), Json(request()))
            .await
            .expect_err("Expected configuration error");

        assert!(matches!(err, AppError::NotConfigured(_)));
        assert_eq!(provider.call_count(), 0);
    }
}
