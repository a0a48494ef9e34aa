use axum::{extract::State, http::header, response::IntoResponse};

use crate::startup::AppState;

/// Emits a small script exposing the gateway's public URL to the browser
/// at runtime. The value is not a secret; it only tells the client where
/// to send API calls.
pub async fn runtime_config(State(state): State<AppState>) -> impl IntoResponse {
    let body = format!(
        "window.ENV = {{\n  API_URL: \"{}\"\n}};\n",
        state.config.site.public_api_url
    );

    ([(header::CONTENT_TYPE, "application/javascript")], body)
}
