//! Application startup and lifecycle management.

use crate::config::GatewayConfig;
use crate::error::AppError;
use crate::handlers::{
    audio::generate_audio, health::health_check, lesson::generate_lesson,
    runtime_config::runtime_config, translate::translate_lesson,
};
use crate::middleware::request_id::request_id_middleware;
use crate::services::providers::gemini::{GeminiConfig, GeminiProvider};
use crate::services::providers::{SpeechProvider, TextProvider};
use axum::http::{header, HeaderValue, Method};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub text_provider: Arc<dyn TextProvider>,
    pub speech_provider: Arc<dyn SpeechProvider>,
}

#[cfg(test)]
impl AppState {
    fn test_config() -> GatewayConfig {
        use crate::config::{GoogleConfig, ModelConfig, SecurityConfig, ServerConfig, SiteConfig};
        use secrecy::Secret;

        GatewayConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            google: GoogleConfig {
                api_key: Secret::new("test-api-key".to_string()),
                api_base_url: "http://127.0.0.1:9".to_string(),
            },
            models: ModelConfig {
                text_model: "gemini-1.5-flash".to_string(),
                tts_model: "gemini-2.5-flash-preview-tts".to_string(),
            },
            security: SecurityConfig {
                allowed_origins: Vec::new(),
            },
            site: SiteConfig {
                public_api_url: "http://localhost:8080".to_string(),
                static_dir: "public".to_string(),
            },
        }
    }

    pub fn for_tests(text_provider: Arc<dyn TextProvider>) -> Self {
        use crate::services::providers::mock::MockSpeechProvider;

        Self {
            config: Self::test_config(),
            text_provider,
            speech_provider: Arc::new(MockSpeechProvider::new(true)),
        }
    }

    pub fn for_speech_tests(speech_provider: Arc<dyn SpeechProvider>) -> Self {
        use crate::services::providers::mock::MockTextProvider;

        Self {
            config: Self::test_config(),
            text_provider: Arc::new(MockTextProvider::new(true)),
            speech_provider,
        }
    }
}

/// Builds the gateway router: the three proxy endpoints, health, runtime
/// config injection, and the static client app as the fallback.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.allowed_origins);
    let static_dir = state.config.site.static_dir.clone();

    Router::new()
        .route("/health", get(health_check))
        .route("/config.js", get(runtime_config))
        .route("/api/generate-lesson", post(generate_lesson))
        .route("/api/translate-lesson", post(translate_lesson))
        .route("/api/generate-audio", post(generate_audio))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(
            allowed_origins
                .iter()
                .filter_map(|o| match o.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::error!("Ignoring invalid CORS origin '{}': {}", o, e);
                        None
                    }
                })
                .collect::<Vec<HeaderValue>>(),
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Port 0 binds a random port, which the integration tests rely on.
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let gemini = Arc::new(GeminiProvider::new(GeminiConfig {
            api_key: config.google.api_key.clone(),
            base_url: config.google.api_base_url.clone(),
            text_model: config.models.text_model.clone(),
            tts_model: config.models.tts_model.clone(),
        }));

        tracing::info!(
            text_model = %config.models.text_model,
            tts_model = %config.models.tts_model,
            "Initialized Gemini provider"
        );

        let state = AppState {
            config: config.clone(),
            text_provider: gemini.clone(),
            speech_provider: gemini,
        };

        let address = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}
