use lesson_gateway::config::{
    GatewayConfig, GoogleConfig, ModelConfig, SecurityConfig, ServerConfig, SiteConfig,
};
use lesson_gateway::startup::Application;
use secrecy::Secret;
use std::time::Duration;
use wiremock::MockServer;

pub const TEXT_MODEL: &str = "gemini-1.5-flash";
pub const TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

pub struct TestApp {
    pub address: String,
    pub upstream: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the gateway on a random port with a wiremock upstream and a
    /// configured API key.
    pub async fn spawn() -> Self {
        Self::spawn_with_key("test-api-key").await
    }

    /// Spawn with an explicit key; an empty key simulates the missing
    /// credential case.
    pub async fn spawn_with_key(api_key: &str) -> Self {
        let upstream = MockServer::start().await;

        let config = GatewayConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            google: GoogleConfig {
                api_key: Secret::new(api_key.to_string()),
                api_base_url: upstream.uri(),
            },
            models: ModelConfig {
                text_model: TEXT_MODEL.to_string(),
                tts_model: TTS_MODEL.to_string(),
            },
            security: SecurityConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
            site: SiteConfig {
                public_api_url: "http://localhost:8080".to_string(),
                static_dir: "public".to_string(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();

        // Wait for the server to accept connections.
        for _ in 0..20 {
            if let Ok(response) = client.get(format!("{}/health", address)).send().await {
                if response.status().is_success() {
                    break;
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        Self {
            address,
            upstream,
            client,
        }
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }
}
