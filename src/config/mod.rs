use crate::error::AppError;
use secrecy::Secret;
use serde::Deserialize;
use std::env;

/// Default base URL for the Gemini API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub security: SecurityConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Secret<String>,
    /// Base URL for the Gemini API. Overridable so tests can point the
    /// provider at a local mock server.
    pub api_base_url: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model for lesson generation and translation (e.g., gemini-1.5-flash).
    pub text_model: String,
    /// TTS-capable model for audio synthesis.
    pub tts_model: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Origins allowed to call the gateway from a browser.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Public URL of this gateway, exposed to the browser via /config.js.
    pub public_api_url: String,
    /// Directory the client application is served from.
    pub static_dir: String,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let server: ServerConfig = config::Config::builder()
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(GatewayConfig {
            server,
            google: GoogleConfig {
                // A missing key is surfaced as a per-request configuration
                // error, not a startup failure.
                api_key: Secret::new(env::var("GEMINI_API_KEY").unwrap_or_default()),
                api_base_url: get_env("GEMINI_API_BASE_URL", Some(GEMINI_API_BASE), is_prod)?,
            },
            models: ModelConfig {
                text_model: get_env("GATEWAY_TEXT_MODEL", Some("gemini-1.5-flash"), is_prod)?,
                tts_model: get_env(
                    "GATEWAY_TTS_MODEL",
                    Some("gemini-2.5-flash-preview-tts"),
                    is_prod,
                )?,
            },
            security: SecurityConfig {
                allowed_origins: env::var("GATEWAY_ALLOWED_ORIGINS")
                    .unwrap_or_default()
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect(),
            },
            site: SiteConfig {
                public_api_url: env::var("API_URL").unwrap_or_default(),
                static_dir: get_env("GATEWAY_STATIC_DIR", Some("public"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
