//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup via standard `std::env::var`,
//! after `dotenvy` has merged any local `.env` file.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `GEMINI_API_KEY`: API key for the hosted vision model
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,gatehouse=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `GEMINI_MODEL`: Model used by both extraction flows (default: "gemini-2.0-flash")
//! - `GEMINI_BASE_URL`: API root (default: "https://generativelanguage.googleapis.com")
//! - `INFERENCE_TIMEOUT_SECONDS`: HTTP timeout of the inference client (default: 60)
//! - `MAX_BODY_BYTES`: Largest accepted extraction request body (default: 20 MiB)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS origins (default: none)

use serde::Deserialize;
use std::time::Duration;

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// API key sent with every inference call
    pub gemini_api_key: String,

    /// Model identifier, e.g. `gemini-2.0-flash`
    pub gemini_model: String,

    /// Base URL of the Gemini REST API, overridable for tests and proxies
    pub gemini_base_url: String,

    /// Timeout applied by the inference HTTP client
    pub inference_timeout_seconds: u64,

    /// Maximum request body size for extraction endpoints; photos arrive base64-encoded
    pub max_body_bytes: usize,

    /// Origins allowed by CORS in release builds
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required environment variable is missing or
    /// cannot be parsed to the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            gemini_api_key: env_required("GEMINI_API_KEY")?,
            gemini_model: env_or("GEMINI_MODEL", "gemini-2.0-flash".to_string())?,
            gemini_base_url: env_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com".to_string(),
            )?,
            inference_timeout_seconds: env_or("INFERENCE_TIMEOUT_SECONDS", 60)?,
            max_body_bytes: env_or("MAX_BODY_BYTES", 20 * 1024 * 1024)?,
            allowed_origins: parse_list(&std::env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }

    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_seconds)
    }
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
