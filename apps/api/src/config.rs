use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Both provider credentials are optional: without them the matching feature
/// reports an error per request instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub data_dir: String,
    pub resend_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    /// Base URL the dispatcher uses to reach `/api/send-resume`.
    pub relay_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        Ok(Config {
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            resend_api_key: optional_env("RESEND_API_KEY"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            relay_url: optional_env("RELAY_URL")
                .unwrap_or_else(|| format!("http://127.0.0.1:{port}")),
        })
    }
}

/// Unset and blank variables both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
