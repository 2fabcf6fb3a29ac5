use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a default; the service starts with no environment at all
/// and falls back to static question banks when no credential is set.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Hosted inference credential. Absent or empty means offline mode.
    pub hf_api_token: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:candidates.db".to_string()),
            hf_api_token: std::env::var("HF_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
