use anyhow::{Context, Result};

use crate::dispatch::ModelSelector;

const DEFAULT_PRIMARY_MODEL: &str = "gemini-2.5-pro";
const DEFAULT_FALLBACK_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub primary_model: String,
    pub fallback_model: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            gemini_api_key: require("GEMINI_API_KEY")?,
            gemini_api_base: or_default("GEMINI_API_BASE", DEFAULT_API_BASE),
            primary_model: or_default("MODEL_PRIMARY", DEFAULT_PRIMARY_MODEL),
            fallback_model: or_default("MODEL_FALLBACK", DEFAULT_FALLBACK_MODEL),
            llm_timeout_secs: or_default("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: or_default("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }

    /// The fixed tier order shared by every flow: primary first, fallback second.
    pub fn model_selector(&self) -> Result<ModelSelector> {
        ModelSelector::new([self.primary_model.clone(), self.fallback_model.clone()])
            .context("MODEL_PRIMARY and MODEL_FALLBACK must be non-empty model identifiers")
    }
}
