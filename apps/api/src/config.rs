use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset, usage counters live in process memory.
    pub redis_url: Option<String>,
    /// When unset, the improvement endpoint is disabled.
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub free_plan_limit: u64,
    pub pro_plan_limit: u64,
    pub usage_window_secs: u64,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            anthropic_api_key: None,
            llm_model: crate::llm_client::DEFAULT_MODEL.to_string(),
            free_plan_limit: 5,
            pro_plan_limit: 100,
            usage_window_secs: 86_400,
            max_upload_bytes: 5 * 1024 * 1024,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            redis_url: optional_env("REDIS_URL"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_model: optional_env("LLM_MODEL").unwrap_or(defaults.llm_model.clone()),
            free_plan_limit: parse_env("FREE_PLAN_LIMIT", defaults.free_plan_limit)?,
            pro_plan_limit: parse_env("PRO_PLAN_LIMIT", defaults.pro_plan_limit)?,
            usage_window_secs: parse_env("USAGE_WINDOW_SECS", defaults.usage_window_secs)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
