use crate::error::AppError;
use std::env;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "https://stats.nba.com/stats";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub cache_ttl_hours: u64,
    pub request_timeout_secs: u64,
    pub request_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("NBA_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let cache_ttl_hours = parse_var("NBA_CACHE_TTL_HOURS", 6)?;
        let request_timeout_secs = parse_var("NBA_REQUEST_TIMEOUT_SECS", 30)?;
        // Provider guidance: ~0.6s between sequential requests
        let request_delay_ms = parse_var("NBA_REQUEST_DELAY_MS", 600)?;

        Ok(Config {
            base_url,
            cache_ttl_hours,
            request_timeout_secs,
            request_delay_ms,
        })
    }
}

/// App home for the response cache and the rate-limit ledger.
/// NBA_EVALUATE_DIR overrides the default ~/.nba_evaluate.
pub fn app_dir() -> PathBuf {
    if let Ok(dir) = env::var("NBA_EVALUATE_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nba_evaluate")
}

fn parse_var(name: &str, default: u64) -> Result<u64, AppError> {
    match env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|_| AppError::ConfigError(format!("{} must be a number, got '{}'", name, value))),
        Err(_) => Ok(default),
    }
}
