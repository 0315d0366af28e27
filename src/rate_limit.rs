use crate::config;
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// Provider guidance: stay under ~600 requests per 10 minutes.
const MAX_REQUESTS_PER_WINDOW: u32 = 600;
const WINDOW_MINUTES: i64 = 10;

/// Persisted ledger of requests in the current 10-minute window, shared
/// across runs so back-to-back invocations respect the same budget.
#[derive(Debug, Serialize, Deserialize)]
pub struct RequestLog {
    pub requests_this_window: u32,
    pub window_reset: DateTime<Utc>,
    pub last_request: DateTime<Utc>,
}

impl RequestLog {
    pub fn new() -> Self {
        let now = Utc::now();
        RequestLog {
            requests_this_window: 0,
            window_reset: now + Duration::minutes(WINDOW_MINUTES),
            last_request: now,
        }
    }

    pub fn ledger_path() -> PathBuf {
        let dir = config::app_dir();
        let _ = fs::create_dir_all(&dir);
        dir.join("ratelimit.json")
    }

    pub fn load() -> Result<Self, AppError> {
        Self::load_from(&Self::ledger_path())
    }

    fn load_from(path: &PathBuf) -> Result<Self, AppError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let mut log: RequestLog = serde_json::from_str(&content)
                    .map_err(|e| AppError::JsonError(format!("Failed to parse rate limit ledger: {}", e)))?;
                log.reset_if_elapsed();
                Ok(log)
            }
            Err(_) => Ok(RequestLog::new()),
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize rate limit ledger: {}", e)))?;
        fs::write(Self::ledger_path(), json).map_err(|e| AppError::IoError(e.to_string()))
    }

    fn reset_if_elapsed(&mut self) {
        let now = Utc::now();
        if now > self.window_reset {
            self.requests_this_window = 0;
            self.window_reset = now + Duration::minutes(WINDOW_MINUTES);
        }
    }

    pub fn can_make_request(&mut self) -> bool {
        self.reset_if_elapsed();
        self.requests_this_window < MAX_REQUESTS_PER_WINDOW
    }

    pub fn record_request(&mut self) {
        self.reset_if_elapsed();
        self.requests_this_window += 1;
        self.last_request = Utc::now();
    }

    pub fn remaining(&self) -> u32 {
        MAX_REQUESTS_PER_WINDOW.saturating_sub(self.requests_this_window)
    }

    pub fn display_status(&self) {
        let until_reset = self.window_reset.signed_duration_since(Utc::now());
        let minutes = until_reset.num_minutes().max(0);
        let seconds = (until_reset.num_seconds().max(0)) % 60;

        println!("\n📊 API Usage");
        println!(
            "   Window: {}/{} requests (10 min)",
            self.requests_this_window, MAX_REQUESTS_PER_WINDOW
        );
        println!("   Remaining: {} requests", self.remaining());
        println!("   Window resets in: {}m {}s\n", minutes, seconds);
    }
}

impl Default for RequestLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn fresh_log_has_full_budget() {
        let mut log = RequestLog::new();
        assert!(log.can_make_request());
        assert_eq!(log.remaining(), 600);
    }

    #[test]
    fn records_count_against_the_window() {
        let mut log = RequestLog::new();
        for _ in 0..600 {
            log.record_request();
        }
        assert_eq!(log.remaining(), 0);
        assert!(!log.can_make_request());
    }

    #[test]
    fn elapsed_window_resets_budget() {
        let mut log = RequestLog::new();
        for _ in 0..600 {
            log.record_request();
        }
        log.window_reset = Utc::now() - Duration::seconds(1);
        assert!(log.can_make_request());
        assert_eq!(log.remaining(), 600);
    }

    #[test]
    #[serial]
    fn persists_across_loads() {
        let dir = TempDir::new().unwrap();
        env::set_var("NBA_EVALUATE_DIR", dir.path());

        let mut log = RequestLog::load().unwrap();
        log.record_request();
        log.record_request();
        log.save().unwrap();

        let reloaded = RequestLog::load().unwrap();
        assert_eq!(reloaded.requests_this_window, 2);

        env::remove_var("NBA_EVALUATE_DIR");
    }

    #[test]
    #[serial]
    fn missing_ledger_starts_fresh() {
        let dir = TempDir::new().unwrap();
        env::set_var("NBA_EVALUATE_DIR", dir.path().join("empty"));
        let log = RequestLog::load().unwrap();
        assert_eq!(log.requests_this_window, 0);
        env::remove_var("NBA_EVALUATE_DIR");
    }
}
