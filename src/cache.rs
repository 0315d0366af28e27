use crate::config;
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// One cached endpoint response on disk.
#[derive(Debug, Serialize, Deserialize)]
struct CachedResponse {
    key: String,
    cached_at: DateTime<Utc>,
    payload: Value,
}

/// Disk cache for endpoint responses, one JSON file per key. The provider's
/// data changes infrequently, so reads go cache-first within the TTL.
#[derive(Debug)]
pub struct ResponseCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(dir: PathBuf, ttl_hours: u64) -> Self {
        ResponseCache {
            dir,
            ttl: Duration::hours(ttl_hours as i64),
        }
    }

    pub fn open(ttl_hours: u64) -> Self {
        Self::new(config::app_dir().join("cache"), ttl_hours)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let sanitized: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", sanitized))
    }

    /// Expired, missing, and corrupt entries all read as a miss.
    pub fn get(&self, key: &str) -> Option<Value> {
        let content = fs::read_to_string(self.entry_path(key)).ok()?;
        let entry: CachedResponse = serde_json::from_str(&content).ok()?;
        if Utc::now().signed_duration_since(entry.cached_at) > self.ttl {
            return None;
        }
        Some(entry.payload)
    }

    pub fn put(&self, key: &str, payload: &Value) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).map_err(|e| AppError::IoError(e.to_string()))?;
        let entry = CachedResponse {
            key: key.to_string(),
            cached_at: Utc::now(),
            payload: payload.clone(),
        };
        let json = serde_json::to_string(&entry).map_err(|e| AppError::JsonError(e.to_string()))?;
        fs::write(self.entry_path(key), json).map_err(|e| AppError::IoError(e.to_string()))
    }

    /// Drop every entry; returns how many files were removed.
    pub fn clear(&self) -> Result<usize, AppError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(0),
        };
        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path).map_err(|e| AppError::IoError(e.to_string()))?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn round_trip() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), 6);
        let payload = json!({"resultSets": []});

        assert!(cache.get("playercareerstats_PlayerID_2544").is_none());
        cache.put("playercareerstats_PlayerID_2544", &payload).unwrap();
        assert_eq!(cache.get("playercareerstats_PlayerID_2544"), Some(payload));
    }

    #[test]
    fn keys_with_punctuation_map_to_distinct_files() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), 6);
        cache.put("a?Season=2023-24", &json!(1)).unwrap();
        cache.put("a?Season=2022-23", &json!(2)).unwrap();
        assert_eq!(cache.get("a?Season=2023-24"), Some(json!(1)));
        assert_eq!(cache.get("a?Season=2022-23"), Some(json!(2)));
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), 0);
        cache.put("stale", &json!(true)).unwrap();
        assert!(cache.get("stale").is_none());
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), 6);
        cache.put("ok", &json!(1)).unwrap();
        fs::write(cache.entry_path("ok"), "not json").unwrap();
        assert!(cache.get("ok").is_none());
    }

    #[test]
    fn clear_removes_entries() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), 6);
        cache.put("one", &json!(1)).unwrap();
        cache.put("two", &json!(2)).unwrap();
        assert_eq!(cache.clear().unwrap(), 2);
        assert!(cache.get("one").is_none());
    }

    #[test]
    fn clear_on_missing_dir_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().join("never_created"), 6);
        assert_eq!(cache.clear().unwrap(), 0);
    }
}
