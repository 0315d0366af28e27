use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Invalid season '{0}', expected format like 2023-24")]
    InvalidSeason(String),

    #[error("No stats available for {0}")]
    NoStatsAvailable(String),

    #[error("Result set '{0}' missing from response")]
    MissingResultSet(String),

    #[error("Column '{column}' missing from result set '{result_set}'")]
    MissingColumn { result_set: String, column: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl AppError {
    /// Transient failures are safe to retry; everything else is permanent
    /// (bad identifier, unsupported season, malformed response).
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::RateLimited | AppError::Timeout | AppError::HttpError(_) => true,
            AppError::HttpStatus(code) => *code >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_and_server_errors_are_transient() {
        assert!(AppError::RateLimited.is_transient());
        assert!(AppError::Timeout.is_transient());
        assert!(AppError::HttpStatus(503).is_transient());
        assert!(AppError::HttpError("connection reset".to_string()).is_transient());
    }

    #[test]
    fn client_side_errors_are_permanent() {
        assert!(!AppError::HttpStatus(404).is_transient());
        assert!(!AppError::PlayerNotFound("Nobody".to_string()).is_transient());
        assert!(!AppError::InvalidSeason("2023/24".to_string()).is_transient());
        assert!(!AppError::JsonError("eof".to_string()).is_transient());
    }
}
