//! Structured error types for the dispatch core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("config: {field}: {reason}")]
    Config { field: String, reason: String },

    #[error("hour of day must be in 0..=23, got {0}")]
    InvalidHour(u32),

    #[error("session io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn config(field: &str, reason: &str) -> Self {
        Self::Config {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
