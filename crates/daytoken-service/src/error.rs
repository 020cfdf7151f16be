//! Error types for the DayToken service

use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur in the service layer
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] daytoken_core::DayTokenError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The ticker task ended before shutdown completed
    #[error("Ticker task failed: {0}")]
    TickerTask(String),
}
