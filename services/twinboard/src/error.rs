//! Error types for the twinboard service

/// Errors that can occur in the twinboard service
#[derive(Debug, thiserror::Error)]
pub enum TwinboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Twin query failed: {0}")]
    Query(String),

    #[error("Dashboard error: {0}")]
    Dashboard(String),
}

/// Result type alias for twinboard operations
pub type Result<T> = std::result::Result<T, TwinboardError>;
