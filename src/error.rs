//! Error types for session setup
//!
//! Everything that can fail does so before the frame loop starts. Once a
//! session is running, out-of-range values are clamped instead of reported.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal setup errors
#[derive(Debug, Error)]
pub enum Error {
    /// A sprite or overlay image the renderer needs was not provided
    #[error("missing asset `{0}`")]
    MissingAsset(String),

    /// Level grid is empty or not rectangular
    #[error("invalid level: {0}")]
    InvalidLevel(String),

    /// Configuration value out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration or level JSON could not be parsed
    #[error("failed to parse json")]
    Json(#[from] serde_json::Error),
}
