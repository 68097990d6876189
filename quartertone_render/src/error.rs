// Errors from configuring and writing rendered scales.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed render config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid render config: {0}")]
    InvalidConfig(String),
}
