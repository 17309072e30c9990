//! Harness errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fixture {path}: {message}")]
    Fixture { path: PathBuf, message: String },
    #[error("invalid argument '{spec}': {message}")]
    InvalidArgument { spec: String, message: String },
}
