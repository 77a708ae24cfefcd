//! Core error type.
//!
//! Sub-crates define their own error enums and convert `CoreError` into them
//! via `#[from]`, so configuration problems surface unchanged at every layer.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `sw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("unknown shape form {0}: must be 0, 1 or 2")]
    UnknownShapeForm(u8),

    #[error("unknown outside-shape policy {0:?}: must be \"move\", \"repair\" or \"cull\"")]
    UnknownPolicy(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `sw-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
