//! Spatial-subsystem error type.

use thiserror::Error;

use sw_core::{AgentId, CoreError};

/// Errors produced by `sw-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("agent {0} not found in environment")]
    AgentNotFound(AgentId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
