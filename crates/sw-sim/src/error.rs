use thiserror::Error;

use sw_core::AgentId;
use sw_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("{what} length {got} does not match population size {expected}")]
    PopulationMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("could not place bug {placed} of {requested} after {attempts} attempts")]
    Placement {
        placed:    usize,
        requested: usize,
        attempts:  u64,
    },

    #[error("agent {0} vanished while being stepped")]
    AgentNotFound(AgentId),
}

pub type SimResult<T> = Result<T, SimError>;
