//! Read-only simulation state passed to every behavior callback.

use sw_core::{SwarmConfig, Tick};
use sw_spatial::Environment;

/// A read-only view of the simulation for one bug's step.
///
/// Built by the driver immediately before each bug decides, so it reflects
/// the moves of every bug processed earlier in the same tick.
pub struct StepContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// The environment: shape state, configuration and all live bugs.
    pub env: &'a Environment,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn new(tick: Tick, env: &'a Environment) -> Self {
        Self { tick, env }
    }

    #[inline]
    pub fn config(&self) -> &'a SwarmConfig {
        self.env.config()
    }
}
