//! A no-op behavior model — bugs never act.

use sw_agent::Bug;
use sw_core::AgentRng;

use crate::{Intent, StepContext, SwarmBehavior};

/// A [`SwarmBehavior`] that always returns an empty intent list.
///
/// Useful in tests of the tick loop, where bugs should simply occupy space.
pub struct NoopBehavior;

impl SwarmBehavior for NoopBehavior {
    fn step(
        &self,
        _bug: &Bug,
        _ctx: &StepContext<'_>,
        _rng: &mut AgentRng,
    ) -> Vec<Intent> {
        vec![]
    }
}
