//! The `SwarmBehavior` trait — the extension point for bug decision logic.

use sw_agent::Bug;
use sw_core::AgentRng;

use crate::{Intent, StepContext};

/// Pluggable bug behavior.
///
/// Implementations receive the bug being stepped, a read-only
/// [`StepContext`], and that bug's own [`AgentRng`], so a run is reproducible
/// from its seed.  Per-bug state lives on [`Bug`], never in the model.
///
/// # Example
///
/// ```rust,ignore
/// struct Drift;
///
/// impl SwarmBehavior for Drift {
///     fn step(&self, _bug: &Bug, _ctx: &StepContext<'_>, rng: &mut AgentRng) -> Vec<Intent> {
///         vec![Intent::Move(rng.offset_in_box(0.1))]
///     }
/// }
/// ```
pub trait SwarmBehavior: Send + Sync + 'static {
    /// Decide what `bug` does this tick.
    ///
    /// An empty `Vec` means "hold still".
    fn step(
        &self,
        bug: &Bug,
        ctx: &StepContext<'_>,
        rng: &mut AgentRng,
    ) -> Vec<Intent>;
}
