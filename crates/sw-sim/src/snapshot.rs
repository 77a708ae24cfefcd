//! Read-only views of the swarm handed to observers.
//!
//! These are the only data that leave the core: presentation layers derive
//! every colour or marker they draw from a [`SwarmSnapshot`].

use sw_agent::Bug;
use sw_core::{AgentId, OutsidePolicy, ShapeForm, Tick, Vec2};
use sw_spatial::Environment;

/// One bug as seen by presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshot {
    pub id:                 AgentId,
    pub real_position:      Vec2,
    pub perceived_position: Vec2,
    pub localized:          bool,
    pub inside_true:        bool,
}

impl From<&Bug> for AgentSnapshot {
    fn from(bug: &Bug) -> Self {
        Self {
            id:                 bug.id,
            real_position:      bug.real_position,
            perceived_position: bug.perceived_position,
            localized:          bug.localized,
            inside_true:        bug.inside_true,
        }
    }
}

/// The whole swarm after `tick` completed ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmSnapshot {
    pub tick:   Tick,
    pub form:   ShapeForm,
    pub policy: OutsidePolicy,
    /// Live bugs in collection order.
    pub agents: Vec<AgentSnapshot>,
}

impl SwarmSnapshot {
    pub fn capture(tick: Tick, env: &Environment) -> Self {
        Self {
            tick,
            form:   env.shape_form(),
            policy: env.outside_policy(),
            agents: env.bugs().iter().map(AgentSnapshot::from).collect(),
        }
    }
}

/// Counts describing the swarm at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSummary {
    /// The tick just processed.
    pub tick:             Tick,
    pub population:       usize,
    pub localized:        usize,
    pub inside_estimated: usize,
    pub inside_true:      usize,
    /// Bugs removed during this tick.
    pub culled:           usize,
}

impl TickSummary {
    pub fn capture(tick: Tick, env: &Environment, culled: usize) -> Self {
        let mut summary = TickSummary {
            tick,
            population: env.population(),
            culled,
            ..TickSummary::default()
        };
        for bug in env.bugs().iter() {
            summary.localized += bug.localized as usize;
            summary.inside_estimated += (bug.localized && bug.inside_estimated) as usize;
            summary.inside_true += (bug.localized && bug.inside_true) as usize;
        }
        summary
    }
}
