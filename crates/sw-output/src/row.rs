//! Plain data row types written by output backends.

use sw_core::Tick;
use sw_sim::{AgentSnapshot, SwarmSnapshot, TickSummary};

/// One bug at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:        u64,
    pub agent_id:    u32,
    /// Shape form code (0 full, 1 split, 2 recovered).
    pub form:        u8,
    pub real_x:      f64,
    pub real_y:      f64,
    pub perceived_x: f64,
    pub perceived_y: f64,
    pub localized:   bool,
    pub inside_true: bool,
}

impl AgentSnapshotRow {
    pub fn new(tick: Tick, form: u8, agent: &AgentSnapshot) -> Self {
        Self {
            tick:        tick.0,
            agent_id:    agent.id.0,
            form,
            real_x:      agent.real_position.x,
            real_y:      agent.real_position.y,
            perceived_x: agent.perceived_position.x,
            perceived_y: agent.perceived_position.y,
            localized:   agent.localized,
            inside_true: agent.inside_true,
        }
    }

    /// Flatten a whole snapshot, preserving agent order.
    pub fn from_snapshot(snapshot: &SwarmSnapshot) -> Vec<Self> {
        let form = snapshot.form.code();
        snapshot
            .agents
            .iter()
            .map(|a| Self::new(snapshot.tick, form, a))
            .collect()
    }
}

/// Summary counts for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub population:       u64,
    pub localized:        u64,
    pub inside_estimated: u64,
    pub inside_true:      u64,
    pub culled:           u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:             s.tick.0,
            population:       s.population as u64,
            localized:        s.localized as u64,
            inside_estimated: s.inside_estimated as u64,
            inside_true:      s.inside_true as u64,
            culled:           s.culled as u64,
        }
    }
}
