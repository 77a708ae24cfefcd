//! Marker classification for presentation.
//!
//! Drawn from snapshots only; the simulation never sees these categories.
//! The display ring is slightly wider than the target annulus so bugs sitting
//! on the boundary still count as formed.

use sw_core::shape::RING_CENTER;
use sw_core::{ShapeForm, Tick, Vec2};
use sw_sim::SwarmSnapshot;

const DISPLAY_INNER_SQ: f64 = 361.0;
const DISPLAY_OUTER_SQ: f64 = 961.0;
/// In the split form only the right-hand half of the ring is drawn as formed.
const SPLIT_MIN_X: f64 = 49.0;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Marker {
    Inside,
    /// Outside the ring while the swarm still has time to form.
    OutsideBeforeDeadline,
    /// Outside the ring after the deadline has passed.
    OutsideAfterDeadline,
}

pub fn in_display_ring(p: Vec2, form: ShapeForm) -> bool {
    let r2 = p.distance_sq(RING_CENTER);
    let ring = DISPLAY_INNER_SQ < r2 && r2 < DISPLAY_OUTER_SQ;
    match form {
        ShapeForm::Split => ring && p.x > SPLIT_MIN_X,
        ShapeForm::Full | ShapeForm::Recovered => ring,
    }
}

pub fn classify(p: Vec2, form: ShapeForm, tick: Tick, deadline: Tick) -> Marker {
    if in_display_ring(p, form) {
        Marker::Inside
    } else if tick < deadline {
        Marker::OutsideBeforeDeadline
    } else {
        Marker::OutsideAfterDeadline
    }
}

/// Marker counts for one snapshot.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct RingTally {
    pub tick:            Tick,
    pub inside:          usize,
    pub before_deadline: usize,
    pub after_deadline:  usize,
    pub localized:       usize,
}

impl RingTally {
    pub fn from_snapshot(snapshot: &SwarmSnapshot, deadline: Tick) -> Self {
        let mut tally = RingTally { tick: snapshot.tick, ..RingTally::default() };
        for agent in &snapshot.agents {
            tally.localized += agent.localized as usize;
            match classify(agent.real_position, snapshot.form, snapshot.tick, deadline) {
                Marker::Inside => tally.inside += 1,
                Marker::OutsideBeforeDeadline => tally.before_deadline += 1,
                Marker::OutsideAfterDeadline => tally.after_deadline += 1,
            }
        }
        tally
    }

    pub fn population(&self) -> usize {
        self.inside + self.before_deadline + self.after_deadline
    }
}
