//! Movement rules: random exploration, repulsion spacing, and the repair
//! search used by bugs that find themselves outside the shape.

use sw_agent::Bug;
use sw_core::{AgentId, AgentRng, Vec2};

use crate::StepContext;

/// Sample a random displacement that keeps the bug in an acceptable spot.
///
/// Each sample is uniform in `[-random_step, random_step]²` and is tested
/// against the perceived position `from`.  When `keep_inside_shape` is set
/// the destination must also lie inside the current form.  After
/// `max_random_tries` rejected samples the bug holds still.
pub fn random_move(
    agent:             AgentId,
    from:              Vec2,
    keep_inside_shape: bool,
    ctx:               &StepContext<'_>,
    rng:               &mut AgentRng,
) -> Vec2 {
    let cfg = ctx.config();
    for _ in 0..cfg.max_random_tries {
        let candidate = rng.offset_in_box(cfg.random_step);
        if ctx.env.is_acceptable(from + candidate, Some(agent), keep_inside_shape) {
            return candidate;
        }
    }
    Vec2::ZERO
}

/// Displacement pushing `bug` away from every neighbour closer than `radius`.
///
/// Works on perceived positions.  Each neighbour at distance `r < radius`
/// contributes `-(offset) · (radius − r) / r`; coincident neighbours and the
/// bug itself contribute nothing.
pub fn repulsion_vector(bug: &Bug, pool: &[&Bug], radius: f64) -> Vec2 {
    let here = bug.perceived_position;
    pool.iter()
        .filter(|n| n.id != bug.id)
        .fold(Vec2::ZERO, |acc, n| {
            let offset = n.perceived_position - here;
            let r = offset.length();
            if r == 0.0 || r >= radius {
                return acc;
            }
            let push = offset * ((radius - r) / r);
            if push.is_finite() { acc - push } else { acc }
        })
}

/// Look for a localized neighbour that is inside the shape and return the
/// displacement taking `bug` halfway toward it.
///
/// The neighbourhood is re-queried on each of `repair_rounds` rounds.
/// `None` if no such neighbour turns up.
pub fn repair_move(bug: &Bug, ctx: &StepContext<'_>) -> Option<Vec2> {
    let cfg = ctx.config();
    let here = bug.perceived_position;
    (0..cfg.repair_rounds).find_map(|_| {
        let pool = ctx.env.neighbors_within(bug.real_position, cfg.localization_radius);
        if pool.len() <= 1 {
            return None;
        }
        pool.into_iter()
            .find(|n| {
                n.id != bug.id && n.localized && ctx.env.is_inside_shape(n.perceived_position)
            })
            .map(|n| (n.perceived_position - here) / 2.0)
    })
}
