//! Distributed trilateration.
//!
//! A lost bug that can see at least three localized neighbours estimates its
//! own position by gradient descent on the residuals between the measured
//! distances and the distances to a candidate position.
//!
//! Distances are measured truthfully (real position to real position); only
//! the neighbours' *positions* are uncertain, because the bug can only read
//! their perceived positions.
//!
//! # Descent modes
//!
//! [`DescentMode::Literal`] is the classic closed-form descent: the
//! gradient term is `-2·(n−x)·√(r² − d) / r`, it is evaluated once at the
//! seed, and the loop only steps while that gradient is *already* below the
//! threshold.  In practice the estimate is the jittered seed unless the seed
//! happens to be nearly converged, in which case the same small gradient is
//! applied on every iteration.
//!
//! [`DescentMode::Corrected`] descends on `Σ (r − d)²` with gradient
//! `2·(r − d)·(x − n) / r`, re-evaluated every iteration, and stops once both
//! components fall below the threshold.

use sw_agent::Bug;
use sw_core::{AgentRng, DescentConfig, DescentMode, Vec2};

use crate::StepContext;

/// Neighbours needed for a position fix.
pub const ANCHORS_REQUIRED: usize = 3;

/// What a bug learns from one localized neighbour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnchorReading {
    /// The neighbour's own estimate of where it is.
    pub perceived: Vec2,
    /// True distance between the two bugs.
    pub distance: f64,
}

impl AnchorReading {
    pub fn new(perceived: Vec2, distance: f64) -> Self {
        Self { perceived, distance }
    }
}

// ── Gradients ─────────────────────────────────────────────────────────────────

/// Closed-form gradient `-2·(n−x)·√(r² − d) / r`.
///
/// Terms whose denominator is zero (anchor coincident with `at`) or whose
/// value is not finite (`r² < d`) contribute nothing.
pub fn literal_gradient(readings: &[AnchorReading], at: Vec2) -> Vec2 {
    readings.iter().fold(Vec2::ZERO, |acc, a| {
        let dx = a.perceived.x - at.x;
        let dy = a.perceived.y - at.y;
        let r_sq = dx * dx + dy * dy;
        let r = r_sq.sqrt();
        if r == 0.0 {
            return acc;
        }
        let k = (r_sq - a.distance).sqrt() / r;
        let term = Vec2::new(-2.0 * dx * k, -2.0 * dy * k);
        if term.is_finite() { acc + term } else { acc }
    })
}

/// Gradient of `Σ (|at − nᵢ| − dᵢ)²` with respect to `at`.
pub fn least_squares_gradient(readings: &[AnchorReading], at: Vec2) -> Vec2 {
    readings.iter().fold(Vec2::ZERO, |acc, a| {
        let offset = at - a.perceived;
        let r = offset.length();
        if r == 0.0 {
            return acc;
        }
        let term = offset * (2.0 * (r - a.distance) / r);
        if term.is_finite() { acc + term } else { acc }
    })
}

/// Sum of squared distance residuals at `at`; the quantity being minimized.
pub fn residual(readings: &[AnchorReading], at: Vec2) -> f64 {
    readings
        .iter()
        .map(|a| {
            let e = at.distance(a.perceived) - a.distance;
            e * e
        })
        .sum()
}

#[inline]
fn below(g: Vec2, threshold: f64) -> bool {
    g.x.abs() < threshold && g.y.abs() < threshold
}

// ── Estimation ────────────────────────────────────────────────────────────────

/// Refine `seed` against `readings` under `params`.
pub fn estimate_position(readings: &[AnchorReading], seed: Vec2, params: &DescentConfig) -> Vec2 {
    let mut position = seed;
    match params.mode {
        DescentMode::Literal => {
            let gradient = literal_gradient(readings, seed);
            let mut iterations = 0;
            while iterations < params.max_iterations && below(gradient, params.threshold) {
                position = position - gradient * params.rate;
                iterations += 1;
            }
        }
        DescentMode::Corrected => {
            for _ in 0..params.max_iterations {
                let gradient = least_squares_gradient(readings, position);
                if below(gradient, params.threshold) {
                    break;
                }
                position = position - gradient * params.rate;
            }
        }
    }
    position
}

/// Starting point for the descent.
///
/// A bug with no prior estimate jitters its real position (the jitter stands
/// in for a rough prior); otherwise it starts from its current estimate.
pub fn descent_seed(bug: &Bug, params: &DescentConfig, rng: &mut AgentRng) -> Vec2 {
    if bug.localized {
        bug.perceived_position
    } else {
        bug.real_position + rng.offset_in_box(params.seed_jitter)
    }
}

/// The first three localized bugs in `pool` (collection order), excluding
/// `bug` itself.  `None` unless the pool holds more than three bugs and three
/// of them are localized.
pub fn select_anchors<'a>(bug: &Bug, pool: &[&'a Bug]) -> Option<[&'a Bug; ANCHORS_REQUIRED]> {
    if pool.len() <= ANCHORS_REQUIRED {
        return None;
    }
    let mut found = pool.iter().copied().filter(|n| n.id != bug.id && n.localized);
    Some([found.next()?, found.next()?, found.next()?])
}

/// Attempt a position fix for a lost bug.
///
/// Returns the new estimate, or `None` if the bug is already localized or
/// its neighbourhood does not offer three localized neighbours this tick.
pub fn try_localize(bug: &Bug, ctx: &StepContext<'_>, rng: &mut AgentRng) -> Option<Vec2> {
    if bug.localized {
        return None;
    }
    let cfg = ctx.config();
    let pool = ctx.env.neighbors_within(bug.real_position, cfg.localization_radius);
    let anchors = select_anchors(bug, &pool)?;

    let readings = anchors.map(|n| {
        AnchorReading::new(n.perceived_position, bug.real_position.distance(n.real_position))
    });
    let seed = descent_seed(bug, &cfg.descent, rng);
    Some(estimate_position(&readings, seed, &cfg.descent))
}
