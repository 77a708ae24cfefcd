//! `BugBehavior` — the per-tick decision state machine.
//!
//! ```text
//! Lost ──(3 localized neighbours)──▶ Localized
//!   │                                   │
//!   └─ explore (unconstrained)          ├─ outside estimated shape
//!                                       │    ├─ Repair: halfway to an in-shape neighbour, else explore
//!                                       │    └─ Cull:   leave the swarm
//!                                       └─ inside estimated shape
//!                                            ├─ >1 neighbour: repulsion if it stays acceptable, else explore in-shape
//!                                            └─ otherwise:   explore in-shape
//! ```

use sw_agent::Bug;
use sw_core::{AgentRng, OutsidePolicy, Vec2};

use crate::{
    Intent, StepContext, SwarmBehavior, random_move, repair_move, repulsion_vector, try_localize,
};

/// The bug decision logic used by the simulator.
#[derive(Clone, Copy, Debug, Default)]
pub struct BugBehavior;

impl BugBehavior {
    fn step_lost(&self, bug: &Bug, ctx: &StepContext<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        let mut intents = Vec::with_capacity(2);
        let mut perceived = bug.perceived_position;

        if let Some(estimate) = try_localize(bug, ctx, rng) {
            intents.push(Intent::Localize(estimate));
            perceived = estimate;
        }

        // A lost bug has never evaluated its shape membership, so exploration
        // is unconstrained.
        let delta = random_move(bug.id, perceived, bug.inside_estimated, ctx, rng);
        push_move(&mut intents, delta);
        intents
    }

    fn step_localized(&self, bug: &Bug, ctx: &StepContext<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        let env = ctx.env;
        let cfg = ctx.config();
        let here = bug.perceived_position;

        let inside_estimated = env.is_inside_shape(here);
        let inside_true = env.is_inside_shape(bug.real_position);
        let mut intents = vec![Intent::ShapeStatus { inside_estimated, inside_true }];

        let delta = if !inside_estimated {
            match env.outside_policy() {
                OutsidePolicy::Cull => {
                    intents.push(Intent::Cull);
                    return intents;
                }
                OutsidePolicy::Repair => repair_move(bug, ctx)
                    .unwrap_or_else(|| random_move(bug.id, here, false, ctx, rng)),
            }
        } else {
            let pool = env.neighbors_within(bug.real_position, cfg.localization_radius);
            if pool.len() > 1 {
                let push = repulsion_vector(bug, &pool, cfg.repulsion_radius);
                if env.is_acceptable(here + push, Some(bug.id), true) {
                    push
                } else {
                    random_move(bug.id, here, true, ctx, rng)
                }
            } else {
                random_move(bug.id, here, true, ctx, rng)
            }
        };

        push_move(&mut intents, delta);
        intents
    }
}

impl SwarmBehavior for BugBehavior {
    fn step(&self, bug: &Bug, ctx: &StepContext<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        if bug.is_lost() {
            self.step_lost(bug, ctx, rng)
        } else {
            self.step_localized(bug, ctx, rng)
        }
    }
}

fn push_move(intents: &mut Vec<Intent>, delta: Vec2) {
    if !delta.is_zero() {
        intents.push(Intent::Move(delta));
    }
}
