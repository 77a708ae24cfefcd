//! Fluent builder for constructing a [`Sim`].

use tracing::{debug, info, warn};

use sw_agent::AgentRngs;
use sw_behavior::SwarmBehavior;
use sw_core::{SimRng, SwarmConfig, Tick, Vec2};
use sw_spatial::Environment;

use crate::{Sim, SimError, SimResult};

/// Placement attempts above this fraction of the budget are worth a warning:
/// the domain is close to saturation.
const CROWDED_FRACTION: f64 = 0.5;

/// Fluent builder for [`Sim<B>`].
///
/// # Required inputs
///
/// - [`SwarmConfig`] — domain, population, radii, schedule, seed, …
/// - `B: SwarmBehavior` — the per-bug decision procedure
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                        |
/// |--------------------|------------------------------------------------|
/// | `.placements(v)`   | Rejection-sampled uniform positions, coin-flip anchors |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, BugBehavior).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<B: SwarmBehavior> {
    config:     SwarmConfig,
    behavior:   B,
    placements: Option<Vec<(Vec2, bool)>>,
}

impl<B: SwarmBehavior> SimBuilder<B> {
    pub fn new(config: SwarmConfig, behavior: B) -> Self {
        Self { config, behavior, placements: None }
    }

    /// Supply explicit `(position, is_anchor)` pairs instead of random
    /// placement.  Must be length `population_size`; positions are taken as
    /// given, without conflict checks.
    pub fn placements(mut self, placements: Vec<(Vec2, bool)>) -> Self {
        self.placements = Some(placements);
        self
    }

    /// Validate the configuration, populate the environment and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<B>> {
        let mut env = Environment::new(self.config)?;
        let population = env.config().population_size;

        match self.placements {
            Some(placements) => {
                if placements.len() != population {
                    return Err(SimError::PopulationMismatch {
                        expected: population,
                        got:      placements.len(),
                        what:     "placements",
                    });
                }
                for (position, anchor) in placements {
                    env.add_bug(position, anchor);
                }
            }
            None => populate(&mut env)?,
        }

        let transitions = env.config().transitions();
        let rngs = AgentRngs::new(env.config().seed);
        let anchors = env.bugs().iter().filter(|b| b.is_anchor()).count();
        info!(
            population = env.population(),
            anchors,
            form = %env.shape_form(),
            policy = %env.outside_policy(),
            "swarm initialised"
        );

        Ok(Sim {
            env,
            rngs,
            behavior: self.behavior,
            clock: Tick::ZERO,
            transitions,
        })
    }
}

// ── Initial placement ─────────────────────────────────────────────────────────

/// Place `population_size` bugs at uniformly random non-conflicting positions.
///
/// Each candidate is checked against bugs already placed; the anchor coin is
/// flipped once per placed bug.  Fails when a single bug exhausts
/// `max_placement_attempts`.
fn populate(env: &mut Environment) -> SimResult<()> {
    let config = env.config();
    let population = config.population_size;
    let budget = config.max_placement_attempts;
    let anchor_probability = config.anchor_probability;
    let (width, height) = (config.domain_width, config.domain_height);
    let mut rng = SimRng::new(config.seed);

    for placed in 0..population {
        let mut attempts = 0u64;
        let position = loop {
            if attempts >= budget {
                return Err(SimError::Placement {
                    placed,
                    requested: population,
                    attempts,
                });
            }
            attempts += 1;
            let candidate = rng.point_in(width, height);
            if env.is_acceptable(candidate, None, false) {
                break candidate;
            }
        };
        if attempts as f64 > budget as f64 * CROWDED_FRACTION {
            warn!(placed, attempts, budget, "placement is close to exhausting its attempt budget");
        }

        let anchor = rng.gen_bool(anchor_probability);
        let id = env.add_bug(position, anchor);
        debug!(%id, %position, anchor, attempts, "placed bug");
    }
    Ok(())
}
