//! The `Sim` struct and its tick loop.

use tracing::{debug, info, trace};

use sw_agent::{AgentRngs, Bug};
use sw_behavior::{Intent, StepContext, SwarmBehavior};
use sw_core::{AgentId, ShapeTransition, SwarmConfig, Tick};
use sw_spatial::Environment;

use crate::{SimError, SimObserver, SimResult, SwarmSnapshot, TickSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B>` owns the environment and drives the tick loop:
///
/// 1. **Schedule**: apply every [`ShapeTransition`] whose tick equals the
///    current tick.  Each transition fires exactly once.
/// 2. **Steps** (sequential, collection order): for each bug alive at the
///    start of the tick, call [`SwarmBehavior::step`] and apply its intents
///    before moving to the next bug.
///    - `Localize(p)`          → perceived position := `p`, localized := true.
///    - `ShapeStatus{..}`      → record both inside flags.
///    - `Move(delta)`          → translate both positions by `delta`.
///    - `Cull`                 → remove the bug; its remaining intents are
///                               dropped.
/// 3. **Summary**: population and localisation counts for observers.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: SwarmBehavior> {
    /// The domain, its shape state and the bug collection.
    pub env: Environment,

    /// Per-bug deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// The behavior model.  Called once per live bug per tick.
    pub behavior: B,

    /// The next tick to process (equivalently, the number of completed
    /// ticks).
    pub clock: Tick,

    /// Pending shape transitions in tick order.
    pub(crate) transitions: Vec<ShapeTransition>,
}

impl<B: SwarmBehavior> Sim<B> {
    // ── Public API ────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &SwarmConfig {
        self.env.config()
    }

    /// Capture the swarm as it stands after `self.clock` completed ticks.
    pub fn snapshot(&self) -> SwarmSnapshot {
        SwarmSnapshot::capture(self.clock, &self.env)
    }

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// A snapshot is emitted before the first tick and after every
    /// `snapshot_interval_ticks` completed ticks.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        observer.on_snapshot(&self.snapshot());
        let end = self.config().end_tick();
        info!(start = %self.clock, %end, "simulation started");
        while self.clock < end {
            self.advance(observer)?;
        }
        info!(
            end = %self.clock,
            population = self.env.population(),
            "simulation finished"
        );
        observer.on_sim_end(self.clock);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.advance(observer)?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn advance<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock;
        observer.on_tick_start(now);
        let summary = self.process_tick(now, observer)?;
        observer.on_tick_end(&summary);
        self.clock = now.next();

        let interval = self.config().snapshot_interval_ticks;
        if interval > 0 && self.clock.0.is_multiple_of(interval) {
            observer.on_snapshot(&self.snapshot());
        }
        Ok(())
    }

    fn process_tick<O: SimObserver>(
        &mut self,
        now:      Tick,
        observer: &mut O,
    ) -> SimResult<TickSummary> {
        // ── Phase 1: shape schedule ───────────────────────────────────────
        let due: Vec<ShapeTransition> = self
            .transitions
            .iter()
            .filter(|t| t.tick == now)
            .copied()
            .collect();
        for transition in due {
            self.env.set_shape_form(transition.form);
            self.env.set_outside_policy(transition.policy);
            info!(
                tick = %now,
                form = %transition.form,
                policy = %transition.policy,
                "shape transition"
            );
            observer.on_transition(&transition);
        }

        // ── Phase 2: sequential steps ─────────────────────────────────────
        //
        // Ids are recorded up front; bugs culled earlier in the tick are
        // skipped when their turn comes.
        let mut culled = 0;
        for id in self.env.bugs().ids() {
            let intents = {
                let Some(bug) = self.env.bug(id) else { continue };
                let ctx = StepContext::new(now, &self.env);
                let rng = self.rngs.get_mut(id);
                self.behavior.step(bug, &ctx, rng)
            };
            if self.apply_intents(id, intents, now)? {
                culled += 1;
            }
        }

        // ── Phase 3: summary ──────────────────────────────────────────────
        let summary = TickSummary::capture(now, &self.env, culled);
        trace!(
            tick = %now,
            population = summary.population,
            localized = summary.localized,
            culled,
            "tick complete"
        );
        Ok(summary)
    }

    /// Apply one bug's intents in order.  Returns `true` if the bug was
    /// culled.
    fn apply_intents(
        &mut self,
        agent:   AgentId,
        intents: Vec<Intent>,
        now:     Tick,
    ) -> SimResult<bool> {
        for intent in intents {
            match intent {
                Intent::Localize(estimate) => {
                    let bug = self.bug_mut(agent)?;
                    let error = bug.real_position.distance(estimate);
                    bug.localize(estimate);
                    debug!(tick = %now, %agent, %estimate, error, "bug localized");
                }
                Intent::ShapeStatus { inside_estimated, inside_true } => {
                    let bug = self.bug_mut(agent)?;
                    bug.inside_estimated = inside_estimated;
                    bug.inside_true = inside_true;
                }
                Intent::Move(delta) => {
                    self.bug_mut(agent)?.translate(delta);
                    trace!(tick = %now, %agent, %delta, "bug moved");
                }
                Intent::Cull => {
                    self.env.remove_bug(agent);
                    debug!(tick = %now, %agent, "culled bug outside the shape");
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    #[inline]
    fn bug_mut(&mut self, agent: AgentId) -> SimResult<&mut Bug> {
        self.env.bug_mut(agent).ok_or(SimError::AgentNotFound(agent))
    }
}
