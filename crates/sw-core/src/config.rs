//! Simulation configuration.
//!
//! `SwarmConfig` is plain data with serde support; every field has a default
//! matching the standard scenario (300 bugs on a 100 × 100 plane, ring
//! perturbed at tick 500 and restored at tick 700, 1000 ticks).  Applications
//! load it from JSON and call [`SwarmConfig::validate`] before building a sim.

use std::path::Path;

use crate::{CoreError, CoreResult, OutsidePolicy, ShapeForm, ShapeTransition, Tick};

// ── Open-question switches ────────────────────────────────────────────────────

/// How the trilateration descent iterates.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescentMode {
    /// Classic behaviour: the closed-form gradient is evaluated once at the
    /// seed, and steps are taken only while that gradient is already below
    /// the threshold.
    #[default]
    Literal,
    /// True least-squares gradient, re-evaluated every iteration; iterate
    /// while it is still above the threshold.
    Corrected,
}

/// How the neighbour-query truncation treats the cap.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborCap {
    /// The count is compared after appending, so up to `max + 1` agents are
    /// returned.
    #[default]
    Inclusive,
    /// At most `max` agents are returned.
    Strict,
}

impl NeighborCap {
    /// Largest number of results a query may return for a given cap.
    #[inline]
    pub fn limit(self, max_neighbors: usize) -> usize {
        match self {
            NeighborCap::Inclusive => max_neighbors.saturating_add(1),
            NeighborCap::Strict    => max_neighbors,
        }
    }
}

// ── DescentConfig ─────────────────────────────────────────────────────────────

/// Parameters of the gradient-descent trilateration.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DescentConfig {
    pub mode: DescentMode,
    /// Iteration budget.
    pub max_iterations: u32,
    /// Per-component gradient threshold.
    pub threshold: f64,
    /// Step size: `position -= rate * gradient`.
    pub rate: f64,
    /// Half-width of the uniform jitter applied to the real position when a
    /// bug has no prior estimate.
    pub seed_jitter: f64,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            mode:           DescentMode::Literal,
            max_iterations: 500,
            threshold:      0.1,
            rate:           0.5,
            seed_jitter:    2.0,
        }
    }
}

// ── SwarmConfig ───────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Width of the plane; valid x coordinates are `[0, domain_width)`.
    pub domain_width: f64,
    /// Height of the plane; valid y coordinates are `[0, domain_height)`.
    pub domain_height: f64,
    /// Side of the square each bug occupies.
    pub agent_diameter: f64,
    pub population_size: usize,

    /// Radius of the neighbourhood used for localization, repair search and
    /// repulsion.
    pub localization_radius: f64,
    /// Cap on the number of agents a neighbour query returns (see
    /// [`NeighborCap`]).
    pub max_neighbors: usize,
    pub neighbor_cap: NeighborCap,
    pub repulsion_radius: f64,
    /// Default query radius, used by the acceptability check.
    pub sensor_range: f64,

    pub outside_policy: OutsidePolicy,
    pub shape_form: ShapeForm,
    pub transition_tick_1: u64,
    pub transition_tick_2: u64,
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
    /// Probability that a freshly placed bug is an anchor.
    pub anchor_probability: f64,
    /// Half-width of the exploration box: random moves are uniform in
    /// `[-random_step, random_step]²`.
    pub random_step: f64,
    /// Samples tried by a random move before giving up and holding still.
    pub max_random_tries: u32,
    /// Neighbourhood scans made by the repair policy before exploring.
    pub repair_rounds: u32,
    /// Emit a snapshot every N completed ticks.  0 disables periodic snapshots.
    pub snapshot_interval_ticks: u64,
    /// Placement samples allowed per bug before initialization fails.
    pub max_placement_attempts: u64,

    pub descent: DescentConfig,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        let agent_diameter = 1.0;
        Self {
            domain_width:            100.0,
            domain_height:           100.0,
            agent_diameter,
            population_size:         300,
            localization_radius:     4.0,
            max_neighbors:           20,
            neighbor_cap:            NeighborCap::Inclusive,
            repulsion_radius:        4.0,
            sensor_range:            8.0 * agent_diameter,
            outside_policy:          OutsidePolicy::Repair,
            shape_form:              ShapeForm::Full,
            transition_tick_1:       500,
            transition_tick_2:       700,
            total_ticks:             1000,
            seed:                    42,
            anchor_probability:      0.5,
            random_step:             1.0,
            max_random_tries:        20,
            repair_rounds:           3,
            snapshot_interval_ticks: 100,
            max_placement_attempts:  100_000,
            descent:                 DescentConfig::default(),
        }
    }
}

impl SwarmConfig {
    // ── Loading ───────────────────────────────────────────────────────────

    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: SwarmConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    // ── Derived values ────────────────────────────────────────────────────

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Scheduled shape transitions in tick order.
    pub fn transitions(&self) -> Vec<ShapeTransition> {
        ShapeTransition::perturbation(self.transition_tick_1, self.transition_tick_2)
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Check every constraint the simulation relies on.
    pub fn validate(&self) -> CoreResult<()> {
        positive("domain_width", self.domain_width)?;
        positive("domain_height", self.domain_height)?;
        positive("agent_diameter", self.agent_diameter)?;
        positive("localization_radius", self.localization_radius)?;
        positive("repulsion_radius", self.repulsion_radius)?;
        positive("sensor_range", self.sensor_range)?;
        positive("descent.threshold", self.descent.threshold)?;
        positive("descent.rate", self.descent.rate)?;

        if !(0.0..=1.0).contains(&self.anchor_probability) {
            return Err(CoreError::Config(format!(
                "anchor_probability must be in [0, 1], got {}",
                self.anchor_probability
            )));
        }
        if !self.random_step.is_finite() || self.random_step < 0.0 {
            return Err(CoreError::Config(format!(
                "random_step must be finite and non-negative, got {}",
                self.random_step
            )));
        }
        if !self.descent.seed_jitter.is_finite() || self.descent.seed_jitter < 0.0 {
            return Err(CoreError::Config(format!(
                "descent.seed_jitter must be finite and non-negative, got {}",
                self.descent.seed_jitter
            )));
        }
        if self.transition_tick_1 >= self.transition_tick_2 {
            return Err(CoreError::Config(format!(
                "transition_tick_1 ({}) must precede transition_tick_2 ({})",
                self.transition_tick_1, self.transition_tick_2
            )));
        }
        if self.max_placement_attempts == 0 && self.population_size > 0 {
            return Err(CoreError::Config(
                "max_placement_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    // ── Fluent overrides ──────────────────────────────────────────────────

    pub fn with_population(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_total_ticks(mut self, ticks: u64) -> Self {
        self.total_ticks = ticks;
        self
    }

    pub fn with_policy(mut self, policy: OutsidePolicy) -> Self {
        self.outside_policy = policy;
        self
    }

    pub fn with_transition_ticks(mut self, t1: u64, t2: u64) -> Self {
        self.transition_tick_1 = t1;
        self.transition_tick_2 = t2;
        self
    }

    pub fn with_descent_mode(mut self, mode: DescentMode) -> Self {
        self.descent.mode = mode;
        self
    }

    pub fn with_neighbor_cap(mut self, cap: NeighborCap) -> Self {
        self.neighbor_cap = cap;
        self
    }
}

fn positive(name: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{name} must be finite and positive, got {value}")))
    }
}
