//! The shared simulation environment.
//!
//! `Environment` owns the bug collection's membership and the mutable shape
//! state (current form and outside policy).  Bugs never talk to each other;
//! everything one bug knows about another it learns through the queries here.

use tracing::debug;

use sw_agent::{Bug, BugStore};
use sw_core::{AgentId, OutsidePolicy, ShapeForm, SwarmConfig, Vec2};

use crate::SpatialResult;

/// Configuration, shape state and the live bug collection.
#[derive(Clone, Debug)]
pub struct Environment {
    config: SwarmConfig,
    form:   ShapeForm,
    policy: OutsidePolicy,
    bugs:   BugStore,
}

impl Environment {
    /// Validate `config` and build an empty environment from it.
    pub fn new(config: SwarmConfig) -> SpatialResult<Self> {
        config.validate()?;
        Ok(Self {
            form:   config.shape_form,
            policy: config.outside_policy,
            bugs:   BugStore::with_capacity(config.population_size),
            config,
        })
    }

    // ── Configuration & shape state ───────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    #[inline]
    pub fn shape_form(&self) -> ShapeForm {
        self.form
    }

    #[inline]
    pub fn outside_policy(&self) -> OutsidePolicy {
        self.policy
    }

    pub fn set_shape_form(&mut self, form: ShapeForm) {
        if form != self.form {
            debug!(from = %self.form, to = %form, "shape form changed");
        }
        self.form = form;
    }

    /// Set the form from its numeric code; unknown codes are rejected and
    /// leave the current form in place.
    pub fn set_shape_code(&mut self, code: u8) -> SpatialResult<()> {
        let form = ShapeForm::try_from(code)?;
        self.set_shape_form(form);
        Ok(())
    }

    pub fn set_outside_policy(&mut self, policy: OutsidePolicy) {
        if policy != self.policy {
            debug!(from = %self.policy, to = %policy, "outside policy changed");
        }
        self.policy = policy;
    }

    // ── Collection membership ─────────────────────────────────────────────

    #[inline]
    pub fn bugs(&self) -> &BugStore {
        &self.bugs
    }

    #[inline]
    pub fn bugs_mut(&mut self) -> &mut BugStore {
        &mut self.bugs
    }

    #[inline]
    pub fn bug(&self, agent: AgentId) -> Option<&Bug> {
        self.bugs.get(agent)
    }

    #[inline]
    pub fn bug_mut(&mut self, agent: AgentId) -> Option<&mut Bug> {
        self.bugs.get_mut(agent)
    }

    /// Append a bug at `position` to the end of the collection.
    pub fn add_bug(&mut self, position: Vec2, anchor: bool) -> AgentId {
        self.bugs.add(position, anchor)
    }

    pub fn remove_bug(&mut self, agent: AgentId) -> Option<Bug> {
        self.bugs.remove(agent)
    }

    /// Remove the bug at logical position `index` in collection order.
    pub fn remove_at(&mut self, index: usize) -> Option<Bug> {
        self.bugs.remove_at(index)
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.bugs.len()
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// `true` if `point` lies inside the current target form.
    #[inline]
    pub fn is_inside_shape(&self, point: Vec2) -> bool {
        self.form.contains(point)
    }

    #[inline]
    pub fn distance(a: Vec2, b: Vec2) -> f64 {
        a.distance(b)
    }

    /// `true` if the `diameter`-sided squares anchored at `a` and `b` overlap.
    ///
    /// Squares are half-open (`[x, x + d) × [y, y + d)`), so two squares
    /// overlap exactly when both coordinate gaps are below `diameter`.
    /// Symmetric in `a` and `b`.
    #[inline]
    pub fn conflicts(a: Vec2, b: Vec2, diameter: f64) -> bool {
        (a.x - b.x).abs() < diameter && (a.y - b.y).abs() < diameter
    }

    /// `true` if `point` is inside `[0, width) × [0, height)`.
    #[inline]
    pub fn in_bounds(&self, point: Vec2) -> bool {
        (0.0..self.config.domain_width).contains(&point.x)
            && (0.0..self.config.domain_height).contains(&point.y)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Bugs whose real position is strictly within `radius` of `point`, in
    /// collection order, truncated at the configured neighbour cap.
    pub fn neighbors_within(&self, point: Vec2, radius: f64) -> Vec<&Bug> {
        let limit = self.config.neighbor_cap.limit(self.config.max_neighbors);
        self.bugs
            .iter()
            .filter(|b| b.real_position.distance(point) < radius)
            .take(limit)
            .collect()
    }

    /// [`neighbors_within`](Self::neighbors_within) at the sensor range.
    pub fn neighbors(&self, point: Vec2) -> Vec<&Bug> {
        self.neighbors_within(point, self.config.sensor_range)
    }

    /// Whether a bug (`requester`, or a not-yet-placed bug when `None`) may
    /// occupy `point`.
    ///
    /// Rejects out-of-bounds points, points outside the shape when
    /// `require_inside_shape` is set, and points whose square overlaps the
    /// real position of any other bug returned by the sensor-range neighbour
    /// query around `point`.
    pub fn is_acceptable(
        &self,
        point:                Vec2,
        requester:            Option<AgentId>,
        require_inside_shape: bool,
    ) -> bool {
        if !self.in_bounds(point) {
            return false;
        }
        if require_inside_shape && !self.is_inside_shape(point) {
            return false;
        }
        let diameter = self.config.agent_diameter;
        !self
            .neighbors(point)
            .into_iter()
            .filter(|b| Some(b.id) != requester)
            .any(|b| Self::conflicts(point, b.real_position, diameter))
    }
}
