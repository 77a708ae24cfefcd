//! Target shape definitions and the outside-shape policy.
//!
//! The target is an annulus centred on [`RING_CENTER`] whose squared radius
//! lies strictly between [`INNER_RADIUS_SQ`] and [`OUTER_RADIUS_SQ`]:
//!
//! | Form          | Code | Region                                   |
//! |---------------|------|------------------------------------------|
//! | `Full`        | 0    | whole ring                               |
//! | `Split`       | 1    | ring restricted to `x > 50` (half ring)  |
//! | `Recovered`   | 2    | whole ring again                         |
//!
//! Form codes enter the system only through [`ShapeForm::try_from`], so an
//! unknown code is rejected where it is introduced and the membership test
//! itself is total.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, Tick, Vec2};

/// Centre of the target ring.
pub const RING_CENTER: Vec2 = Vec2::new(50.0, 50.0);

/// Squared inner radius (exclusive).
pub const INNER_RADIUS_SQ: f64 = 400.0;

/// Squared outer radius (exclusive).
pub const OUTER_RADIUS_SQ: f64 = 900.0;

// ── ShapeForm ─────────────────────────────────────────────────────────────────

/// The target-region definition currently in force.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ShapeForm {
    /// Whole ring (initial target).
    #[default]
    Full,
    /// Half ring used during the perturbation phase.
    Split,
    /// Whole ring after recovery.
    Recovered,
}

impl ShapeForm {
    /// Numeric form code (0, 1 or 2).
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            ShapeForm::Full      => 0,
            ShapeForm::Split     => 1,
            ShapeForm::Recovered => 2,
        }
    }

    /// `true` if `point` lies strictly inside this form's target region.
    pub fn contains(self, point: Vec2) -> bool {
        let r_sq = point.distance_sq(RING_CENTER);
        let in_ring = INNER_RADIUS_SQ < r_sq && r_sq < OUTER_RADIUS_SQ;
        match self {
            ShapeForm::Full | ShapeForm::Recovered => in_ring,
            ShapeForm::Split => in_ring && point.x > RING_CENTER.x,
        }
    }
}

impl TryFrom<u8> for ShapeForm {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ShapeForm::Full),
            1 => Ok(ShapeForm::Split),
            2 => Ok(ShapeForm::Recovered),
            other => Err(CoreError::UnknownShapeForm(other)),
        }
    }
}

impl From<ShapeForm> for u8 {
    fn from(form: ShapeForm) -> u8 {
        form.code()
    }
}

impl fmt::Display for ShapeForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ShapeForm::Full      => "full",
            ShapeForm::Split     => "split",
            ShapeForm::Recovered => "recovered",
        };
        write!(f, "{label}({})", self.code())
    }
}

// ── OutsidePolicy ─────────────────────────────────────────────────────────────

/// What a localized bug does when it estimates itself outside the shape.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OutsidePolicy {
    /// Move halfway toward an in-shape localized neighbour, or explore.
    /// Configured as `"move"` (or `"repair"`).
    #[default]
    Repair,
    /// Remove the bug from the population.
    Cull,
}

impl OutsidePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            OutsidePolicy::Repair => "move",
            OutsidePolicy::Cull   => "cull",
        }
    }
}

impl FromStr for OutsidePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "move" | "repair" => Ok(OutsidePolicy::Repair),
            "cull" | "delete" => Ok(OutsidePolicy::Cull),
            _ => Err(CoreError::UnknownPolicy(s.to_owned())),
        }
    }
}

impl TryFrom<String> for OutsidePolicy {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OutsidePolicy> for &'static str {
    fn from(policy: OutsidePolicy) -> &'static str {
        policy.as_str()
    }
}

impl fmt::Display for OutsidePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ShapeTransition ───────────────────────────────────────────────────────────

/// A scheduled change of target form and outside policy.
///
/// Applied once, at the start of `tick`, before any bug steps.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ShapeTransition {
    pub tick:   Tick,
    pub form:   ShapeForm,
    pub policy: OutsidePolicy,
}

impl ShapeTransition {
    pub fn new(tick: u64, form: ShapeForm, policy: OutsidePolicy) -> Self {
        Self { tick: Tick(tick), form, policy }
    }

    /// The perturbation/recovery pair used by the standard scenario:
    /// split at `t1` under the repair policy, recover at `t2` under `move`.
    pub fn perturbation(t1: u64, t2: u64) -> Vec<ShapeTransition> {
        vec![
            ShapeTransition::new(t1, ShapeForm::Split, OutsidePolicy::Repair),
            ShapeTransition::new(t2, ShapeForm::Recovered, OutsidePolicy::Repair),
        ]
    }
}
