//! The per-bug state record.

use sw_core::{AgentId, Vec2};

/// Coarse classification of a bug, as used by observers and summaries.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BugStatus {
    /// No usable position estimate yet.
    Lost,
    /// Localized and estimating itself inside the target shape.
    Inside,
    /// Localized and estimating itself outside the target shape.
    Outside,
}

/// One member of the swarm.
///
/// `real_position` is ground truth and only ever changes by the bug's own
/// movement.  `perceived_position` is the bug's estimate of where it is; it is
/// meaningful only once `localized` is set, and anchors start with it equal to
/// the real position.
#[derive(Clone, Debug, PartialEq)]
pub struct Bug {
    pub id: AgentId,
    pub real_position: Vec2,
    pub perceived_position: Vec2,
    /// Once `true`, never reset.
    pub localized: bool,
    /// Shape membership of `perceived_position`, refreshed each localized step.
    pub inside_estimated: bool,
    /// Shape membership of `real_position`, refreshed each localized step.
    pub inside_true: bool,
    anchor: bool,
}

impl Bug {
    /// A bug that knows its true position from the start.
    pub fn anchor(id: AgentId, position: Vec2) -> Self {
        Self {
            id,
            real_position:      position,
            perceived_position: position,
            localized:          true,
            inside_estimated:   false,
            inside_true:        false,
            anchor:             true,
        }
    }

    /// A bug with no idea where it is; its estimate starts at the origin.
    pub fn lost(id: AgentId, position: Vec2) -> Self {
        Self {
            id,
            real_position:      position,
            perceived_position: Vec2::ZERO,
            localized:          false,
            inside_estimated:   false,
            inside_true:        false,
            anchor:             false,
        }
    }

    /// `true` if the bug was seeded with its true position.
    #[inline]
    pub fn is_anchor(&self) -> bool {
        self.anchor
    }

    #[inline]
    pub fn is_lost(&self) -> bool {
        !self.localized
    }

    pub fn status(&self) -> BugStatus {
        match (self.localized, self.inside_estimated) {
            (false, _)    => BugStatus::Lost,
            (true, true)  => BugStatus::Inside,
            (true, false) => BugStatus::Outside,
        }
    }

    /// Adopt a position estimate and become localized.
    pub fn localize(&mut self, estimate: Vec2) {
        self.perceived_position = estimate;
        self.localized = true;
    }

    /// Apply a movement delta.  Execution is exact, so both the estimate and
    /// the ground truth shift by the same amount.
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.perceived_position += delta;
        self.real_position += delta;
    }

    /// Estimation error: distance between estimate and truth.
    #[inline]
    pub fn position_error(&self) -> f64 {
        self.perceived_position.distance(self.real_position)
    }
}
