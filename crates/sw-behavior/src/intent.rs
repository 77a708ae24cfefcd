//! Bug intents — the state changes a bug requests during its step.

use sw_core::Vec2;

/// A change a bug wants applied to itself this tick.
///
/// Intents are produced by [`SwarmBehavior::step`][crate::SwarmBehavior::step]
/// and applied by the driver in the order returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Adopt `estimate` as the perceived position and become localized.
    Localize(Vec2),

    /// Record the freshly computed shape membership of the perceived and the
    /// real position.
    ShapeStatus {
        inside_estimated: bool,
        inside_true:      bool,
    },

    /// Translate both positions by the given delta.
    Move(Vec2),

    /// Leave the swarm permanently.  Nothing after this is applied.
    Cull,
}
