//! `sw-behavior` — what a bug decides to do each tick.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`intent`]   | `Intent` enum (`Localize`, `ShapeStatus`, `Move`, `Cull`)      |
//! | [`context`]  | `StepContext<'a>` — read-only view of the environment          |
//! | [`model`]    | `SwarmBehavior` trait                                          |
//! | [`localize`] | Gradient-descent trilateration from three localized neighbours |
//! | [`movement`] | Random exploration, repulsion vector, repair search            |
//! | [`bug`]      | `BugBehavior` — the per-tick decision state machine            |
//! | [`noop`]     | `NoopBehavior` — placeholder that never produces intents       |
//!
//! # Design notes
//!
//! A step is split in two, as in the rest of the workspace:
//!
//! 1. **Decide**: `SwarmBehavior::step` reads the environment through
//!    `&StepContext` and returns the bug's intents.  No mutation.
//! 2. **Apply**: the driver (sw-sim) applies those intents to the bug before
//!    the next bug decides, so later bugs in a tick observe earlier moves.

pub mod bug;
pub mod context;
pub mod intent;
pub mod localize;
pub mod model;
pub mod movement;
pub mod noop;


pub use bug::BugBehavior;
pub use context::StepContext;
pub use intent::Intent;
pub use localize::{AnchorReading, estimate_position, try_localize};
pub use model::SwarmBehavior;
pub use movement::{random_move, repair_move, repulsion_vector};
pub use noop::NoopBehavior;
