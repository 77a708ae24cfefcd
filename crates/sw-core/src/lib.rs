//! `sw-core` — foundational types for the swarm shape-formation simulator.
//!
//! This crate is a dependency of every other `sw-*` crate.  It has no `sw-*`
//! dependencies and few external ones (`rand`, `thiserror`, `serde`,
//! `serde_json`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`                                                  |
//! | [`geom`]   | `Vec2`, Euclidean distance                                 |
//! | [`time`]   | `Tick`                                                     |
//! | [`rng`]    | `AgentRng` (per-agent), `SimRng` (initialization)          |
//! | [`shape`]  | `ShapeForm`, `OutsidePolicy`, `ShapeTransition`            |
//! | [`config`] | `SwarmConfig`, `DescentConfig`, `DescentMode`, `NeighborCap` |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod shape;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DescentConfig, DescentMode, NeighborCap, SwarmConfig};
pub use error::{CoreError, CoreResult};
pub use geom::Vec2;
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use shape::{OutsidePolicy, ShapeForm, ShapeTransition};
pub use time::Tick;
