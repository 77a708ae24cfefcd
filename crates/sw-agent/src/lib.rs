//! `sw-agent` — per-bug state and its storage.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`bug`]   | `Bug` — real/perceived position and localization status       |
//! | [`store`] | `BugStore` (ordered, tombstoned collection), `AgentRngs`      |
//!
//! Bugs are addressed by [`AgentId`](sw_core::AgentId).  Ids are assigned
//! sequentially on insertion and a removed bug leaves a tombstone, so the
//! store's iteration order (ascending id) is also insertion order and never
//! shifts while a tick is being processed.

pub mod bug;
pub mod store;


pub use bug::{Bug, BugStatus};
pub use store::{AgentRngs, BugStore};
