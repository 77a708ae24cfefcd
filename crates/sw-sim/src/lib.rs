//! `sw-sim` — tick loop orchestrator for the swarm simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Schedule — apply any shape transition due at this tick
//!                (form + outside policy), exactly once.
//!   ② Snapshot — record the live ids in collection order.
//!   ③ Steps    — for each recorded id still alive:
//!                  SwarmBehavior::step(bug, ctx, rng) → intents
//!                  apply intents immediately (Localize, ShapeStatus,
//!                  Move, Cull)
//!   ④ Summary  — population / localized / inside counts.
//! ```
//!
//! Steps are strictly sequential: a bug processed later in a tick sees the
//! positions of bugs processed earlier in the same tick.  Culled bugs leave a
//! tombstone, so the id snapshot taken in ② never skips or revisits a bug.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sw_behavior::BugBehavior;
//! use sw_core::SwarmConfig;
//! use sw_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SwarmConfig::default(), BugBehavior).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{AgentSnapshot, SwarmSnapshot, TickSummary};
