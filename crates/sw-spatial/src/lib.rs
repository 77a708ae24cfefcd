//! `sw-spatial` — the environment every bug senses through.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`environment`] | `Environment` (config + shape state + `BugStore`)       |
//! | [`error`]       | `SpatialError`, `SpatialResult<T>`                      |
//!
//! # Query semantics
//!
//! Neighbour queries scan the collection in order and are truncated by the
//! configured [`NeighborCap`](sw_core::NeighborCap), so *which* neighbours a
//! bug sees depends on collection order.  A spatial index would return a
//! different subset; the linear scan is deliberate.

pub mod environment;
pub mod error;


pub use environment::Environment;
pub use error::{SpatialError, SpatialResult};
