//! Logistica Core -- value types shared by every Logistica crate.
//!
//! Nothing in here owns state. The catalog and the world store build on
//! these primitives:
//!
//! - [`coordinate::Coordinate`] -- a 3-D integer grid position. The spatial
//!   index keys on its planar [`coordinate::GridCell`] only.
//! - [`time::GalacticDateTime`] -- a minute-resolution timestamp on a fixed
//!   360-day calendar (12 months of 30 days, no leap years).
//! - [`id::EntityId`] -- a stable generational handle into the world store.

pub mod coordinate;
pub mod id;
pub mod time;

pub use coordinate::{Coordinate, GridCell};
pub use id::EntityId;
pub use time::GalacticDateTime;
