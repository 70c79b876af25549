//! Logistica World -- entities, their fields, and how they get built.
//!
//! The world store is a set of sparse field tables keyed by generational
//! [`EntityId`](logistica_core::EntityId) handles, plus a spatial index that
//! mirrors the position field. On top of it sit:
//!
//! - [`planning`] -- create nodes, industries, edges with waypoints, and
//!   vehicle components. Everything planned starts in the Planned stage.
//! - [`lifecycle::LifecycleManager`] -- the guarded construction state
//!   machine from Planned through demolition.
//! - [`construction`] -- material requirements of a construction project.
//! - [`instance::Simulation`] -- a shared catalog, one world and the clock.
//!
//! # Mutation
//!
//! Positions only change through [`World::move_entity`], which keeps the
//! spatial index in step:
//!
//! ```rust,ignore
//! let depot = world.plan_train_station(Coordinate::new(4, 2), "Depot");
//! world.move_entity(depot, Coordinate::new(5, 2))?;
//! assert_eq!(world.get_at(Coordinate::new(5, 2)), &[depot]);
//! ```
//!
//! The world is not synchronized; a single owner serializes all writes.

pub mod config;
pub mod construction;
pub mod error;
pub mod field;
pub mod instance;
pub mod lifecycle;
pub mod planning;
pub mod scenario;
pub mod spatial;
pub mod world;

pub use config::SimulationConfig;
pub use construction::{ConstructionConfig, ConstructionProject};
pub use error::WorldError;
pub use field::{
    Chassis, Condition, Edge, EdgeDirection, EdgeKind, EfficiencyType, Engine, FieldStorage,
    IndustryKind, NodeKind,
};
pub use instance::Simulation;
pub use lifecycle::{LifecycleManager, LifecycleStage, StageKind};
pub use spatial::SpatialIndex;
pub use world::World;
