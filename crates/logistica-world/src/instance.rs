//! A running simulation: shared catalog, owned world and the clock.

use crate::config::SimulationConfig;
use crate::error::WorldError;
use crate::lifecycle::LifecycleManager;
use crate::world::World;
use logistica_catalog::Catalog;
use logistica_core::{EntityId, GalacticDateTime};
use std::sync::Arc;
use tracing::debug;

/// One simulation instance.
///
/// The catalog is immutable and may be shared with other instances or
/// reader threads. The world is owned here; every mutation goes through
/// `&mut self`.
#[derive(Debug)]
pub struct Simulation {
    catalog: Arc<Catalog>,
    world: World,
    lifecycle: LifecycleManager,
    now: GalacticDateTime,
    minutes_per_tick: i64,
    tick_count: u64,
}

impl Simulation {
    pub fn new(catalog: Arc<Catalog>, config: SimulationConfig) -> Self {
        Self {
            catalog,
            world: World::new(),
            lifecycle: LifecycleManager::new(config.construction),
            now: config.start_time,
            minutes_per_tick: config.minutes_per_tick,
            tick_count: 0,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    pub fn now(&self) -> GalacticDateTime {
        self.now
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Advance the clock by one tick.
    pub fn tick(&mut self) {
        self.now = self.now.add_minutes(self.minutes_per_tick);
        self.tick_count += 1;
        debug!(tick = self.tick_count, now = %self.now, "tick");
    }

    // -- Planning and lifecycle --

    pub fn plan_vehicle_component(
        &mut self,
        component_id: &str,
        parent: EntityId,
    ) -> Result<EntityId, WorldError> {
        self.world
            .plan_vehicle_component(&self.catalog, component_id, parent)
    }

    /// Approve a completed survey; the project is stamped with the current
    /// clock.
    pub fn approve_survey(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle
            .approve_survey(&mut self.world, entity, self.now)
    }

    /// Start a scheduled construction; the project is stamped with the
    /// current clock.
    pub fn start_construction(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle
            .start_construction(&mut self.world, entity, self.now)
    }

    pub fn begin_survey(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle.begin_survey(&mut self.world, entity)
    }

    pub fn complete_survey(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle.complete_survey(&mut self.world, entity)
    }

    pub fn schedule_construction(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle.schedule_construction(&mut self.world, entity)
    }

    pub fn halt_construction(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle.halt_construction(&mut self.world, entity)
    }

    pub fn resume_construction(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle.resume_construction(&mut self.world, entity)
    }

    pub fn record_delivery(
        &mut self,
        entity: EntityId,
        item: &str,
        quantity: u32,
    ) -> Result<u32, WorldError> {
        self.lifecycle
            .record_delivery(&mut self.world, entity, item, quantity)
    }

    pub fn complete_construction(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle.complete_construction(&mut self.world, entity)
    }

    pub fn retire(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle.retire(&mut self.world, entity)
    }

    pub fn prepare_demolition(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle.prepare_demolition(&mut self.world, entity)
    }

    pub fn start_demolition(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle.start_demolition(&mut self.world, entity)
    }

    pub fn complete_demolition(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle.complete_demolition(&mut self.world, entity)
    }

    pub fn revert_to_planned(&mut self, entity: EntityId) -> Result<(), WorldError> {
        self.lifecycle.revert_to_planned(&mut self.world, entity)
    }
}
