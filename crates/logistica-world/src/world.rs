use crate::error::WorldError;
use crate::field::FieldStorage;
use crate::lifecycle::{LifecycleStage, StageKind};
use crate::spatial::SpatialIndex;
use logistica_core::{Coordinate, EntityId};
use slotmap::SlotMap;
use tracing::debug;

/// The mutable store of simulation entities.
///
/// Owns the entity handles, their field tables and the spatial index that
/// mirrors the position field. Not thread-safe for mutation; a single owner
/// (normally [`crate::Simulation`]) serializes all writes.
#[derive(Debug, Default)]
pub struct World {
    entities: SlotMap<EntityId, ()>,
    pub(crate) fields: FieldStorage,
    spatial: SpatialIndex,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Entities --

    /// Create a bare entity, indexed under `position` if given. No lifecycle
    /// stage is attached.
    pub fn create_entity(&mut self, position: Option<Coordinate>) -> EntityId {
        let entity = self.entities.insert(());
        if let Some(position) = position {
            self.fields.positions.insert(entity, position);
            self.spatial.register(entity, position.cell());
        }
        debug!(?entity, ?position, "entity created");
        entity
    }

    /// Detach every field of an entity and drop it from the spatial index.
    pub fn remove_entity(&mut self, entity: EntityId) -> Result<(), WorldError> {
        if !self.entities.contains_key(entity) {
            return Err(WorldError::EntityNotFound(entity));
        }
        if let Some(position) = self.fields.position(entity) {
            self.spatial.deregister(entity, position.cell());
        }
        self.fields.remove_entity(entity);
        self.entities.remove(entity);
        debug!(?entity, "entity removed");
        Ok(())
    }

    /// Set an entity's position, re-indexing it under the new cell.
    pub fn move_entity(&mut self, entity: EntityId, to: Coordinate) -> Result<(), WorldError> {
        self.ensure_exists(entity)?;
        if let Some(from) = self.fields.positions.insert(entity, to) {
            self.spatial.deregister(entity, from.cell());
        }
        self.spatial.register(entity, to.cell());
        Ok(())
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys()
    }

    pub(crate) fn ensure_exists(&self, entity: EntityId) -> Result<(), WorldError> {
        if self.contains(entity) {
            Ok(())
        } else {
            Err(WorldError::EntityNotFound(entity))
        }
    }

    // -- Fields --

    pub fn fields(&self) -> &FieldStorage {
        &self.fields
    }

    /// Mutable access to the free-form field tables. Position, waypoint and
    /// lifecycle fields stay read-only through this handle.
    pub fn fields_mut(&mut self) -> &mut FieldStorage {
        &mut self.fields
    }

    pub fn position(&self, entity: EntityId) -> Option<Coordinate> {
        self.fields.position(entity)
    }

    pub fn name(&self, entity: EntityId) -> Option<&str> {
        self.fields.names.get(entity).map(String::as_str)
    }

    pub fn stage(&self, entity: EntityId) -> Option<&LifecycleStage> {
        self.fields.stage(entity)
    }

    pub fn stage_kind(&self, entity: EntityId) -> Option<StageKind> {
        self.stage(entity).map(LifecycleStage::kind)
    }

    /// Built and in service: no lifecycle stage and a condition field.
    pub fn is_operational(&self, entity: EntityId) -> bool {
        self.stage(entity).is_none() && self.fields.conditions.contains_key(entity)
    }

    // -- Spatial --

    /// Entities in the cell of `coordinate`.
    pub fn get_at(&self, coordinate: Coordinate) -> &[EntityId] {
        self.spatial.get_at(coordinate.cell())
    }

    /// Entities in the cell rectangle spanned by two corners, row-major.
    pub fn get_in_rectangle(
        &self,
        corner_a: Coordinate,
        corner_b: Coordinate,
    ) -> impl Iterator<Item = EntityId> + '_ {
        self.spatial.get_in_rectangle(corner_a.cell(), corner_b.cell())
    }

    pub fn spatial(&self) -> &SpatialIndex {
        &self.spatial
    }
}
