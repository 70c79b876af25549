//! Planning helpers: every entity created here starts in the Planned stage.

use crate::error::WorldError;
use crate::field::{
    Chassis, Edge, EdgeDirection, EdgeKind, EfficiencyType, Engine, IndustryKind, NodeKind,
};
use crate::lifecycle::{LifecycleStage, StageKind};
use crate::world::World;
use logistica_catalog::Catalog;
use logistica_catalog::specification::{
    ChassisSpecification, CombustionEngineSpecification, ElectricMotorSpecification,
    RocketEngineSpecification,
};
use logistica_core::{Coordinate, EntityId};
use std::collections::HashSet;

/// Resource drawn by electric motors.
pub const ELECTRICITY_RESOURCE_ID: &str = "util_electricity_kwh";

impl World {
    fn plan_entity(&mut self, position: Option<Coordinate>) -> EntityId {
        let entity = self.create_entity(position);
        self.fields.stages.insert(entity, LifecycleStage::Planned);
        entity
    }

    // -- Nodes --

    pub fn plan_node(&mut self, position: Coordinate, kind: NodeKind, name: &str) -> EntityId {
        let node = self.plan_entity(Some(position));
        self.fields.node_kinds.insert(node, kind);
        self.fields.names.insert(node, name.to_string());
        self.fields.connections.insert(node, Vec::new());
        node
    }

    pub fn plan_city(&mut self, position: Coordinate, name: &str) -> EntityId {
        self.plan_node(position, NodeKind::City, name)
    }

    pub fn plan_train_station(&mut self, position: Coordinate, name: &str) -> EntityId {
        self.plan_node(position, NodeKind::TrainStation, name)
    }

    pub fn plan_bus_station(&mut self, position: Coordinate, name: &str) -> EntityId {
        self.plan_node(position, NodeKind::BusStation, name)
    }

    pub fn plan_industry(
        &mut self,
        position: Coordinate,
        name: &str,
        kind: IndustryKind,
    ) -> EntityId {
        self.plan_node(position, NodeKind::Industry(kind), name)
    }

    fn plan_waypoint(&mut self, position: Coordinate, index: usize, edge: EntityId) -> EntityId {
        let waypoint = self.plan_entity(Some(position));
        self.fields.node_kinds.insert(waypoint, NodeKind::Waypoint);
        self.fields.index_positions.insert(waypoint, index);
        self.fields.parents.insert(waypoint, edge);
        waypoint
    }

    // -- Edges --

    /// Plan a connector between two nodes, with one waypoint node per
    /// intermediate coordinate. The edge is appended to both endpoints'
    /// connection lists.
    pub fn plan_edge(
        &mut self,
        node_a: EntityId,
        node_b: EntityId,
        kind: EdgeKind,
        direction: EdgeDirection,
        waypoints: &[Coordinate],
    ) -> Result<EntityId, WorldError> {
        for node in [node_a, node_b] {
            self.ensure_exists(node)?;
            if !self.fields.is_node(node) {
                return Err(WorldError::NotANode(node));
            }
        }

        let edge = self.plan_entity(None);
        self.fields.edges.insert(edge, Edge { node_a, node_b });
        self.fields.edge_kinds.insert(edge, kind);
        self.fields.directions.insert(edge, direction);

        let ids: Vec<EntityId> = waypoints
            .iter()
            .enumerate()
            .map(|(index, &position)| self.plan_waypoint(position, index, edge))
            .collect();
        self.fields.waypoints.insert(edge, ids);

        for node in [node_a, node_b] {
            if let Some(connections) = self.fields.connections.get_mut(node) {
                if !connections.contains(&edge) {
                    connections.push(edge);
                }
            }
        }
        Ok(edge)
    }

    pub fn plan_rail_track(
        &mut self,
        node_a: EntityId,
        node_b: EntityId,
        direction: EdgeDirection,
        waypoints: &[Coordinate],
    ) -> Result<EntityId, WorldError> {
        self.plan_edge(node_a, node_b, EdgeKind::RailTrack, direction, waypoints)
    }

    /// Roads are always two-way.
    pub fn plan_road(
        &mut self,
        node_a: EntityId,
        node_b: EntityId,
        waypoints: &[Coordinate],
    ) -> Result<EntityId, WorldError> {
        self.plan_edge(node_a, node_b, EdgeKind::Road, EdgeDirection::Both, waypoints)
    }

    fn ensure_editable_edge(
        &self,
        edge: EntityId,
        operation: &'static str,
    ) -> Result<(), WorldError> {
        self.ensure_exists(edge)?;
        if !self.fields.is_edge(edge) {
            return Err(WorldError::NotAnEdge(edge));
        }
        match self.stage_kind(edge) {
            Some(StageKind::Planned | StageKind::SurveyComplete) => Ok(()),
            found => Err(WorldError::InvalidState {
                entity: edge,
                operation,
                found,
            }),
        }
    }

    fn restamp_waypoints(&mut self, edge: EntityId, from: usize) {
        let Some(ids) = self.fields.waypoints.get(edge) else {
            return;
        };
        for (index, &waypoint) in ids.iter().enumerate().skip(from) {
            self.fields.index_positions.insert(waypoint, index);
        }
    }

    /// Drop a waypoint from its parent edge's list and close the gap.
    pub(crate) fn detach_waypoint(&mut self, waypoint: EntityId) {
        let Some(&edge) = self.fields.parents.get(waypoint) else {
            return;
        };
        let Some(ids) = self.fields.waypoints.get_mut(edge) else {
            return;
        };
        let Some(slot) = ids.iter().position(|&w| w == waypoint) else {
            return;
        };
        ids.remove(slot);
        self.restamp_waypoints(edge, slot);
    }

    /// Insert a waypoint at `index`, clamped to `0..=len`. Only while the
    /// edge is Planned or SurveyComplete.
    pub fn insert_waypoint(
        &mut self,
        edge: EntityId,
        position: Coordinate,
        index: usize,
    ) -> Result<EntityId, WorldError> {
        self.ensure_editable_edge(edge, "insert waypoint")?;
        let index = index.min(self.fields.waypoints(edge).len());
        let waypoint = self.plan_waypoint(position, index, edge);
        if let Some(ids) = self.fields.waypoints.get_mut(edge) {
            ids.insert(index, waypoint);
        }
        self.restamp_waypoints(edge, index + 1);
        Ok(waypoint)
    }

    /// Replace an edge's waypoint order. `ordered` must be a permutation of
    /// the current waypoints. Only while the edge is Planned or
    /// SurveyComplete.
    pub fn reorder_waypoints(
        &mut self,
        edge: EntityId,
        ordered: &[EntityId],
    ) -> Result<(), WorldError> {
        self.ensure_editable_edge(edge, "reorder waypoints")?;
        let current = self.fields.waypoints(edge);
        let current_set: HashSet<EntityId> = current.iter().copied().collect();
        let ordered_set: HashSet<EntityId> = ordered.iter().copied().collect();
        if ordered.len() != current.len()
            || ordered_set.len() != ordered.len()
            || ordered_set != current_set
        {
            return Err(WorldError::WaypointMismatch { edge });
        }
        self.fields.waypoints.insert(edge, ordered.to_vec());
        self.restamp_waypoints(edge, 0);
        Ok(())
    }

    // -- Vehicle components --

    /// Plan a vehicle part built from a catalog component, attached to
    /// `parent`. Engine and chassis fields come from the component's
    /// specifications.
    pub fn plan_vehicle_component(
        &mut self,
        catalog: &Catalog,
        component_id: &str,
        parent: EntityId,
    ) -> Result<EntityId, WorldError> {
        let component = catalog.component(component_id)?;
        self.ensure_exists(parent)?;

        let engine = if let Some(motor) =
            catalog.specification::<ElectricMotorSpecification>(component_id)
        {
            Some(Engine {
                max_power_kw: motor.max_power_kw,
                consumes: vec![ELECTRICITY_RESOURCE_ID.to_string()],
                efficiency: motor.efficiency_percent,
                efficiency_type: EfficiencyType::Percentage,
            })
        } else if let Some(combustion) =
            catalog.specification::<CombustionEngineSpecification>(component_id)
        {
            Some(Engine {
                max_power_kw: combustion.max_power_kw,
                consumes: combustion.fuel_types.iter().map(|f| f.resource_id.clone()).collect(),
                efficiency: combustion.specific_fuel_consumption_grams_per_kwh,
                efficiency_type: EfficiencyType::SpecificFuelConsumption,
            })
        } else {
            catalog
                .specification::<RocketEngineSpecification>(component_id)
                .map(|rocket| Engine {
                    max_power_kw: rocket.max_power_kw,
                    consumes: rocket.fuel_types.iter().map(|f| f.resource_id.clone()).collect(),
                    efficiency: rocket.specific_impulse_seconds,
                    efficiency_type: EfficiencyType::SpecificImpulse,
                })
        };

        let entity = self.plan_entity(None);
        self.fields.names.insert(entity, component.name.clone());
        self.fields.parents.insert(entity, parent);
        if let Some(engine) = engine {
            self.fields.engines.insert(entity, engine);
        }
        if let Some(chassis) = catalog.specification::<ChassisSpecification>(component_id) {
            self.fields.chassis.insert(
                entity,
                Chassis {
                    length_meters: chassis.length_meters,
                },
            );
        }
        Ok(entity)
    }
}
