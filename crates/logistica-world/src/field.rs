use crate::lifecycle::LifecycleStage;
use logistica_core::{Coordinate, EntityId};
use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

// ---------------------------------------------------------------------------
// Marker kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndustryKind {
    Refinery,
    Smelter,
    RecyclingPlant,
    AlloyForge,
    FormingMill,
    MachineShop,
    AssemblyPlant,
    ScrapYard,
    Warehouse,
    DistributionCenter,
    RetailCenter,
    Farm,
    Mine,
    Quarry,
    LumberMill,
    OilRig,
    PowerPlant,
}

/// What a node entity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    City,
    Junction,
    Waypoint,
    TrainStation,
    BusStation,
    Platform,
    Industry(IndustryKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    RailTrack,
    Road,
    Sealane,
    Airway,
    Pipeline,
    Canal,
    Highway,
    Freeway,
    Overpass,
    Underpass,
    Bridge,
    Tunnel,
}

/// Permitted direction of travel along an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeDirection {
    #[default]
    Both,
    AToB,
    BToA,
}

// ---------------------------------------------------------------------------
// Field payloads
// ---------------------------------------------------------------------------

/// The two endpoint nodes of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub node_a: EntityId,
    pub node_b: EntityId,
}

impl Edge {
    /// The endpoint opposite `node`, if `node` is an endpoint.
    pub fn other(&self, node: EntityId) -> Option<EntityId> {
        if node == self.node_a {
            Some(self.node_b)
        } else if node == self.node_b {
            Some(self.node_a)
        } else {
            None
        }
    }
}

/// Structural condition in percent. Present on operational entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition(pub f64);

impl Condition {
    pub const PRISTINE: Condition = Condition(100.0);
}

/// Unit of an engine's efficiency figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EfficiencyType {
    /// Percent of input energy delivered as work.
    Percentage,
    /// Grams of fuel per kWh.
    SpecificFuelConsumption,
    /// Seconds.
    SpecificImpulse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub max_power_kw: f64,
    /// Resource ids the engine draws on.
    pub consumes: Vec<String>,
    pub efficiency: f64,
    pub efficiency_type: EfficiencyType,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chassis {
    pub length_meters: f64,
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// SoA field storage. Each field kind has its own SecondaryMap keyed by
/// EntityId, so presence of a field is an O(1) lookup.
///
/// Position, waypoint lists, waypoint indices and lifecycle stages are
/// mirrored in other structures (the spatial index, each other) and can only
/// be changed through [`crate::World`] and [`crate::LifecycleManager`].
#[derive(Debug, Default)]
pub struct FieldStorage {
    pub names: SecondaryMap<EntityId, String>,
    pub parents: SecondaryMap<EntityId, EntityId>,
    pub node_kinds: SecondaryMap<EntityId, NodeKind>,
    pub edge_kinds: SecondaryMap<EntityId, EdgeKind>,
    pub edges: SecondaryMap<EntityId, Edge>,
    pub directions: SecondaryMap<EntityId, EdgeDirection>,
    /// Node -> incident edges, in planning order.
    pub connections: SecondaryMap<EntityId, Vec<EntityId>>,
    pub conditions: SecondaryMap<EntityId, Condition>,
    pub engines: SecondaryMap<EntityId, Engine>,
    pub chassis: SecondaryMap<EntityId, Chassis>,
    pub(crate) positions: SecondaryMap<EntityId, Coordinate>,
    /// Edge -> ordered waypoint nodes.
    pub(crate) waypoints: SecondaryMap<EntityId, Vec<EntityId>>,
    /// Waypoint node -> its index in the parent edge's list.
    pub(crate) index_positions: SecondaryMap<EntityId, usize>,
    pub(crate) stages: SecondaryMap<EntityId, LifecycleStage>,
}

impl FieldStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self, entity: EntityId) -> Option<Coordinate> {
        self.positions.get(entity).copied()
    }

    /// Ordered waypoints of an edge. Empty for non-edges.
    pub fn waypoints(&self, edge: EntityId) -> &[EntityId] {
        self.waypoints.get(edge).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn index_position(&self, waypoint: EntityId) -> Option<usize> {
        self.index_positions.get(waypoint).copied()
    }

    pub fn stage(&self, entity: EntityId) -> Option<&LifecycleStage> {
        self.stages.get(entity)
    }

    pub fn is_node(&self, entity: EntityId) -> bool {
        self.node_kinds.contains_key(entity)
    }

    pub fn is_edge(&self, entity: EntityId) -> bool {
        self.edges.contains_key(entity)
    }

    /// Remove every field of an entity.
    pub(crate) fn remove_entity(&mut self, entity: EntityId) {
        self.names.remove(entity);
        self.parents.remove(entity);
        self.node_kinds.remove(entity);
        self.edge_kinds.remove(entity);
        self.edges.remove(entity);
        self.directions.remove(entity);
        self.connections.remove(entity);
        self.conditions.remove(entity);
        self.engines.remove(entity);
        self.chassis.remove(entity);
        self.positions.remove(entity);
        self.waypoints.remove(entity);
        self.index_positions.remove(entity);
        self.stages.remove(entity);
    }
}
