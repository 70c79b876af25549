//! Construction projects and their material requirements.

use crate::world::World;
use logistica_core::{Coordinate, EntityId, GalacticDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How much material building something takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionConfig {
    /// Real-world length of one grid cell.
    pub meters_per_cell: f64,
    /// Item id -> quantity per kilometre of edge.
    pub edge_items_per_km: BTreeMap<String, f64>,
    /// Item id -> fixed quantity for any non-edge entity.
    pub node_items: BTreeMap<String, u32>,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            meters_per_cell: 1000.0,
            edge_items_per_km: BTreeMap::from([("res_stainless_steel_plate".to_string(), 10.0)]),
            node_items: BTreeMap::from([("res_stainless_steel_plate".to_string(), 50)]),
        }
    }
}

impl ConstructionConfig {
    /// Required quantity per item to build `entity`.
    ///
    /// Edges scale with their planar polyline length
    /// (node A, waypoints in order, node B); everything else uses the fixed
    /// node table.
    pub fn estimate(&self, world: &World, entity: EntityId) -> BTreeMap<String, u32> {
        if !world.fields().is_edge(entity) {
            return self.node_items.clone();
        }
        let km = edge_length_cells(world, entity) * self.meters_per_cell / 1000.0;
        self.edge_items_per_km
            .iter()
            .map(|(item, per_km)| (item.clone(), (km * per_km).ceil() as u32))
            .collect()
    }
}

/// Planar length of an edge's polyline in grid cells. Unpositioned points
/// are skipped.
pub fn edge_length_cells(world: &World, edge: EntityId) -> f64 {
    let fields = world.fields();
    let Some(ends) = fields.edges.get(edge) else {
        return 0.0;
    };
    let points: Vec<Coordinate> = std::iter::once(ends.node_a)
        .chain(fields.waypoints(edge).iter().copied())
        .chain(std::iter::once(ends.node_b))
        .filter_map(|e| fields.position(e))
        .collect();
    points
        .windows(2)
        .map(|pair| pair[0].plane_distance_squared_to(&pair[1]).sqrt())
        .sum()
}

/// Material ledger of an entity under construction.
///
/// `required` and `delivered` always share the same keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionProject {
    required: BTreeMap<String, u32>,
    delivered: BTreeMap<String, u32>,
    started_at: GalacticDateTime,
}

impl ConstructionProject {
    pub fn new(required: BTreeMap<String, u32>, started_at: GalacticDateTime) -> Self {
        let delivered = required.keys().map(|item| (item.clone(), 0)).collect();
        Self {
            required,
            delivered,
            started_at,
        }
    }

    pub fn required(&self) -> &BTreeMap<String, u32> {
        &self.required
    }

    pub fn delivered(&self) -> &BTreeMap<String, u32> {
        &self.delivered
    }

    pub fn started_at(&self) -> GalacticDateTime {
        self.started_at
    }

    /// Outstanding quantity of `item`, or `None` if it is not required.
    pub fn remaining(&self, item: &str) -> Option<u32> {
        let required = self.required.get(item)?;
        let delivered = self.delivered.get(item).copied().unwrap_or(0);
        Some(required.saturating_sub(delivered))
    }

    pub fn is_fulfilled(&self) -> bool {
        self.required
            .keys()
            .all(|item| self.remaining(item) == Some(0))
    }

    /// Book a delivery, capped at the outstanding amount. Returns the
    /// quantity accepted, or `None` if the item is not required.
    pub(crate) fn deliver(&mut self, item: &str, quantity: u32) -> Option<u32> {
        let accepted = quantity.min(self.remaining(item)?);
        *self.delivered.entry(item.to_string()).or_insert(0) += accepted;
        Some(accepted)
    }
}
