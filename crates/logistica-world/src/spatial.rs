//! Coordinate-keyed lookup of entities.
//!
//! The index is derived data: the authoritative location of an entity is its
//! position field. [`crate::World`] keeps the two in step; nothing else
//! writes to the index.

use logistica_core::{EntityId, GridCell};
use std::collections::HashMap;

/// Maps planar grid cells to the entities positioned in them.
///
/// Height is not part of the key, so entities stacked at different heights
/// over one cell share a bucket. Buckets keep registration order and empty
/// buckets are dropped.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    cells: HashMap<GridCell, Vec<EntityId>>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entity: EntityId, cell: GridCell) {
        self.cells.entry(cell).or_default().push(entity);
    }

    /// Remove `entity` from `cell`. Returns whether it was there.
    pub fn deregister(&mut self, entity: EntityId, cell: GridCell) -> bool {
        let Some(bucket) = self.cells.get_mut(&cell) else {
            return false;
        };
        let Some(slot) = bucket.iter().position(|&e| e == entity) else {
            return false;
        };
        bucket.remove(slot);
        if bucket.is_empty() {
            self.cells.remove(&cell);
        }
        true
    }

    // -- Queries --

    /// Entities in one cell, in registration order.
    pub fn get_at(&self, cell: GridCell) -> &[EntityId] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every entity in the inclusive cell rectangle spanned by two corners,
    /// scanned row by row (y outer, x inner). Lazy; each call rescans.
    pub fn get_in_rectangle(
        &self,
        corner_a: GridCell,
        corner_b: GridCell,
    ) -> impl Iterator<Item = EntityId> + '_ {
        let (min_x, max_x) = (corner_a.x.min(corner_b.x), corner_a.x.max(corner_b.x));
        let (min_y, max_y) = (corner_a.y.min(corner_b.y), corner_a.y.max(corner_b.y));
        (min_y..=max_y)
            .flat_map(move |y| (min_x..=max_x).map(move |x| GridCell::new(x, y)))
            .flat_map(move |cell| self.get_at(cell).iter().copied())
    }

    // -- Stats --

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of registrations across all cells.
    pub fn entity_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}
