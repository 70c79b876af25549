use crate::lifecycle::StageKind;
use logistica_catalog::CatalogError;
use logistica_core::EntityId;

/// Errors from world-store, planning, and lifecycle operations.
///
/// Every fallible operation validates before mutating, so an `Err` always
/// means the world is unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("entity {0:?} does not exist")]
    EntityNotFound(EntityId),

    #[error("cannot {operation} entity {entity:?} in stage {found:?}")]
    InvalidState {
        entity: EntityId,
        operation: &'static str,
        /// `None` when the entity carries no lifecycle stage (operational).
        found: Option<StageKind>,
    },

    #[error("entity {0:?} is not a node")]
    NotANode(EntityId),

    #[error("entity {0:?} is not an edge")]
    NotAnEdge(EntityId),

    #[error("waypoint list for edge {edge:?} is not a permutation of its current waypoints")]
    WaypointMismatch { edge: EntityId },

    #[error("entity {entity:?} does not require '{item}'")]
    NotRequired { entity: EntityId, item: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
