//! Guarded construction lifecycle.
//!
//! Planned infrastructure moves through a fixed set of stages. Each entity
//! carries at most one [`LifecycleStage`]; an entity with no stage and a
//! condition field is operational.
//!
//! ```text
//! Planned ──begin_survey──> Surveying ──complete_survey──> SurveyComplete
//! Planned ──schedule_construction──> PendingConstruction
//! SurveyComplete ──approve_survey──> UnderConstruction
//! PendingConstruction ──start_construction──> UnderConstruction
//! UnderConstruction <──halt / resume──> HaltedConstruction
//! UnderConstruction ──complete_construction──> (operational, condition 100%)
//! (operational) ──retire──> Obsolete
//! UnderConstruction | HaltedConstruction | Obsolete ──prepare_demolition──> PendingDemolition
//! PendingDemolition ──start_demolition──> ActiveDemolition
//! ActiveDemolition ──complete_demolition──> (removed)
//! Surveying | SurveyComplete | PendingConstruction ──revert_to_planned──> Planned
//! ```
//!
//! Every transition checks its precondition first and mutates only on
//! success, swapping the stage in a single write.

use crate::construction::{ConstructionConfig, ConstructionProject};
use crate::error::WorldError;
use crate::field::{Condition, NodeKind};
use crate::world::World;
use logistica_core::{EntityId, GalacticDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Payload-free discriminant of [`LifecycleStage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    Planned,
    Surveying,
    SurveyComplete,
    PendingConstruction,
    UnderConstruction,
    HaltedConstruction,
    Obsolete,
    PendingDemolition,
    ActiveDemolition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LifecycleStage {
    Planned,
    Surveying,
    SurveyComplete,
    PendingConstruction,
    UnderConstruction(ConstructionProject),
    HaltedConstruction(ConstructionProject),
    Obsolete,
    PendingDemolition,
    ActiveDemolition,
}

impl LifecycleStage {
    pub fn kind(&self) -> StageKind {
        match self {
            LifecycleStage::Planned => StageKind::Planned,
            LifecycleStage::Surveying => StageKind::Surveying,
            LifecycleStage::SurveyComplete => StageKind::SurveyComplete,
            LifecycleStage::PendingConstruction => StageKind::PendingConstruction,
            LifecycleStage::UnderConstruction(_) => StageKind::UnderConstruction,
            LifecycleStage::HaltedConstruction(_) => StageKind::HaltedConstruction,
            LifecycleStage::Obsolete => StageKind::Obsolete,
            LifecycleStage::PendingDemolition => StageKind::PendingDemolition,
            LifecycleStage::ActiveDemolition => StageKind::ActiveDemolition,
        }
    }

    /// The construction project, while under or halted in construction.
    pub fn project(&self) -> Option<&ConstructionProject> {
        match self {
            LifecycleStage::UnderConstruction(project)
            | LifecycleStage::HaltedConstruction(project) => Some(project),
            _ => None,
        }
    }
}

/// Enforces the legal stage transitions over a [`World`].
#[derive(Debug, Clone, Default)]
pub struct LifecycleManager {
    construction: ConstructionConfig,
}

impl LifecycleManager {
    pub fn new(construction: ConstructionConfig) -> Self {
        Self { construction }
    }

    pub fn construction_config(&self) -> &ConstructionConfig {
        &self.construction
    }

    // -- Survey --

    pub fn begin_survey(&self, world: &mut World, entity: EntityId) -> Result<(), WorldError> {
        transition(world, entity, "begin survey", &[StageKind::Planned], |_| {
            Some(LifecycleStage::Surveying)
        })
    }

    /// Record the outcome of an external survey.
    pub fn complete_survey(&self, world: &mut World, entity: EntityId) -> Result<(), WorldError> {
        transition(world, entity, "complete survey", &[StageKind::Surveying], |_| {
            Some(LifecycleStage::SurveyComplete)
        })
    }

    /// Approve a completed survey and open a construction project sized
    /// from the entity's physical extent.
    pub fn approve_survey(
        &self,
        world: &mut World,
        entity: EntityId,
        now: GalacticDateTime,
    ) -> Result<(), WorldError> {
        check(world, entity, "approve survey", &[StageKind::SurveyComplete])?;
        let project = ConstructionProject::new(self.construction.estimate(world, entity), now);
        transition(world, entity, "approve survey", &[StageKind::SurveyComplete], |_| {
            Some(LifecycleStage::UnderConstruction(project))
        })
    }

    // -- Construction --

    /// Queue construction of infrastructure that needs no survey.
    pub fn schedule_construction(
        &self,
        world: &mut World,
        entity: EntityId,
    ) -> Result<(), WorldError> {
        transition(
            world,
            entity,
            "schedule construction",
            &[StageKind::Planned],
            |_| Some(LifecycleStage::PendingConstruction),
        )
    }

    pub fn start_construction(
        &self,
        world: &mut World,
        entity: EntityId,
        now: GalacticDateTime,
    ) -> Result<(), WorldError> {
        check(world, entity, "start construction", &[StageKind::PendingConstruction])?;
        let project = ConstructionProject::new(self.construction.estimate(world, entity), now);
        transition(
            world,
            entity,
            "start construction",
            &[StageKind::PendingConstruction],
            |_| Some(LifecycleStage::UnderConstruction(project)),
        )
    }

    pub fn halt_construction(&self, world: &mut World, entity: EntityId) -> Result<(), WorldError> {
        transition(
            world,
            entity,
            "halt construction",
            &[StageKind::UnderConstruction],
            |old| match old {
                LifecycleStage::UnderConstruction(project) => {
                    Some(LifecycleStage::HaltedConstruction(project))
                }
                other => Some(other),
            },
        )
    }

    pub fn resume_construction(
        &self,
        world: &mut World,
        entity: EntityId,
    ) -> Result<(), WorldError> {
        transition(
            world,
            entity,
            "resume construction",
            &[StageKind::HaltedConstruction],
            |old| match old {
                LifecycleStage::HaltedConstruction(project) => {
                    Some(LifecycleStage::UnderConstruction(project))
                }
                other => Some(other),
            },
        )
    }

    /// Finish construction: the stage is dropped and the entity becomes
    /// operational at full condition.
    pub fn complete_construction(
        &self,
        world: &mut World,
        entity: EntityId,
    ) -> Result<(), WorldError> {
        transition(
            world,
            entity,
            "complete construction",
            &[StageKind::UnderConstruction],
            |_| None,
        )?;
        world.fields.conditions.insert(entity, Condition::PRISTINE);
        Ok(())
    }

    /// Book delivered material against an active project. Returns the
    /// quantity accepted, capped at what is still outstanding.
    pub fn record_delivery(
        &self,
        world: &mut World,
        entity: EntityId,
        item: &str,
        quantity: u32,
    ) -> Result<u32, WorldError> {
        check(world, entity, "record delivery", &[StageKind::UnderConstruction])?;
        let Some(LifecycleStage::UnderConstruction(project)) = world.fields.stages.get_mut(entity)
        else {
            return Err(invalid(world, entity, "record delivery"));
        };
        let accepted = project
            .deliver(item, quantity)
            .ok_or_else(|| WorldError::NotRequired {
                entity,
                item: item.to_string(),
            })?;
        debug!(?entity, item, quantity, accepted, "construction delivery recorded");
        Ok(accepted)
    }

    // -- Decommissioning --

    /// Take an operational entity out of service.
    pub fn retire(&self, world: &mut World, entity: EntityId) -> Result<(), WorldError> {
        world.ensure_exists(entity)?;
        if !world.is_operational(entity) {
            return Err(invalid(world, entity, "retire"));
        }
        world.fields.stages.insert(entity, LifecycleStage::Obsolete);
        debug!(?entity, to = ?StageKind::Obsolete, "lifecycle transition from operational");
        Ok(())
    }

    pub fn prepare_demolition(
        &self,
        world: &mut World,
        entity: EntityId,
    ) -> Result<(), WorldError> {
        transition(
            world,
            entity,
            "prepare demolition",
            &[
                StageKind::UnderConstruction,
                StageKind::HaltedConstruction,
                StageKind::Obsolete,
            ],
            |_| Some(LifecycleStage::PendingDemolition),
        )
    }

    pub fn start_demolition(&self, world: &mut World, entity: EntityId) -> Result<(), WorldError> {
        transition(
            world,
            entity,
            "start demolition",
            &[StageKind::PendingDemolition],
            |_| Some(LifecycleStage::ActiveDemolition),
        )
    }

    /// Remove a demolished entity. An edge takes its waypoints with it and
    /// is unlinked from its endpoint nodes. A waypoint leaves its edge's
    /// list, and the waypoints after it move up one slot.
    pub fn complete_demolition(
        &self,
        world: &mut World,
        entity: EntityId,
    ) -> Result<(), WorldError> {
        check(world, entity, "complete demolition", &[StageKind::ActiveDemolition])?;

        if world.fields.node_kinds.get(entity) == Some(&NodeKind::Waypoint) {
            world.detach_waypoint(entity);
        }

        if let Some(ends) = world.fields.edges.get(entity).copied() {
            for node in [ends.node_a, ends.node_b] {
                if let Some(connections) = world.fields.connections.get_mut(node) {
                    connections.retain(|&e| e != entity);
                }
            }
            let waypoints = world.fields.waypoints(entity).to_vec();
            for waypoint in waypoints {
                if world.contains(waypoint) {
                    world.remove_entity(waypoint)?;
                }
            }
        }
        world.remove_entity(entity)?;
        debug!(?entity, "demolition complete");
        Ok(())
    }

    // -- Rollback --

    /// Return a pre-construction entity to the drawing board.
    pub fn revert_to_planned(&self, world: &mut World, entity: EntityId) -> Result<(), WorldError> {
        transition(
            world,
            entity,
            "revert to planned",
            &[
                StageKind::Surveying,
                StageKind::SurveyComplete,
                StageKind::PendingConstruction,
            ],
            |_| Some(LifecycleStage::Planned),
        )
    }
}

fn invalid(world: &World, entity: EntityId, operation: &'static str) -> WorldError {
    WorldError::InvalidState {
        entity,
        operation,
        found: world.stage_kind(entity),
    }
}

/// Verify that `entity` exists and is in one of `allowed`.
fn check(
    world: &World,
    entity: EntityId,
    operation: &'static str,
    allowed: &[StageKind],
) -> Result<(), WorldError> {
    world.ensure_exists(entity)?;
    match world.stage_kind(entity) {
        Some(kind) if allowed.contains(&kind) => Ok(()),
        _ => Err(invalid(world, entity, operation)),
    }
}

/// Replace the stage of `entity` with `next(old)`, or drop it when `next`
/// returns `None`.
fn transition(
    world: &mut World,
    entity: EntityId,
    operation: &'static str,
    allowed: &[StageKind],
    next: impl FnOnce(LifecycleStage) -> Option<LifecycleStage>,
) -> Result<(), WorldError> {
    check(world, entity, operation, allowed)?;
    let Some(old) = world.fields.stages.remove(entity) else {
        return Err(invalid(world, entity, operation));
    };
    let from = old.kind();
    let new = next(old);
    let to = new.as_ref().map(LifecycleStage::kind);
    if let Some(stage) = new {
        world.fields.stages.insert(entity, stage);
    }
    debug!(?entity, ?from, ?to, operation, "lifecycle transition");
    Ok(())
}
