//! Integration test: every lifecycle operation against every stage.
//!
//! A transition either succeeds from one of its legal source stages or
//! fails with `InvalidState` naming the current stage and leaves the entity
//! untouched. The table below is checked exhaustively, then random
//! operation sequences are checked against it as a model.

use logistica_catalog::Catalog;
use logistica_catalog::defaults::default_definitions;
use logistica_core::{Coordinate, EntityId};
use logistica_world::{Simulation, SimulationConfig, StageKind, WorldError};
use proptest::prelude::*;
use std::sync::Arc;

// ===========================================================================
// Model
// ===========================================================================

/// `None` stands for operational (built, no stage).
type State = Option<StageKind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    BeginSurvey,
    CompleteSurvey,
    ApproveSurvey,
    ScheduleConstruction,
    StartConstruction,
    HaltConstruction,
    ResumeConstruction,
    CompleteConstruction,
    Retire,
    PrepareDemolition,
    StartDemolition,
    RevertToPlanned,
}

const ALL_OPS: [Op; 12] = [
    Op::BeginSurvey,
    Op::CompleteSurvey,
    Op::ApproveSurvey,
    Op::ScheduleConstruction,
    Op::StartConstruction,
    Op::HaltConstruction,
    Op::ResumeConstruction,
    Op::CompleteConstruction,
    Op::Retire,
    Op::PrepareDemolition,
    Op::StartDemolition,
    Op::RevertToPlanned,
];

const ALL_STATES: [State; 10] = [
    Some(StageKind::Planned),
    Some(StageKind::Surveying),
    Some(StageKind::SurveyComplete),
    Some(StageKind::PendingConstruction),
    Some(StageKind::UnderConstruction),
    Some(StageKind::HaltedConstruction),
    None,
    Some(StageKind::Obsolete),
    Some(StageKind::PendingDemolition),
    Some(StageKind::ActiveDemolition),
];

/// The state `op` moves `from` into, or `None` if it is refused.
fn expected(op: Op, from: State) -> Option<State> {
    use StageKind::*;
    match (op, from) {
        (Op::BeginSurvey, Some(Planned)) => Some(Some(Surveying)),
        (Op::CompleteSurvey, Some(Surveying)) => Some(Some(SurveyComplete)),
        (Op::ApproveSurvey, Some(SurveyComplete)) => Some(Some(UnderConstruction)),
        (Op::ScheduleConstruction, Some(Planned)) => Some(Some(PendingConstruction)),
        (Op::StartConstruction, Some(PendingConstruction)) => Some(Some(UnderConstruction)),
        (Op::HaltConstruction, Some(UnderConstruction)) => Some(Some(HaltedConstruction)),
        (Op::ResumeConstruction, Some(HaltedConstruction)) => Some(Some(UnderConstruction)),
        (Op::CompleteConstruction, Some(UnderConstruction)) => Some(None),
        (Op::Retire, None) => Some(Some(Obsolete)),
        (
            Op::PrepareDemolition,
            Some(UnderConstruction | HaltedConstruction | Obsolete),
        ) => Some(Some(PendingDemolition)),
        (Op::StartDemolition, Some(PendingDemolition)) => Some(Some(ActiveDemolition)),
        (Op::RevertToPlanned, Some(Surveying | SurveyComplete | PendingConstruction)) => {
            Some(Some(Planned))
        }
        _ => None,
    }
}

fn apply(sim: &mut Simulation, op: Op, entity: EntityId) -> Result<(), WorldError> {
    match op {
        Op::BeginSurvey => sim.begin_survey(entity),
        Op::CompleteSurvey => sim.complete_survey(entity),
        Op::ApproveSurvey => sim.approve_survey(entity),
        Op::ScheduleConstruction => sim.schedule_construction(entity),
        Op::StartConstruction => sim.start_construction(entity),
        Op::HaltConstruction => sim.halt_construction(entity),
        Op::ResumeConstruction => sim.resume_construction(entity),
        Op::CompleteConstruction => sim.complete_construction(entity),
        Op::Retire => sim.retire(entity),
        Op::PrepareDemolition => sim.prepare_demolition(entity),
        Op::StartDemolition => sim.start_demolition(entity),
        Op::RevertToPlanned => sim.revert_to_planned(entity),
    }
}

/// Operations that walk a freshly planned entity to `state`.
fn path_to(state: State) -> Vec<Op> {
    use Op::*;
    match state {
        Some(StageKind::Planned) => vec![],
        Some(StageKind::Surveying) => vec![BeginSurvey],
        Some(StageKind::SurveyComplete) => vec![BeginSurvey, CompleteSurvey],
        Some(StageKind::PendingConstruction) => vec![ScheduleConstruction],
        Some(StageKind::UnderConstruction) => vec![ScheduleConstruction, StartConstruction],
        Some(StageKind::HaltedConstruction) => {
            vec![ScheduleConstruction, StartConstruction, HaltConstruction]
        }
        None => vec![ScheduleConstruction, StartConstruction, CompleteConstruction],
        Some(StageKind::Obsolete) => vec![
            ScheduleConstruction,
            StartConstruction,
            CompleteConstruction,
            Retire,
        ],
        Some(StageKind::PendingDemolition) => vec![
            ScheduleConstruction,
            StartConstruction,
            CompleteConstruction,
            Retire,
            PrepareDemolition,
        ],
        Some(StageKind::ActiveDemolition) => vec![
            ScheduleConstruction,
            StartConstruction,
            CompleteConstruction,
            Retire,
            PrepareDemolition,
            StartDemolition,
        ],
    }
}

fn simulation() -> Simulation {
    let catalog = Catalog::build(&default_definitions()).unwrap();
    Simulation::new(Arc::new(catalog), SimulationConfig::default())
}

fn entity_in(sim: &mut Simulation, state: State) -> EntityId {
    let entity = sim
        .world_mut()
        .plan_bus_station(Coordinate::new(0, 0), "Terminal");
    for op in path_to(state) {
        apply(sim, op, entity).unwrap();
    }
    entity
}

fn current(sim: &Simulation, entity: EntityId) -> State {
    sim.world().stage_kind(entity)
}

// ===========================================================================
// Exhaustive table
// ===========================================================================

#[test]
fn every_operation_from_every_stage() {
    for from in ALL_STATES {
        for op in ALL_OPS {
            let mut sim = simulation();
            let entity = entity_in(&mut sim, from);
            assert_eq!(current(&sim, entity), from);

            let result = apply(&mut sim, op, entity);
            match expected(op, from) {
                Some(to) => {
                    assert!(result.is_ok(), "{op:?} from {from:?}: {result:?}");
                    assert_eq!(current(&sim, entity), to, "{op:?} from {from:?}");
                }
                None => {
                    assert_eq!(
                        result.map_err(|e| matches!(e, WorldError::InvalidState { found, .. } if found == from)),
                        Err(true),
                        "{op:?} from {from:?} should be refused"
                    );
                    assert_eq!(current(&sim, entity), from, "{op:?} from {from:?}");
                }
            }
        }
    }
}

#[test]
fn complete_demolition_only_from_active_demolition() {
    for from in ALL_STATES {
        let mut sim = simulation();
        let entity = entity_in(&mut sim, from);
        let result = sim.complete_demolition(entity);
        if from == Some(StageKind::ActiveDemolition) {
            assert!(result.is_ok());
            assert!(!sim.world().contains(entity));
        } else {
            assert!(result.is_err(), "complete demolition from {from:?}");
            assert!(sim.world().contains(entity));
        }
    }
}

#[test]
fn operations_on_removed_entity_report_not_found() {
    let mut sim = simulation();
    let entity = entity_in(&mut sim, Some(StageKind::ActiveDemolition));
    sim.complete_demolition(entity).unwrap();
    for op in ALL_OPS {
        assert_eq!(apply(&mut sim, op, entity), Err(WorldError::EntityNotFound(entity)));
    }
}

// ===========================================================================
// Random sequences against the model
// ===========================================================================

fn arb_ops(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(proptest::sample::select(ALL_OPS.to_vec()), 1..=max_ops)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn random_sequences_follow_the_model(ops in arb_ops(40)) {
        let mut sim = simulation();
        let entity = entity_in(&mut sim, Some(StageKind::Planned));
        let mut model: State = Some(StageKind::Planned);

        for op in ops {
            let result = apply(&mut sim, op, entity);
            match expected(op, model) {
                Some(to) => {
                    prop_assert!(result.is_ok());
                    model = to;
                }
                None => prop_assert!(result.is_err()),
            }
            prop_assert_eq!(current(&sim, entity), model);
        }
    }
}
