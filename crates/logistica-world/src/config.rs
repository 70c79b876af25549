use crate::construction::ConstructionConfig;
use logistica_core::GalacticDateTime;
use serde::{Deserialize, Serialize};

/// Tunables of a simulation instance. Every field has a default, so a
/// config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Clock value before the first tick, as total minutes since the epoch.
    pub start_time: GalacticDateTime,
    pub minutes_per_tick: i64,
    pub construction: ConstructionConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_time: GalacticDateTime::from_parts(1, 1, 1, 8, 0),
            minutes_per_tick: 1,
            construction: ConstructionConfig::default(),
        }
    }
}
