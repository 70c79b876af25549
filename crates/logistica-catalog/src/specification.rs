//! Typed component specifications.
//!
//! A component carries zero or more specifications, at most one per
//! [`SpecificationKind`]. The catalog indexes them by `(kind, component)` so
//! callers can ask for a concrete type:
//!
//! ```rust,ignore
//! if let Some(motor) = catalog.specification::<ElectricMotorSpecification>("comp_engine") {
//!     println!("{} kW", motor.max_power_kw);
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Tag-based admission rule for containers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageRule {
    #[serde(default)]
    pub required_tags: Vec<String>,
    #[serde(default)]
    pub forbidden_tags: Vec<String>,
}

impl StorageRule {
    /// Whether an item carrying `tags` may be stored: every required tag is
    /// present and no forbidden tag is.
    pub fn accepts<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        let has = |wanted: &String| tags.iter().any(|t| t.as_ref() == wanted);
        self.required_tags.iter().all(has) && !self.forbidden_tags.iter().any(has)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpecification {
    pub quantity: f64,
    #[serde(default)]
    pub rule: StorageRule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChassisSpecification {
    pub length_meters: f64,
    #[serde(default)]
    pub has_cogwheel_drive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricMotorSpecification {
    pub max_power_kw: f64,
    pub efficiency_percent: f64,
}

/// A fuel an engine can burn, by resource id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelType {
    pub resource_id: String,
    pub consumption_rate_per_second: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombustionEngineSpecification {
    pub max_power_kw: f64,
    pub fuel_types: Vec<FuelType>,
    pub specific_fuel_consumption_grams_per_kwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketEngineSpecification {
    pub max_power_kw: f64,
    pub fuel_types: Vec<FuelType>,
    pub specific_impulse_seconds: f64,
    pub exhaust_velocity_mps: f64,
    pub exhaust_pressure_pa: f64,
    pub nozzle_area_m2: f64,
}

/// Closed set of specification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpecificationKind {
    Container,
    Chassis,
    ElectricMotor,
    CombustionEngine,
    RocketEngine,
}

/// A specification as authored on a component definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Specification {
    Container(ContainerSpecification),
    Chassis(ChassisSpecification),
    ElectricMotor(ElectricMotorSpecification),
    CombustionEngine(CombustionEngineSpecification),
    RocketEngine(RocketEngineSpecification),
}

impl Specification {
    pub fn kind(&self) -> SpecificationKind {
        match self {
            Specification::Container(_) => SpecificationKind::Container,
            Specification::Chassis(_) => SpecificationKind::Chassis,
            Specification::ElectricMotor(_) => SpecificationKind::ElectricMotor,
            Specification::CombustionEngine(_) => SpecificationKind::CombustionEngine,
            Specification::RocketEngine(_) => SpecificationKind::RocketEngine,
        }
    }
}

/// Implemented by every concrete specification payload so it can be looked
/// up by type.
pub trait SpecificationType: Sized {
    const KIND: SpecificationKind;

    fn from_specification(spec: &Specification) -> Option<&Self>;
}

macro_rules! specification_type {
    ($ty:ty, $variant:ident) => {
        impl SpecificationType for $ty {
            const KIND: SpecificationKind = SpecificationKind::$variant;

            fn from_specification(spec: &Specification) -> Option<&Self> {
                match spec {
                    Specification::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Specification {
            fn from(inner: $ty) -> Self {
                Specification::$variant(inner)
            }
        }
    };
}

specification_type!(ContainerSpecification, Container);
specification_type!(ChassisSpecification, Chassis);
specification_type!(ElectricMotorSpecification, ElectricMotor);
specification_type!(CombustionEngineSpecification, CombustionEngine);
specification_type!(RocketEngineSpecification, RocketEngine);
