//! Shorthand constructors for catalog definitions in tests.

use crate::definition::{
    ComponentDefinition, FormDefinition, MaterialDefinition, RecipeCategory, RecipeDefinition,
    ResourceDefinition, StateOfMatter, UnitType,
};

/// A bulk form of one cubic metre per unit.
pub fn pile() -> FormDefinition {
    FormDefinition::new("form_pile", "Pile", "m³", UnitType::Volume, 1.0)
}

/// A cast ingot of 0.00089 m³.
pub fn ingot() -> FormDefinition {
    FormDefinition::new("form_ingot", "Ingot", "ingot", UnitType::Count, 0.00089)
}

/// A 1 mm x 1 m² plate.
pub fn plate() -> FormDefinition {
    FormDefinition::new("form_plate", "Plate", "plate", UnitType::Count, 0.001)
}

/// A solid material with the given authored density.
pub fn material(id: &str, density_kg_m3: f64) -> MaterialDefinition {
    MaterialDefinition::new(id, id, StateOfMatter::Solid, density_kg_m3)
}

pub fn resource(id: &str, material_id: &str, form_id: &str) -> ResourceDefinition {
    ResourceDefinition::new(id, id, material_id, form_id)
}

pub fn component(id: &str) -> ComponentDefinition {
    ComponentDefinition::new(id, id)
}

/// A primary-mass-defining assembling recipe.
pub fn primary(inputs: &[(&str, f64)], outputs: &[(&str, f64)]) -> RecipeDefinition {
    RecipeDefinition::new(RecipeCategory::Assembling, inputs, outputs, 1).primary()
}

/// A non-defining assembling recipe.
pub fn secondary(inputs: &[(&str, f64)], outputs: &[(&str, f64)]) -> RecipeDefinition {
    RecipeDefinition::new(RecipeCategory::Assembling, inputs, outputs, 1)
}
