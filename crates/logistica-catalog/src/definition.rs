//! Catalog definition records.
//!
//! These are the plain-data inputs to [`crate::CatalogBuilder::ingest`]. They
//! reference each other by string id and carry no derived values. An
//! external loader (or [`crate::defaults`]) produces them.

use crate::specification::Specification;
use serde::{Deserialize, Serialize};

/// What one unit of a form counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Count,
    Mass,
    Volume,
    Length,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateOfMatter {
    Solid,
    Liquid,
    Gas,
    Electric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeCategory {
    Refining,
    Smelting,
    Alloying,
    Forming,
    Stamping,
    Machining,
    Assembling,
    Disassembling,
    Recycling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub form_id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    pub unit_type: UnitType,
    pub volume_m3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDefinition {
    pub material_id: String,
    pub name: String,
    pub state: StateOfMatter,
    /// Authored density. Overwritten when the material has a primary recipe.
    #[serde(default)]
    pub density_kg_m3: f64,
    #[serde(default)]
    pub recipes: Vec<RecipeDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub resource_id: String,
    pub name: String,
    pub material_id: String,
    pub form_id: String,
    #[serde(default)]
    pub recipes: Vec<RecipeDefinition>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub component_id: String,
    pub name: String,
    #[serde(default)]
    pub recipes: Vec<RecipeDefinition>,
    #[serde(default)]
    pub specifications: Vec<Specification>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeInputDefinition {
    pub item_id: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeOutputDefinition {
    pub item_id: String,
    pub mass_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDefinition {
    pub category: RecipeCategory,
    pub inputs: Vec<RecipeInputDefinition>,
    pub outputs: Vec<RecipeOutputDefinition>,
    #[serde(default)]
    pub construction_time: u32,
    #[serde(default)]
    pub is_primary_mass_definition: bool,
}

/// The four ordered definition lists a catalog is built from. List order is
/// significant: it fixes the resolution order among independent items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogDefinitions {
    #[serde(default)]
    pub forms: Vec<FormDefinition>,
    #[serde(default)]
    pub materials: Vec<MaterialDefinition>,
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
    #[serde(default)]
    pub components: Vec<ComponentDefinition>,
}

// ---------------------------------------------------------------------------
// Construction helpers
// ---------------------------------------------------------------------------

impl FormDefinition {
    pub fn new(form_id: &str, name: &str, symbol: &str, unit_type: UnitType, volume_m3: f64) -> Self {
        Self {
            form_id: form_id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            unit_type,
            volume_m3,
        }
    }
}

impl MaterialDefinition {
    pub fn new(material_id: &str, name: &str, state: StateOfMatter, density_kg_m3: f64) -> Self {
        Self {
            material_id: material_id.to_string(),
            name: name.to_string(),
            state,
            density_kg_m3,
            recipes: Vec::new(),
        }
    }

    pub fn with_recipe(mut self, recipe: RecipeDefinition) -> Self {
        self.recipes.push(recipe);
        self
    }
}

impl ResourceDefinition {
    pub fn new(resource_id: &str, name: &str, material_id: &str, form_id: &str) -> Self {
        Self {
            resource_id: resource_id.to_string(),
            name: name.to_string(),
            material_id: material_id.to_string(),
            form_id: form_id.to_string(),
            recipes: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_recipe(mut self, recipe: RecipeDefinition) -> Self {
        self.recipes.push(recipe);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }
}

impl ComponentDefinition {
    pub fn new(component_id: &str, name: &str) -> Self {
        Self {
            component_id: component_id.to_string(),
            name: name.to_string(),
            recipes: Vec::new(),
            specifications: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_recipe(mut self, recipe: RecipeDefinition) -> Self {
        self.recipes.push(recipe);
        self
    }

    pub fn with_specification(mut self, spec: impl Into<Specification>) -> Self {
        self.specifications.push(spec.into());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }
}

impl RecipeDefinition {
    pub fn new(
        category: RecipeCategory,
        inputs: &[(&str, f64)],
        outputs: &[(&str, f64)],
        construction_time: u32,
    ) -> Self {
        Self {
            category,
            inputs: inputs
                .iter()
                .map(|&(item_id, quantity)| RecipeInputDefinition {
                    item_id: item_id.to_string(),
                    quantity,
                })
                .collect(),
            outputs: outputs
                .iter()
                .map(|&(item_id, mass_ratio)| RecipeOutputDefinition {
                    item_id: item_id.to_string(),
                    mass_ratio,
                })
                .collect(),
            construction_time,
            is_primary_mass_definition: false,
        }
    }

    /// Mark this recipe as the one that defines its item's mass.
    pub fn primary(mut self) -> Self {
        self.is_primary_mass_definition = true;
        self
    }
}
