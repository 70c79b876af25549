//! Catalog tables, ingestion, and lookups.

use crate::definition::{
    CatalogDefinitions, RecipeCategory, RecipeDefinition, StateOfMatter, UnitType,
};
use crate::error::CatalogError;
use crate::specification::{Specification, SpecificationKind, SpecificationType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Typed ids
// ---------------------------------------------------------------------------

/// Index of a form in the catalog. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormId(pub u32);

/// Index of a material in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// Index of a resource in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub u32);

/// Index of a component in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

/// A manufacturable item, i.e. anything with a per-unit mass that a recipe
/// can consume or produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemRef {
    Resource(ResourceId),
    Component(ComponentId),
}

// ---------------------------------------------------------------------------
// Resolved entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub unit_type: UnitType,
    pub volume_m3: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub state: StateOfMatter,
    pub density_kg_m3: f64,
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub material: MaterialId,
    pub form: FormId,
    pub recipes: Vec<Recipe>,
    pub mass_per_unit_kg: f64,
    pub tags: Vec<String>,
}

impl Resource {
    /// A raw resource has no recipes; its mass is density times volume.
    pub fn is_raw(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub recipes: Vec<Recipe>,
    pub mass_per_unit_kg: f64,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeInput {
    pub item: ItemRef,
    pub quantity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeOutput {
    pub item: ItemRef,
    pub mass_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub category: RecipeCategory,
    pub inputs: Vec<RecipeInput>,
    pub outputs: Vec<RecipeOutput>,
    pub construction_time: u32,
    pub is_primary_mass_definition: bool,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The immutable production manifest. Produced by
/// [`CatalogBuilder::bootstrap`]; thread-safe to share once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) forms: Vec<Form>,
    pub(crate) form_ids: HashMap<String, FormId>,
    pub(crate) materials: Vec<Material>,
    pub(crate) material_ids: HashMap<String, MaterialId>,
    pub(crate) resources: Vec<Resource>,
    pub(crate) resource_ids: HashMap<String, ResourceId>,
    pub(crate) components: Vec<Component>,
    pub(crate) component_ids: HashMap<String, ComponentId>,
    pub(crate) specifications: HashMap<(SpecificationKind, ComponentId), Specification>,
}

impl Catalog {
    /// Ingest and bootstrap in one go.
    pub fn build(definitions: &CatalogDefinitions) -> Result<Catalog, CatalogError> {
        CatalogBuilder::ingest(definitions)?.bootstrap()
    }

    // -- By string id --

    pub fn form(&self, id: &str) -> Result<&Form, CatalogError> {
        self.form_id(id)
            .and_then(|fid| self.get_form(fid))
            .ok_or_else(|| not_found("form", id))
    }

    pub fn material(&self, id: &str) -> Result<&Material, CatalogError> {
        self.material_id(id)
            .and_then(|mid| self.get_material(mid))
            .ok_or_else(|| not_found("material", id))
    }

    pub fn resource(&self, id: &str) -> Result<&Resource, CatalogError> {
        self.resource_id(id)
            .and_then(|rid| self.get_resource(rid))
            .ok_or_else(|| not_found("resource", id))
    }

    pub fn component(&self, id: &str) -> Result<&Component, CatalogError> {
        self.component_id(id)
            .and_then(|cid| self.get_component(cid))
            .ok_or_else(|| not_found("component", id))
    }

    /// Resolve a manufacturable item id. Resources shadow components.
    pub fn item(&self, id: &str) -> Result<ItemRef, CatalogError> {
        self.item_ref(id).ok_or_else(|| not_found("item", id))
    }

    /// Typed specification of a component, if it declares one of that kind.
    pub fn specification<T: SpecificationType>(&self, component_id: &str) -> Option<&T> {
        let cid = self.component_id(component_id)?;
        self.specifications
            .get(&(T::KIND, cid))
            .and_then(T::from_specification)
    }

    // -- By typed id --

    pub fn get_form(&self, id: FormId) -> Option<&Form> {
        self.forms.get(id.0 as usize)
    }

    pub fn get_material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    pub fn get_resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.0 as usize)
    }

    pub fn get_component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0 as usize)
    }

    pub fn form_id(&self, id: &str) -> Option<FormId> {
        self.form_ids.get(id).copied()
    }

    pub fn material_id(&self, id: &str) -> Option<MaterialId> {
        self.material_ids.get(id).copied()
    }

    pub fn resource_id(&self, id: &str) -> Option<ResourceId> {
        self.resource_ids.get(id).copied()
    }

    pub fn component_id(&self, id: &str) -> Option<ComponentId> {
        self.component_ids.get(id).copied()
    }

    pub fn item_ref(&self, id: &str) -> Option<ItemRef> {
        self.resource_id(id)
            .map(ItemRef::Resource)
            .or_else(|| self.component_id(id).map(ItemRef::Component))
    }

    /// String id of an item. Empty for a dangling reference.
    pub fn item_id(&self, item: ItemRef) -> &str {
        match item {
            ItemRef::Resource(rid) => self.get_resource(rid).map(|r| r.id.as_str()),
            ItemRef::Component(cid) => self.get_component(cid).map(|c| c.id.as_str()),
        }
        .unwrap_or_default()
    }

    /// Per-unit mass of an item in kilograms.
    pub fn item_mass(&self, item: ItemRef) -> f64 {
        match item {
            ItemRef::Resource(rid) => self.get_resource(rid).map(|r| r.mass_per_unit_kg),
            ItemRef::Component(cid) => self.get_component(cid).map(|c| c.mass_per_unit_kg),
        }
        .unwrap_or(0.0)
    }

    // -- Recipe mass balance --

    /// Total mass consumed by one run of a recipe.
    pub fn recipe_input_mass(&self, recipe: &Recipe) -> f64 {
        recipe
            .inputs
            .iter()
            .map(|input| self.item_mass(input.item) * input.quantity)
            .sum()
    }

    /// Mass assigned to each output of one run of a recipe, in output order.
    pub fn recipe_output_masses(&self, recipe: &Recipe) -> Vec<(ItemRef, f64)> {
        let total = self.recipe_input_mass(recipe);
        recipe
            .outputs
            .iter()
            .map(|output| (output.item, total * output.mass_ratio))
            .collect()
    }

    // -- Iteration --

    pub fn forms(&self) -> impl Iterator<Item = (FormId, &Form)> {
        self.forms.iter().enumerate().map(|(i, f)| (FormId(i as u32), f))
    }

    pub fn materials(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialId(i as u32), m))
    }

    pub fn resources(&self) -> impl Iterator<Item = (ResourceId, &Resource)> {
        self.resources
            .iter()
            .enumerate()
            .map(|(i, r)| (ResourceId(i as u32), r))
    }

    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (ComponentId(i as u32), c))
    }

    /// Resources carrying `tag`, in catalog order.
    pub fn resources_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Resource> + 'a {
        self.resources.iter().filter(move |r| r.has_tag(tag))
    }

    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

fn not_found(kind: &'static str, id: &str) -> CatalogError {
    CatalogError::NotFound {
        kind,
        id: id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

/// A fully cross-referenced catalog whose masses are not yet derived.
///
/// Resource and component masses are placeholders (0) and material
/// densities are as authored until [`CatalogBuilder::bootstrap`] runs.
#[derive(Debug)]
pub struct CatalogBuilder {
    pub(crate) catalog: Catalog,
}

impl CatalogBuilder {
    /// Register every definition and resolve all string references.
    pub fn ingest(definitions: &CatalogDefinitions) -> Result<CatalogBuilder, CatalogError> {
        let mut catalog = Catalog::default();

        // Forms have no dependencies.
        for def in &definitions.forms {
            let id = FormId(catalog.forms.len() as u32);
            insert_unique(&mut catalog.form_ids, "form", &def.form_id, id)?;
            catalog.forms.push(Form {
                id: def.form_id.clone(),
                name: def.name.clone(),
                symbol: def.symbol.clone(),
                unit_type: def.unit_type,
                volume_m3: def.volume_m3,
            });
        }

        // Placeholders first so recipes can reference anything.
        for def in &definitions.materials {
            let id = MaterialId(catalog.materials.len() as u32);
            insert_unique(&mut catalog.material_ids, "material", &def.material_id, id)?;
            catalog.materials.push(Material {
                id: def.material_id.clone(),
                name: def.name.clone(),
                state: def.state,
                density_kg_m3: def.density_kg_m3,
                recipes: Vec::new(),
            });
        }

        for def in &definitions.resources {
            let material = catalog.material_id(&def.material_id).ok_or_else(|| {
                CatalogError::UnknownReference {
                    kind: "material",
                    id: def.material_id.clone(),
                    referenced_by: def.resource_id.clone(),
                }
            })?;
            let form = catalog
                .form_id(&def.form_id)
                .ok_or_else(|| CatalogError::UnknownReference {
                    kind: "form",
                    id: def.form_id.clone(),
                    referenced_by: def.resource_id.clone(),
                })?;
            let id = ResourceId(catalog.resources.len() as u32);
            insert_unique(&mut catalog.resource_ids, "resource", &def.resource_id, id)?;
            catalog.resources.push(Resource {
                id: def.resource_id.clone(),
                name: def.name.clone(),
                material,
                form,
                recipes: Vec::new(),
                mass_per_unit_kg: 0.0,
                tags: def.tags.clone(),
            });
        }

        for def in &definitions.components {
            let id = ComponentId(catalog.components.len() as u32);
            insert_unique(&mut catalog.component_ids, "component", &def.component_id, id)?;
            catalog.components.push(Component {
                id: def.component_id.clone(),
                name: def.name.clone(),
                recipes: Vec::new(),
                mass_per_unit_kg: 0.0,
                tags: def.tags.clone(),
            });
            for spec in &def.specifications {
                let key = (spec.kind(), id);
                if catalog.specifications.contains_key(&key) {
                    return Err(CatalogError::DuplicateSpecification {
                        component: def.component_id.clone(),
                        kind: spec.kind(),
                    });
                }
                catalog.specifications.insert(key, spec.clone());
            }
        }

        // Hydrate recipes now that every table is populated.
        for (i, def) in definitions.materials.iter().enumerate() {
            let recipes = hydrate_recipes(&catalog, &def.material_id, &def.recipes)?;
            catalog.materials[i].recipes = recipes;
        }
        for (i, def) in definitions.resources.iter().enumerate() {
            let recipes = hydrate_recipes(&catalog, &def.resource_id, &def.recipes)?;
            catalog.resources[i].recipes = recipes;
        }
        for (i, def) in definitions.components.iter().enumerate() {
            let recipes = hydrate_recipes(&catalog, &def.component_id, &def.recipes)?;
            catalog.components[i].recipes = recipes;
        }

        Ok(CatalogBuilder { catalog })
    }

    /// Read access to the unresolved catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

fn insert_unique<T>(
    ids: &mut HashMap<String, T>,
    kind: &'static str,
    id: &str,
    value: T,
) -> Result<(), CatalogError> {
    if ids.contains_key(id) {
        return Err(CatalogError::DuplicateId {
            kind,
            id: id.to_string(),
        });
    }
    ids.insert(id.to_string(), value);
    Ok(())
}

fn hydrate_recipes(
    catalog: &Catalog,
    owner: &str,
    definitions: &[RecipeDefinition],
) -> Result<Vec<Recipe>, CatalogError> {
    let primaries = definitions
        .iter()
        .filter(|r| r.is_primary_mass_definition)
        .count();
    if primaries > 1 {
        return Err(CatalogError::AmbiguousPrimaryRecipe {
            item: owner.to_string(),
        });
    }

    let resolve = |item_id: &str| {
        catalog
            .item_ref(item_id)
            .ok_or_else(|| CatalogError::UnknownReference {
                kind: "item",
                id: item_id.to_string(),
                referenced_by: owner.to_string(),
            })
    };

    definitions
        .iter()
        .map(|def| {
            let inputs = def
                .inputs
                .iter()
                .map(|input| {
                    Ok(RecipeInput {
                        item: resolve(&input.item_id)?,
                        quantity: input.quantity,
                    })
                })
                .collect::<Result<Vec<_>, CatalogError>>()?;
            let outputs = def
                .outputs
                .iter()
                .map(|output| {
                    Ok(RecipeOutput {
                        item: resolve(&output.item_id)?,
                        mass_ratio: output.mass_ratio,
                    })
                })
                .collect::<Result<Vec<_>, CatalogError>>()?;
            Ok(Recipe {
                category: def.category,
                inputs,
                outputs,
                construction_time: def.construction_time,
                is_primary_mass_definition: def.is_primary_mass_definition,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::{ChassisSpecification, ElectricMotorSpecification};
    use crate::test_utils::*;

    fn small_definitions() -> CatalogDefinitions {
        CatalogDefinitions {
            forms: vec![pile(), ingot()],
            materials: vec![material("mat_ore", 3500.0), material("mat_iron", 7870.0)],
            resources: vec![
                resource("res_ore", "mat_ore", "form_pile").with_tags(&["ore", "bulk_solid"]),
                resource("res_ingot", "mat_iron", "form_ingot")
                    .with_recipe(primary(&[("res_ore", 2.0)], &[("res_ingot", 0.5)])),
            ],
            components: vec![
                component("comp_frame")
                    .with_recipe(primary(&[("res_ingot", 4.0)], &[("comp_frame", 1.0)]))
                    .with_specification(ChassisSpecification {
                        length_meters: 12.0,
                        has_cogwheel_drive: true,
                    }),
            ],
        }
    }

    #[test]
    fn ingest_registers_all_tables() {
        let builder = CatalogBuilder::ingest(&small_definitions()).unwrap();
        let catalog = builder.catalog();
        assert_eq!(catalog.form_count(), 2);
        assert_eq!(catalog.material_count(), 2);
        assert_eq!(catalog.resource_count(), 2);
        assert_eq!(catalog.component_count(), 1);
    }

    #[test]
    fn ingest_leaves_masses_unresolved() {
        let builder = CatalogBuilder::ingest(&small_definitions()).unwrap();
        let catalog = builder.catalog();
        assert_eq!(catalog.resource("res_ore").unwrap().mass_per_unit_kg, 0.0);
        assert_eq!(catalog.component("comp_frame").unwrap().mass_per_unit_kg, 0.0);
        // Authored density survives ingestion.
        assert_eq!(catalog.material("mat_iron").unwrap().density_kg_m3, 7870.0);
    }

    #[test]
    fn ingest_hydrates_recipe_references() {
        let builder = CatalogBuilder::ingest(&small_definitions()).unwrap();
        let catalog = builder.catalog();
        let ingot = catalog.resource("res_ingot").unwrap();
        let recipe = &ingot.recipes[0];
        assert_eq!(
            recipe.inputs[0].item,
            ItemRef::Resource(catalog.resource_id("res_ore").unwrap())
        );
        assert_eq!(catalog.item_id(recipe.outputs[0].item), "res_ingot");
    }

    #[test]
    fn unknown_material_reference_fails() {
        let mut defs = small_definitions();
        defs.resources[0].material_id = "mat_missing".to_string();
        let err = CatalogBuilder::ingest(&defs).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownReference {
                kind: "material",
                id: "mat_missing".to_string(),
                referenced_by: "res_ore".to_string(),
            }
        );
    }

    #[test]
    fn unknown_form_reference_fails() {
        let mut defs = small_definitions();
        defs.resources[1].form_id = "form_barrel".to_string();
        let err = CatalogBuilder::ingest(&defs).unwrap_err();
        assert!(
            matches!(err, CatalogError::UnknownReference { kind: "form", ref id, .. } if id == "form_barrel")
        );
    }

    #[test]
    fn dangling_recipe_item_fails() {
        let mut defs = small_definitions();
        defs.components[0].recipes[0].inputs[0].item_id = "res_unobtainium".to_string();
        let err = CatalogBuilder::ingest(&defs).unwrap_err();
        assert!(
            matches!(err, CatalogError::UnknownReference { kind: "item", ref id, ref referenced_by }
                if id == "res_unobtainium" && referenced_by == "comp_frame")
        );
    }

    #[test]
    fn duplicate_ids_within_a_table_fail() {
        let mut defs = small_definitions();
        defs.forms.push(pile());
        let err = CatalogBuilder::ingest(&defs).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                kind: "form",
                id: "form_pile".to_string()
            }
        );
    }

    #[test]
    fn same_id_in_different_tables_is_allowed() {
        let mut defs = small_definitions();
        defs.materials.push(material("res_ore", 100.0));
        assert!(CatalogBuilder::ingest(&defs).is_ok());
    }

    #[test]
    fn two_primary_recipes_fail_at_ingestion() {
        let mut defs = small_definitions();
        defs.resources[1]
            .recipes
            .push(primary(&[("res_ore", 3.0)], &[("res_ingot", 0.4)]));
        let err = CatalogBuilder::ingest(&defs).unwrap_err();
        assert_eq!(
            err,
            CatalogError::AmbiguousPrimaryRecipe {
                item: "res_ingot".to_string()
            }
        );
    }

    #[test]
    fn duplicate_specification_kind_fails() {
        let mut defs = small_definitions();
        defs.components[0].specifications.push(
            ChassisSpecification {
                length_meters: 4.0,
                has_cogwheel_drive: false,
            }
            .into(),
        );
        let err = CatalogBuilder::ingest(&defs).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateSpecification {
                kind: SpecificationKind::Chassis,
                ..
            }
        ));
    }

    #[test]
    fn typed_specification_lookup() {
        let catalog = Catalog::build(&small_definitions()).unwrap();
        let chassis = catalog
            .specification::<ChassisSpecification>("comp_frame")
            .unwrap();
        assert_eq!(chassis.length_meters, 12.0);
        assert!(chassis.has_cogwheel_drive);
        assert!(
            catalog
                .specification::<ElectricMotorSpecification>("comp_frame")
                .is_none()
        );
        assert!(
            catalog
                .specification::<ChassisSpecification>("comp_missing")
                .is_none()
        );
    }

    #[test]
    fn lookups_report_not_found() {
        let catalog = Catalog::build(&small_definitions()).unwrap();
        let err = catalog.resource("res_nothing").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "resource 'res_nothing' not found");
        assert!(catalog.form("form_nothing").unwrap_err().is_not_found());
        assert!(catalog.material("mat_nothing").unwrap_err().is_not_found());
        assert!(catalog.component("comp_nothing").unwrap_err().is_not_found());
        assert!(catalog.item("nothing").unwrap_err().is_not_found());
    }

    #[test]
    fn item_prefers_resource_over_component() {
        let mut defs = small_definitions();
        defs.components.push(component("res_ore"));
        let catalog = CatalogBuilder::ingest(&defs).unwrap().catalog;
        assert!(matches!(catalog.item("res_ore"), Ok(ItemRef::Resource(_))));
        assert!(matches!(catalog.item("comp_frame"), Ok(ItemRef::Component(_))));
    }

    #[test]
    fn resources_by_tag_in_catalog_order() {
        let catalog = Catalog::build(&small_definitions()).unwrap();
        let ores: Vec<&str> = catalog
            .resources_by_tag("ore")
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ores, vec!["res_ore"]);
        assert_eq!(catalog.resources_by_tag("fuel").count(), 0);
    }

    #[test]
    fn catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
