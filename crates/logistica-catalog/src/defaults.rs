//! Built-in starter content.
//!
//! A small smelting and wiring chain that ends in a shunter chassis and two
//! engines. Used when no data directory is supplied and as a fixture by
//! downstream tests.

use crate::definition::{
    CatalogDefinitions, ComponentDefinition, FormDefinition, MaterialDefinition, RecipeCategory,
    RecipeDefinition, ResourceDefinition, StateOfMatter, UnitType,
};
use crate::specification::{
    ChassisSpecification, CombustionEngineSpecification, ContainerSpecification,
    ElectricMotorSpecification, FuelType, StorageRule,
};

pub fn default_definitions() -> CatalogDefinitions {
    CatalogDefinitions {
        forms: default_forms(),
        materials: default_materials(),
        resources: default_resources(),
        components: default_components(),
    }
}

fn default_forms() -> Vec<FormDefinition> {
    use UnitType::*;
    vec![
        FormDefinition::new("form_kwh", "Kilowatt-Hour", "kWh", Count, 0.0),
        FormDefinition::new("form_pile", "Pile", "m³", Volume, 1.0),
        FormDefinition::new("form_ingot", "Ingot", "", Count, 0.00089),
        FormDefinition::new("form_plate", "Plate", "", Count, 0.001),
        FormDefinition::new("form_scrap", "Scrap", "kg", Mass, 0.00035),
        FormDefinition::new("form_nut", "Nut", "m", Count, 0.000001),
        FormDefinition::new("form_bolt", "Bolt", "m", Count, 0.000001),
        FormDefinition::new("form_barrel", "Barrel", "bbl", Volume, 0.159),
        FormDefinition::new("form_wire_18ga_1m", "18-Gauge Wire (1m)", "m", Length, 0.00000082),
        FormDefinition::new("form_wire_roll_1km", "1km Wire Roll", "m", Count, 0.00085),
    ]
}

fn default_materials() -> Vec<MaterialDefinition> {
    use StateOfMatter::*;
    vec![
        MaterialDefinition::new("mat_electron_flow", "Electron Flow", Electric, 0.0),
        MaterialDefinition::new("mat_coal", "Coal", Solid, 1500.0),
        MaterialDefinition::new("mat_iron_ore", "Iron Ore", Solid, 3500.0),
        MaterialDefinition::new("mat_chromium_ore", "Chromium Ore", Solid, 4500.0),
        MaterialDefinition::new("mat_copper_ore", "Copper Ore", Solid, 4000.0),
        MaterialDefinition::new("mat_slag", "Slag", Solid, 2800.0),
        MaterialDefinition::new("mat_iron", "Iron", Solid, 7870.0),
        MaterialDefinition::new("mat_copper", "Copper", Solid, 8960.0),
        MaterialDefinition::new("mat_stainless_steel", "Stainless Steel", Solid, 8000.0),
        MaterialDefinition::new("mat_plastic", "Plastic", Solid, 950.0),
        MaterialDefinition::new("mat_diesel", "Diesel", Liquid, 832.0),
    ]
}

fn default_resources() -> Vec<ResourceDefinition> {
    use RecipeCategory::*;
    vec![
        // Raw
        ResourceDefinition::new("util_electricity_kwh", "Electricity", "mat_electron_flow", "form_kwh")
            .with_tags(&["fuel", "electricity"]),
        ResourceDefinition::new("res_coal", "Coal", "mat_coal", "form_pile")
            .with_tags(&["ore", "bulk_solid", "flammable"]),
        ResourceDefinition::new("res_iron_ore", "Iron Ore", "mat_iron_ore", "form_pile")
            .with_tags(&["ore", "bulk_solid"]),
        ResourceDefinition::new("res_chromium_ore", "Chromium Ore", "mat_chromium_ore", "form_pile")
            .with_tags(&["ore", "bulk_solid"]),
        ResourceDefinition::new("res_copper_ore", "Copper Ore", "mat_copper_ore", "form_pile")
            .with_tags(&["ore", "bulk_solid"]),
        ResourceDefinition::new("res_slag", "Slag", "mat_slag", "form_pile"),
        ResourceDefinition::new("res_plastic", "Plastic Granulate", "mat_plastic", "form_pile")
            .with_tags(&["bulk_solid"]),
        ResourceDefinition::new("res_iron_scrap", "Iron Scrap", "mat_iron", "form_scrap")
            .with_tags(&["bulk_solid"]),
        ResourceDefinition::new("res_copper_scrap", "Copper Scrap", "mat_copper", "form_scrap")
            .with_tags(&["bulk_solid"]),
        ResourceDefinition::new("res_diesel", "Diesel", "mat_diesel", "form_barrel")
            .with_tags(&["fuel", "liquid", "flammable"]),
        // Smelting and alloying
        ResourceDefinition::new("res_iron_ingot", "Iron Ingot", "mat_iron", "form_ingot")
            .with_recipe(
                RecipeDefinition::new(
                    Smelting,
                    &[("res_iron_ore", 10.0), ("res_coal", 5.0)],
                    &[("res_iron_ingot", 0.583), ("res_slag", 0.417)],
                    1,
                )
                .primary(),
            )
            .with_recipe(RecipeDefinition::new(
                Smelting,
                &[("res_iron_scrap", 10.0), ("util_electricity_kwh", 30.0)],
                &[("res_iron_ingot", 0.95), ("res_slag", 0.05)],
                1,
            )),
        ResourceDefinition::new("res_copper_ingot", "Copper Ingot", "mat_copper", "form_ingot")
            .with_recipe(
                RecipeDefinition::new(
                    Smelting,
                    &[("res_copper_ore", 10.0), ("res_coal", 1.0)],
                    &[("res_copper_ingot", 0.98)],
                    1,
                )
                .primary(),
            ),
        ResourceDefinition::new(
            "res_stainless_steel_ingot",
            "Stainless Steel Ingot",
            "mat_stainless_steel",
            "form_ingot",
        )
        .with_recipe(
            RecipeDefinition::new(
                Alloying,
                &[("res_iron_ingot", 10.0), ("res_chromium_ore", 1.5)],
                &[("res_stainless_steel_ingot", 0.98)],
                1,
            )
            .primary(),
        ),
        // Wire
        ResourceDefinition::new(
            "res_copper_wire_1g_1m",
            "Copper Wire, 1 Gauge, 1m",
            "mat_copper",
            "form_wire_18ga_1m",
        )
        .with_recipe(
            RecipeDefinition::new(
                Forming,
                &[("res_copper_ingot", 10.0), ("res_plastic", 1.5)],
                &[("res_copper_wire_1g_1m", 0.98)],
                1,
            )
            .primary(),
        ),
        ResourceDefinition::new(
            "res_copper_wire_18g_1m",
            "Copper Wire, 18 Gauge, 1m",
            "mat_copper",
            "form_wire_18ga_1m",
        )
        .with_recipe(
            RecipeDefinition::new(
                Forming,
                &[("res_copper_ingot", 10.0), ("res_plastic", 1.5)],
                &[("res_copper_wire_18g_1m", 0.98)],
                1,
            )
            .primary(),
        ),
        ResourceDefinition::new(
            "res_copper_wire_1g_roll_1km",
            "Copper Wire, 1 Gauge, Roll, 1km",
            "mat_copper",
            "form_wire_roll_1km",
        ),
        ResourceDefinition::new(
            "res_copper_wire_18g_roll_1km",
            "Copper Wire, 18 Gauge, Roll, 1km",
            "mat_copper",
            "form_wire_roll_1km",
        )
        .with_recipe(
            RecipeDefinition::new(
                Assembling,
                &[("res_copper_wire_18g_1m", 1002.0)],
                &[("res_copper_wire_18g_roll_1km", 0.95), ("res_copper_scrap", 0.05)],
                1,
            )
            .primary(),
        )
        .with_recipe(RecipeDefinition::new(
            Disassembling,
            &[("res_copper_wire_1g_roll_1km", 1.0)],
            &[("res_copper_wire_1g_1m", 0.95), ("res_copper_scrap", 0.05)],
            1,
        )),
        // Stainless steel parts
        ResourceDefinition::new(
            "res_stainless_steel_plate",
            "Stainless Steel Plate",
            "mat_stainless_steel",
            "form_plate",
        ),
        ResourceDefinition::new(
            "res_stainless_steel_scrap",
            "Stainless Steel Scrap",
            "mat_stainless_steel",
            "form_scrap",
        )
        .with_tags(&["bulk_solid"]),
        ResourceDefinition::new(
            "res_stainless_steel_bolt",
            "Stainless Steel Bolt",
            "mat_stainless_steel",
            "form_bolt",
        )
        .with_recipe(
            RecipeDefinition::new(
                Stamping,
                &[("res_stainless_steel_plate", 1.0)],
                &[("res_stainless_steel_bolt", 0.8), ("res_stainless_steel_scrap", 0.2)],
                1,
            )
            .primary(),
        )
        .with_tags(&["bulk_solid"]),
    ]
}

fn default_components() -> Vec<ComponentDefinition> {
    use RecipeCategory::*;
    vec![
        ComponentDefinition::new("comp_chassis_shunter", "Shunter Chassis")
            .with_recipe(
                RecipeDefinition::new(
                    Assembling,
                    &[("res_stainless_steel_plate", 1000.0)],
                    &[("comp_chassis_shunter", 1.0)],
                    1,
                )
                .primary(),
            )
            .with_specification(ChassisSpecification {
                length_meters: 12.0,
                has_cogwheel_drive: false,
            })
            .with_specification(ContainerSpecification {
                quantity: 1000.0,
                rule: StorageRule {
                    required_tags: vec!["fuel".to_string(), "electricity".to_string()],
                    forbidden_tags: Vec::new(),
                },
            })
            .with_tags(&["train", "chassis"]),
        ComponentDefinition::new("comp_engine_electric_small", "Small Electric Engine")
            .with_recipe(
                RecipeDefinition::new(
                    Assembling,
                    &[
                        ("res_copper_wire_18g_roll_1km", 2.0),
                        ("res_stainless_steel_bolt", 50.0),
                    ],
                    &[("comp_engine_electric_small", 1.0)],
                    1,
                )
                .primary(),
            )
            .with_specification(ElectricMotorSpecification {
                max_power_kw: 1200.0,
                efficiency_percent: 95.0,
            })
            .with_tags(&["engine", "electric"]),
        ComponentDefinition::new("comp_engine_diesel_medium", "Medium Diesel Engine")
            .with_recipe(
                RecipeDefinition::new(
                    Assembling,
                    &[
                        ("res_stainless_steel_plate", 400.0),
                        ("res_stainless_steel_bolt", 120.0),
                        ("res_copper_wire_18g_roll_1km", 1.0),
                    ],
                    &[("comp_engine_diesel_medium", 1.0)],
                    1,
                )
                .primary(),
            )
            .with_specification(CombustionEngineSpecification {
                max_power_kw: 2000.0,
                fuel_types: vec![FuelType {
                    resource_id: "res_diesel".to_string(),
                    consumption_rate_per_second: 0.12,
                }],
                specific_fuel_consumption_grams_per_kwh: 210.0,
            })
            .with_tags(&["engine", "combustion"]),
    ]
}
