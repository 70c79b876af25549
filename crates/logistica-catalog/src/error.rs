use crate::specification::SpecificationKind;

/// Catalog integrity and lookup errors.
///
/// Everything except [`CatalogError::NotFound`] is a content-authoring
/// defect detected while building the catalog and is fatal to bootstrap.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("component '{component}' declares more than one {kind:?} specification")]
    DuplicateSpecification {
        component: String,
        kind: SpecificationKind,
    },

    #[error("'{referenced_by}' references unknown {kind} '{id}'")]
    UnknownReference {
        kind: &'static str,
        id: String,
        referenced_by: String,
    },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("circular dependency detected, could not resolve: {}", unresolved.join(", "))]
    CircularDependency { unresolved: Vec<String> },

    #[error("no recipe of '{item}' is marked as the primary mass definition")]
    MissingPrimaryRecipe { item: String },

    #[error("more than one recipe of '{item}' is marked as the primary mass definition")]
    AmbiguousPrimaryRecipe { item: String },

    #[error("the primary recipe of '{item}' does not list it among its outputs")]
    SelfOutputMissing { item: String },

    #[error("the primary recipe of material '{material}' must output a resource, but '{output}' is not one")]
    InvalidRecipeTarget { material: String, output: String },
}

impl CatalogError {
    /// True for lookup misses, which callers may treat as ordinary absence.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}
