//! Logistica Catalog -- the production manifest.
//!
//! The catalog describes everything that can exist in the economy: units of
//! measure ([`catalog::Form`]), substances ([`catalog::Material`]),
//! manufacturable goods ([`catalog::Resource`]), assemblies
//! ([`catalog::Component`]) and the [`catalog::Recipe`]s that convert one
//! into another.
//!
//! # Lifecycle
//!
//! A catalog is built exactly once, before the first simulation tick:
//!
//! ```rust,ignore
//! let builder = CatalogBuilder::ingest(&definitions)?; // cross-referenced, masses unresolved
//! let catalog = builder.bootstrap()?;                 // masses and densities derived
//! ```
//!
//! Ingestion resolves every string reference into a typed id. Bootstrap
//! orders all producible items topologically along their recipe inputs and
//! derives per-unit mass (and, for materials with recipes, density) by mass
//! balance over each item's primary recipe. Any integrity defect aborts the
//! build; there is no partially-built catalog.
//!
//! Once built, [`catalog::Catalog`] has no `&mut self` methods and can be
//! shared across threads behind an `Arc`.

pub mod bootstrap;
pub mod catalog;
pub mod defaults;
pub mod definition;
pub mod error;
pub mod specification;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use catalog::{
    Catalog, CatalogBuilder, Component, ComponentId, Form, FormId, ItemRef, Material, MaterialId,
    Recipe, RecipeInput, RecipeOutput, Resource, ResourceId,
};
pub use definition::CatalogDefinitions;
pub use error::CatalogError;
