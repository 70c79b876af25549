//! Catalog content from a data directory.
//!
//! A directory holds up to four list files, one per definition kind:
//!
//! | base name    | required | TOML table key |
//! |--------------|----------|----------------|
//! | `forms`      | yes      | `forms`        |
//! | `materials`  | yes      | `materials`    |
//! | `resources`  | yes      | `resources`    |
//! | `components` | no       | `components`   |
//!
//! Each may be `.ron`, `.toml` or `.json`, but only one format per base name.

use crate::loader::{DataLoadError, deserialize_list, find_data_file, require_data_file};
use logistica_catalog::{Catalog, CatalogDefinitions};
use std::path::Path;
use tracing::info;

/// Read the definition lists in `dir` without building anything.
pub fn load_catalog_definitions(dir: &Path) -> Result<CatalogDefinitions, DataLoadError> {
    let forms = deserialize_list(&require_data_file(dir, "forms")?, "forms")?;
    let materials = deserialize_list(&require_data_file(dir, "materials")?, "materials")?;
    let resources = deserialize_list(&require_data_file(dir, "resources")?, "resources")?;
    let components = match find_data_file(dir, "components")? {
        Some(path) => deserialize_list(&path, "components")?,
        None => Vec::new(),
    };

    Ok(CatalogDefinitions {
        forms,
        materials,
        resources,
        components,
    })
}

/// Load the definitions in `dir` and build the catalog from them.
pub fn load_catalog(dir: &Path) -> Result<Catalog, DataLoadError> {
    let definitions = load_catalog_definitions(dir)?;
    let catalog = Catalog::build(&definitions)?;
    info!(dir = %dir.display(), "catalog loaded");
    Ok(catalog)
}
