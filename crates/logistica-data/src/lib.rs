//! Logistica Data -- catalog content and simulation settings from files.
//!
//! Every loader accepts RON, TOML or JSON, chosen by file extension.

pub mod catalog;
pub mod config;
pub mod loader;

pub use catalog::{load_catalog, load_catalog_definitions};
pub use config::load_simulation_config;
pub use loader::DataLoadError;
