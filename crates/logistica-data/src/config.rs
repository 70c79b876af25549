//! Simulation configuration files.

use crate::loader::{DataLoadError, Format, detect_format, parse_error};
use logistica_world::SimulationConfig;
use std::path::Path;
use tracing::debug;

/// Read a [`SimulationConfig`] from a `.ron`, `.toml` or `.json` file.
/// Fields absent from the file take their defaults.
pub fn load_simulation_config(path: &Path) -> Result<SimulationConfig, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig = match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e))?,
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e))?,
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(path, e))?,
    };
    debug!(path = %path.display(), ?config, "simulation config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logistica_core::GalacticDateTime;
    use std::fs;
    use std::path::PathBuf;

    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "logistica_config_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let dir = make_test_dir("toml");
        let path = dir.join("simulation.toml");
        fs::write(
            &path,
            r#"
minutes_per_tick = 60

[construction]
meters_per_cell = 500.0

[construction.edge_items_per_km]
res_rail = 4.0
"#,
        )
        .unwrap();

        let config = load_simulation_config(&path).unwrap();
        assert_eq!(config.minutes_per_tick, 60);
        assert_eq!(config.start_time, SimulationConfig::default().start_time);
        assert_eq!(config.construction.meters_per_cell, 500.0);
        assert_eq!(config.construction.edge_items_per_km.get("res_rail"), Some(&4.0));
        assert_eq!(config.construction.edge_items_per_km.len(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn ron_start_time_in_minutes() {
        let dir = make_test_dir("ron");
        let path = dir.join("simulation.ron");
        fs::write(&path, "(start_time: 2880)").unwrap();

        let config = load_simulation_config(&path).unwrap();
        assert_eq!(config.start_time, GalacticDateTime::from_parts(1, 1, 3, 0, 0));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = make_test_dir("json_malformed");
        let path = dir.join("simulation.json");
        fs::write(&path, r#"{"minutes_per_tick": "soon"}"#).unwrap();

        let err = load_simulation_config(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { .. }));
        assert!(err.to_string().contains("simulation.json"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unsupported_extension() {
        let result = load_simulation_config(Path::new("simulation.yaml"));
        assert!(matches!(result, Err(DataLoadError::UnsupportedFormat { .. })));
    }
}
