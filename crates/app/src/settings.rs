use std::path::Path;

use spatializer_core::{AppConfig, Result, SpatialError};

/// Loads settings from a JSON file, or the defaults when no file is given.
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    let text = std::fs::read_to_string(path)?;
    let config = parse(&text)
        .map_err(|e| SpatialError::msg(format!("invalid settings in {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "loaded settings");
    Ok(config)
}

fn parse(text: &str) -> serde_json::Result<AppConfig> {
    serde_json::from_str(text)
}
