//! Page-level configuration loaded from JSON.

use crate::globe::{ArcPosition, GlobeConfig};
use crate::nav::NavItem;
use crate::reveal::RevealConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for every component on a page. Missing sections use defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    pub reveal: RevealConfig,
    pub globe: GlobeConfig,
    pub arcs: Vec<ArcPosition>,
    pub nav_items: Vec<NavItem>,
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!(
            "Loaded scene config from {} ({} arcs, {} nav items)",
            path.display(),
            config.arcs.len(),
            config.nav_items.len()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = SceneConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            SceneConfig::from_json_str("{ nope"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            SceneConfig::load("/nonexistent/scene.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
