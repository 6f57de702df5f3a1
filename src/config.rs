use crate::error::CollectionResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// The inventory file the user last opened or created
    #[serde(rename = "InventoryFile", default, skip_serializing_if = "Option::is_none")]
    pub inventory_file: Option<PathBuf>,
    #[serde(rename = "CatalogFile", default, skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<PathBuf>,
}

impl AppConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tcg_collection")
            .join("config.json")
    }

    /// Load config from `path`, or defaults if it is missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => {
                        log::info!("Loaded configuration from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        log::warn!("Failed to parse config file, using defaults: {}", e);
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read config file, using defaults: {}", e);
                }
            }
        }
        log::info!("Starting with default configuration");
        Self::default()
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> CollectionResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        log::debug!("Saved configuration to {}", path.display());
        Ok(())
    }
}
