use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::data::export::EXPORT_FILE_NAME;

/// File looked up in the working directory at start-up.
pub const CONFIG_FILE_NAME: &str = "factbook-explorer.json";

/// Where the dashboard reads from and what it writes.
///
/// Every key is optional in the JSON file; absent keys keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// SQLite database holding the source table.
    pub database: PathBuf,
    /// Source table name.
    pub table: String,
    /// Decorative background image, skipped when the file does not exist.
    pub background: Option<PathBuf>,
    /// Suggested name in the save dialog.
    pub export_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("factbook.db"),
            table: "facts".to_string(),
            background: Some(PathBuf::from("background.jpg")),
            export_file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Read `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Background image path, if configured and present on disk.
    pub fn background_image(&self) -> Option<&Path> {
        self.background.as_deref().filter(|p| p.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_factbook_layout() {
        let config = DashboardConfig::default();
        assert_eq!(config.database, PathBuf::from("factbook.db"));
        assert_eq!(config.table, "facts");
        assert_eq!(config.export_file_name, "filtered_factbook_data.csv");
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = DashboardConfig::from_json(r#"{ "database": "data/world.sqlite", "background": null }"#)
            .unwrap();
        assert_eq!(config.database, PathBuf::from("data/world.sqlite"));
        assert_eq!(config.table, "facts");
        assert_eq!(config.background, None);
        assert_eq!(config.background_image(), None);
    }

    #[test]
    fn missing_config_file_gives_defaults() {
        let config = DashboardConfig::load_or_default(Path::new("/nonexistent/factbook-explorer.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn malformed_config_file_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ database = 1 }").unwrap();

        let err = DashboardConfig::load_or_default(&path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("parsing "), "{message}");
        assert!(message.contains(CONFIG_FILE_NAME), "{message}");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(DashboardConfig::from_json("{ database = 1 }").is_err());
    }
}
