use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::store::LoadMode;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Runtime knobs. Every field is optional in the JSON file.
///
/// ```json
/// { "data_dir": "data", "load_mode": "cached", "preview_rows": 1000, "map_sample_cap": 5000 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Folder holding the six spreadsheets.
    pub data_dir: PathBuf,
    pub load_mode: LoadMode,
    /// Rows shown per table on the dataset page; `null` shows all rows.
    pub preview_rows: Option<usize>,
    /// Points per map plot; `null` plots every row.
    pub map_sample_cap: Option<usize>,
    /// Fixed seed for map subsampling; random per run when absent.
    pub sample_seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            load_mode: LoadMode::Cached,
            preview_rows: Some(1000),
            map_sample_cap: Some(5000),
            sample_seed: None,
        }
    }
}

impl DashboardConfig {
    /// `./dashboard.json` when present and valid, built-in defaults otherwise.
    pub fn load() -> Self {
        let local = PathBuf::from(CONFIG_FILE);
        if !local.exists() {
            log::info!("No {CONFIG_FILE} found, using built-in defaults");
            return Self::default();
        }
        match Self::load_from_file(&local) {
            Ok(config) => {
                log::info!("Loaded config from {}: {config:?}", local.display());
                config
            }
            Err(e) => {
                log::warn!("Failed to load {}, using defaults: {e:#}", local.display());
                Self::default()
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard_behaviour() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.load_mode, LoadMode::Cached);
        assert_eq!(cfg.preview_rows, Some(1000));
        assert_eq!(cfg.map_sample_cap, Some(5000));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "load_mode": "fresh", "map_sample_cap": null }"#).unwrap();

        let cfg = DashboardConfig::load_from_file(&path).unwrap();
        assert_eq!(cfg.load_mode, LoadMode::Fresh);
        assert_eq!(cfg.map_sample_cap, None);
        assert_eq!(cfg.preview_rows, Some(1000));
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ load_mode: ").unwrap();
        assert!(DashboardConfig::load_from_file(&path).is_err());
    }
}
