//! Workbench configuration.
//!
//! Read from `$DATAQUILL_CONFIG` when set, otherwise from
//! `<config_dir>/dataquill/config.json`. A missing file means defaults; every
//! field is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::QuillError;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "DATAQUILL_CONFIG";

/// Initial query shown in the editor.
pub const DEFAULT_INITIAL_QUERY: &str = "SELECT * FROM Customers WHERE Country = 'Germany';";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Pane geometry and clamp limits.
    pub layout: LayoutConfig,
    /// Simulated engine settings.
    pub simulator: SimulatorConfig,
    /// Schema refresh settings.
    pub refresh: RefreshConfig,
    /// Schema tree settings.
    pub tree: TreeConfig,
    /// Query editor settings.
    pub editor: EditorConfig,
    /// Logging overrides.
    pub logging: LoggingConfig,
}

/// Pane geometry in logical pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub default_left_width: f32,
    pub min_left_width: f32,
    pub max_left_width: f32,
    pub default_top_height: f32,
    pub min_top_height: f32,
    /// Space kept below the editor for the results pane.
    pub bottom_reserve: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_left_width: 320.0,
            min_left_width: 250.0,
            max_left_width: 400.0,
            default_top_height: 300.0,
            min_top_height: 150.0,
            bottom_reserve: 150.0,
        }
    }
}

/// Simulated engine latency window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self { min_delay_ms: 1000, max_delay_ms: 2000 }
    }
}

/// Schema refresh settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Artificial delay before the source is loaded.
    pub delay_ms: u64,
    /// Load the catalog from this JSON file instead of the built-in sample.
    pub schema_file: Option<PathBuf>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { delay_ms: 1500, schema_file: None }
    }
}

impl RefreshConfig {
    /// Delay as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Schema tree settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Levels below the roots that start expanded.
    pub seed_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { seed_depth: crate::schema_tree::DEFAULT_SEED_DEPTH }
    }
}

/// Query editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub initial_query: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { initial_query: DEFAULT_INITIAL_QUERY.to_string() }
    }
}

/// Logging overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, takes priority over `DATAQUILL_LOG`.
    pub filter: Option<String>,
    /// Log directory, defaults to `<data_dir>/dataquill/logs`.
    pub directory: Option<PathBuf>,
}

impl WorkspaceConfig {
    /// Load from the default location.
    pub fn load() -> Result<Self, QuillError> {
        match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, QuillError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            QuillError::io_with_source(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| QuillError::config(format!("Invalid config {}: {e}", path.display())))?;
        config.validate()?;

        tracing::info!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Write to `path` as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), QuillError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| QuillError::serialization("Failed to serialize config", e))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject inverted bounds and delay windows.
    pub fn validate(&self) -> Result<(), QuillError> {
        let layout = &self.layout;
        if layout.min_left_width < 0.0 || layout.min_top_height < 0.0 || layout.bottom_reserve < 0.0 {
            return Err(QuillError::config("layout limits must not be negative"));
        }
        if layout.min_left_width > layout.max_left_width {
            return Err(QuillError::config(format!(
                "layout.min_left_width ({}) exceeds layout.max_left_width ({})",
                layout.min_left_width, layout.max_left_width
            )));
        }
        if self.simulator.min_delay_ms > self.simulator.max_delay_ms {
            return Err(QuillError::config(format!(
                "simulator.min_delay_ms ({}) exceeds simulator.max_delay_ms ({})",
                self.simulator.min_delay_ms, self.simulator.max_delay_ms
            )));
        }
        Ok(())
    }
}

/// `$DATAQUILL_CONFIG`, else `<config_dir>/dataquill/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("dataquill").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = WorkspaceConfig::default();
        assert_eq!(config.layout.default_left_width, 320.0);
        assert_eq!(config.layout.default_top_height, 300.0);
        assert_eq!(config.simulator.min_delay_ms, 1000);
        assert_eq!(config.refresh.delay(), Duration::from_millis(1500));
        assert_eq!(config.tree.seed_depth, 2);
        assert_eq!(config.editor.initial_query, DEFAULT_INITIAL_QUERY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = WorkspaceConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, WorkspaceConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"simulator": {"min_delay_ms": 5, "max_delay_ms": 10}}"#).unwrap();

        let config = WorkspaceConfig::load_from(&path).unwrap();
        assert_eq!(config.simulator, SimulatorConfig { min_delay_ms: 5, max_delay_ms: 10 });
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ layout: ").unwrap();

        let err = WorkspaceConfig::load_from(&path).unwrap_err();
        assert_eq!(err.category(), "Config");
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut config = WorkspaceConfig::default();
        config.layout.min_left_width = 500.0;
        assert!(config.validate().is_err());

        let mut config = WorkspaceConfig::default();
        config.simulator.min_delay_ms = 3000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = WorkspaceConfig::default();
        config.tree.seed_depth = 1;
        config.save_to(&path).unwrap();

        assert_eq!(WorkspaceConfig::load_from(&path).unwrap(), config);
    }
}
