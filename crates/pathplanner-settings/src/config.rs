//! Configuration and settings management for PathPlanner
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, stored by default in the platform configuration
//! directory.
//!
//! Configuration is organized into logical sections:
//! - Path settings (sampling, hit testing, mirroring)
//! - Output preferences (JSON formatting, recent files)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Directory under the platform config directory holding planner settings
pub const CONFIG_DIR_NAME: &str = "pathplanner";

/// Name of the configuration file in [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Path settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Time between drawn path points, in seconds
    pub sample_interval: f64,
    /// Distance within which a field location is over a control point or
    /// handle, in meters
    pub hit_tolerance: f64,
    /// Field X of the line paths are mirrored across, in meters
    pub mirror_axis: f64,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            sample_interval: 0.05,
            hit_tolerance: 0.1,
            mirror_axis: -1.4478,
        }
    }
}

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Write path files as indented JSON
    pub pretty_json: bool,
    /// Number of recent files to remember
    pub recent_files_count: usize,
    /// Recently written path files, most recent first
    pub recent_files: Vec<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            pretty_json: true,
            recent_files_count: 10,
            recent_files: Vec::new(),
        }
    }
}

/// Complete planner configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub path: PathSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl PlannerConfig {
    /// Create new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from file (.json or .toml)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to file (.json or .toml)
    ///
    /// Parent directories are created as needed.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        positive("path.sample_interval", self.path.sample_interval)?;
        positive("path.hit_tolerance", self.path.hit_tolerance)?;
        if !self.path.mirror_axis.is_finite() {
            return Err(ConfigError::out_of_range(
                "path.mirror_axis",
                self.path.mirror_axis,
            ));
        }
        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        // Remove if already in list
        self.output.recent_files.retain(|f| f != &path);

        // Add to front
        self.output.recent_files.insert(0, path);

        // Trim to max size
        self.output
            .recent_files
            .truncate(self.output.recent_files_count);
    }
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value))
    }
}
