//! Startup configuration.
//!
//! The sandbox is configured once, before the first frame. Values come from
//! an optional YAML file; anything missing falls back to the defaults below,
//! which reproduce the classic 400x400 level of 10px cells.

use std::path::Path;

use serde::Deserialize;

use crate::domain::{Algorithm, GridGeometry, grid_dimensions};
use crate::error::SandboxError;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level sandbox configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SandboxConfig {
    /// Window / camera size.
    #[serde(default)]
    pub screen: ScreenConfig,

    /// Level size in pixels; fixes the grid dimensions.
    #[serde(default)]
    pub level: LevelConfig,

    /// Cell geometry.
    #[serde(default)]
    pub cell: CellConfig,

    /// Panning behaviour.
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Simulation options.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Entity registry sizing.
    #[serde(default)]
    pub registry: RegistryConfig,
}

impl SandboxConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Grid dimensions `(width, height)` in cells.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::NonIntegerGrid`] unless both level dimensions
    /// are exact multiples of the cell dimensions.
    pub fn grid_dimensions(&self) -> Result<(usize, usize), SandboxError> {
        grid_dimensions(
            self.level.width,
            self.level.height,
            self.cell.width,
            self.cell.height,
        )
    }
}

/// Screen (camera viewport) size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self { width: 1280, height: 720 }
    }
}

/// Level size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self { width: 400, height: 400 }
    }
}

/// Cell size and spacing in pixels.
///
/// `width`/`height` divide the level into the grid; the padding values are
/// the distance between the origins of neighbouring cells on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CellConfig {
    pub width: u32,
    pub height: u32,
    pub x_padding: u32,
    pub y_padding: u32,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            x_padding: 10,
            y_padding: 10,
        }
    }
}

impl From<CellConfig> for GridGeometry {
    fn from(cell: CellConfig) -> Self {
        Self {
            cell_width: cell.width,
            cell_height: cell.height,
            x_padding: cell.x_padding,
            y_padding: cell.y_padding,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Pixels moved per frame while a direction is held.
    pub pan_step: i32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { pan_step: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// How neighbour counts are computed each generation.
    pub algorithm: Algorithm,

    /// Minimum time per frame.
    pub frame_delay_ms: u64,

    /// Name of a preset pattern stamped at the grid centre on startup.
    pub seed_pattern: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            frame_delay_ms: 17,
            seed_pattern: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Spare entity slots beyond the camera and the grid cells.
    pub headroom: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { headroom: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_classic_level() {
        let config = SandboxConfig::default();
        assert_eq!(config.level, LevelConfig { width: 400, height: 400 });
        assert_eq!(config.viewport.pan_step, 10);
        assert_eq!(config.simulation.frame_delay_ms, 17);
        assert_eq!(config.grid_dimensions().ok(), Some((40, 40)));
    }

    #[test]
    fn test_parse_partial_yaml_keeps_defaults() {
        let yaml = "level:\n  width: 120\ncell:\n  height: 20\n";
        let config = SandboxConfig::parse(yaml).expect("valid yaml");

        assert_eq!(config.level.width, 120);
        assert_eq!(config.level.height, 400);
        assert_eq!(config.cell.width, 10);
        assert_eq!(config.cell.height, 20);
        assert_eq!(config.grid_dimensions().ok(), Some((12, 20)));
    }

    #[test]
    fn test_parse_algorithm_and_seed() {
        let yaml = "simulation:\n  algorithm: parallel\n  seed_pattern: glider\n";
        let config = SandboxConfig::parse(yaml).expect("valid yaml");

        assert_eq!(config.simulation.algorithm, Algorithm::Parallel);
        assert_eq!(config.simulation.seed_pattern.as_deref(), Some("glider"));
    }

    #[test]
    fn test_rejects_non_integer_grid() {
        let mut config = SandboxConfig::default();
        config.level.width = 405;
        assert!(matches!(
            config.grid_dimensions(),
            Err(SandboxError::NonIntegerGrid { level_width: 405, .. })
        ));
    }

    #[test]
    fn test_rejects_zero_cell_size() {
        let mut config = SandboxConfig::default();
        config.cell.height = 0;
        assert!(config.grid_dimensions().is_err());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(matches!(
            SandboxConfig::parse("level: [1, 2"),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
