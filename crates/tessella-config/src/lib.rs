//! Configuration for the tessella portfolio mosaic.
//!
//! Settings live in a TOML file in the platform config directory
//! (`~/.config/tessella/config.toml` on Linux). Every field has a default, so
//! a partial file or no file at all is fine.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tessella_core::{Layout, Rgb};

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config directory available on this platform")]
    NoConfigDir,

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Triangle edge length in pixels on regular viewports.
    pub triangle_size: f64,
    /// Triangle edge length on viewports narrower than `narrow_breakpoint`.
    pub narrow_triangle_size: f64,
    /// Viewport width in pixels below which the narrow size applies.
    pub narrow_breakpoint: f64,
    pub layout: Layout,
    /// Pixel width of one terminal cell.
    pub cell_width_px: f64,
    /// Pixel height of one terminal cell.
    pub cell_height_px: f64,
    /// Quiet window before a resize rebuilds the mosaic.
    pub resize_debounce_ms: u64,
    /// Color behind the translucent tiles.
    pub backdrop: Rgb,
    /// Fixed seed for a reproducible mosaic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Derive the tile palette from the gallery images.
    pub palette_from_gallery: bool,
    /// Override for the portfolio content file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_path: Option<PathBuf>,
    /// Write logs to this file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            triangle_size: 80.0,
            narrow_triangle_size: 60.0,
            narrow_breakpoint: 768.0,
            layout: Layout::Spaced,
            cell_width_px: 10.0,
            cell_height_px: 20.0,
            resize_debounce_ms: 500,
            backdrop: Rgb::new(14, 16, 32),
            seed: None,
            palette_from_gallery: false,
            content_path: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Location of the config file for this platform.
    pub fn path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load the config from the platform location. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Load the config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Save the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, text).map_err(write_err)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "tessella")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            triangle_size = 64.0
            layout = "interlocked"
            backdrop = [0, 0, 0]
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.triangle_size, 64.0);
        assert_eq!(config.layout, Layout::Interlocked);
        assert_eq!(config.backdrop, Rgb::new(0, 0, 0));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.narrow_triangle_size, 60.0);
        assert_eq!(config.resize_debounce_ms, 500);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let err = Config::from_toml_str("layout = \"hexagonal\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid config:"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            seed: Some(99),
            palette_from_gallery: true,
            content_path: Some(PathBuf::from("/tmp/content.json")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
