//! Application configuration.
//!
//! Handles loading, validating, and writing `config.toml`. The file is
//! optional and sparse: any key left out takes its documented default. What
//! is present must be well formed. A TOML syntax error, an unknown key, a
//! malformed color or an out-of-range quality is reported as a
//! [`ConfigError`] instead of being replaced by a default.
//!
//! ## Config File Location
//!
//! `<config dir>/phone-frame/config.toml` (for example
//! `~/.config/phone-frame/config.toml` on Linux), or any path passed with
//! `--config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_image_folder = "~/Pictures"   # Where wallpapers are picked from
//! output_image_folder = "~/Pictures"   # Where silent saves are written
//! silent_save = false                  # Save without asking for a path
//! filename_pattern = "timestamp"       # "timestamp" or "sequence"
//! save_format = "PNG"                  # "PNG" or "JPG"
//! save_quality = 95                    # JPEG quality (1-100)
//! canvas_background_color = "#000000"  # Canvas fill behind the frame
//! ```

use crate::imaging::{HexColor, Quality, SaveFormat};
use crate::save::{NamingPattern, SavePolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Application configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Folder the wallpaper picker starts in.
    pub source_image_folder: PathBuf,
    /// Folder silent saves are written to. Created on demand.
    pub output_image_folder: PathBuf,
    /// Save without prompting, using a generated filename.
    pub silent_save: bool,
    /// Naming scheme for silent saves.
    pub filename_pattern: NamingPattern,
    /// Output encoding.
    pub save_format: SaveFormat,
    /// JPEG quality, 1-100. Ignored for PNG.
    pub save_quality: u32,
    /// Canvas fill color as `#RRGGBB`.
    pub canvas_background_color: HexColor,
}

/// The user's pictures folder, falling back to `~/Pictures`.
fn default_image_folder() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("Pictures"))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_image_folder: default_image_folder(),
            output_image_folder: default_image_folder(),
            silent_save: false,
            filename_pattern: NamingPattern::Timestamp,
            save_format: SaveFormat::Png,
            save_quality: 95,
            canvas_background_color: HexColor::BLACK,
        }
    }
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.save_quality) {
            return Err(ConfigError::Validation(format!(
                "save_quality must be 1-100, got {}",
                self.save_quality
            )));
        }
        if self.output_image_folder.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_image_folder must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.save_quality)
    }

    /// The subset of settings the save-path resolver consumes.
    pub fn save_policy(&self) -> SavePolicy {
        SavePolicy {
            silent: self.silent_save,
            output_folder: self.output_image_folder.clone(),
            naming: self.filename_pattern,
            format: self.save_format,
            quality: self.quality(),
        }
    }
}

/// Default location of the config file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("phone-frame").join("config.toml"))
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`.
///
/// A missing file yields the defaults. Any other failure is returned.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Write `config` to `path`, creating parent folders as needed.
pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    config.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# phone-frame configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Folders
# ---------------------------------------------------------------------------
# Where the wallpaper picker starts. Defaults to your Pictures folder.
# source_image_folder = "/home/me/Pictures"

# Where silent saves are written. Created if it does not exist.
# Defaults to your Pictures folder.
# output_image_folder = "/home/me/Pictures"

# ---------------------------------------------------------------------------
# Saving
# ---------------------------------------------------------------------------
# Save without asking for a destination, using a generated filename.
silent_save = false

# Generated filename scheme:
#   "timestamp" -> wallpaper_20261016_142233.png (same-second saves overwrite)
#   "sequence"  -> wallpaper_004.png (one past the highest existing number)
filename_pattern = "timestamp"

# "PNG" (lossless, keeps transparency) or "JPG" (lossy, opaque).
save_format = "PNG"

# JPEG quality from 1 (smallest) to 100 (best). Ignored for PNG.
save_quality = 95

# ---------------------------------------------------------------------------
# Canvas
# ---------------------------------------------------------------------------
# Fill color behind the frame and between grid cells, as #RRGGBB.
canvas_background_color = "#000000"
"##
}
