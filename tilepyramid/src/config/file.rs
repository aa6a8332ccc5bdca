//! Persistent configuration file.
//!
//! Settings live in an INI file, by default at the per-user configuration
//! location (for example `~/.config/tilepyramid/config.ini`). Parsing starts
//! from the defaults and overlays any keys that are present, so a partial
//! file is fine:
//!
//! ```ini
//! [tiles]
//! tile_size = 256
//! format = jpeg
//! jpeg_quality = 80
//! fill_color = white
//! pattern = %d/%d/%d
//! tms = true
//! zoom_min = 0
//! zoom_max = 8
//! scaling_up = 0
//!
//! [run]
//! force = false
//! clean_up = false
//! parallel = false
//! ```

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::raster::{FillColor, TileFormat};

use super::{ConfigError, StorePattern, TileSetConfig, TileSetConfigBuilder};

/// Errors from loading or parsing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file could not be read or parsed as INI.
    #[error("cannot load config file {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// A key holds a value that does not parse.
    #[error("invalid config value [{section}] {key} = '{value}': {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// `[tiles]` section: the tile set parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TilesSection {
    pub tile_size: u32,
    pub format: TileFormat,
    pub jpeg_quality: u8,
    pub fill_color: FillColor,
    pub pattern: StorePattern,
    pub tms: bool,
    pub zoom_min: u8,
    pub zoom_max: u8,
    pub scaling_up: u8,
}

impl Default for TilesSection {
    fn default() -> Self {
        Self {
            tile_size: 256,
            format: TileFormat::Jpeg,
            jpeg_quality: 80,
            fill_color: FillColor::WHITE,
            pattern: StorePattern::default(),
            tms: true,
            zoom_min: 0,
            zoom_max: 8,
            scaling_up: 0,
        }
    }
}

/// `[run]` section: how a run behaves, not what it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSection {
    pub force: bool,
    pub clean_up: bool,
    pub parallel: bool,
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    pub tiles: TilesSection,
    pub run: RunSection,
}

impl ConfigFile {
    /// Load and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_file(path).map_err(|source| ConfigFileError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        parse_ini(&ini)
    }

    /// Load `path` when given, otherwise the per-user default location.
    ///
    /// A missing file is not an error; the defaults apply.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigFileError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_file_path(),
        };
        if !path.is_file() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Turn the `[tiles]` section into a validated [`TileSetConfig`],
    /// with the `[run]` section's `force` applied.
    pub fn tile_set_config(&self) -> Result<TileSetConfig, ConfigError> {
        self.tile_set_builder().build()
    }

    /// A builder pre-populated from this file, for callers that overlay
    /// command-line values before building.
    pub fn tile_set_builder(&self) -> TileSetConfigBuilder {
        TileSetConfigBuilder::new()
            .with_tile_size(self.tiles.tile_size)
            .with_format(self.tiles.format)
            .with_jpeg_quality(self.tiles.jpeg_quality)
            .with_fill_color(self.tiles.fill_color)
            .with_store_pattern(self.tiles.pattern.clone())
            .with_tms(self.tiles.tms)
            .with_zoom_range(self.tiles.zoom_min, self.tiles.zoom_max)
            .with_scaling_up_limit(self.tiles.scaling_up)
            .with_force(self.run.force)
    }
}

/// Default per-user configuration file location.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tilepyramid")
        .join("config.ini")
}

/// Overlay INI values onto the defaults.
fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    if let Some(section) = ini.section(Some("tiles")) {
        if let Some(v) = section.get("tile_size") {
            config.tiles.tile_size = parse_value("tiles", "tile_size", v, "a pixel count")?;
        }
        if let Some(v) = section.get("format") {
            config.tiles.format = v.parse().map_err(|_| invalid(
                "tiles",
                "format",
                v,
                "must be a jpeg or png family name",
            ))?;
        }
        if let Some(v) = section.get("jpeg_quality") {
            config.tiles.jpeg_quality = parse_value("tiles", "jpeg_quality", v, "0-100")?;
        }
        if let Some(v) = section.get("fill_color") {
            config.tiles.fill_color = v.parse().map_err(|_| invalid(
                "tiles",
                "fill_color",
                v,
                "must be white, black, transparent or #rrggbb",
            ))?;
        }
        if let Some(v) = section.get("pattern") {
            config.tiles.pattern = v.parse().map_err(|_| invalid(
                "tiles",
                "pattern",
                v,
                "must contain exactly three %d slots",
            ))?;
        }
        if let Some(v) = section.get("tms") {
            config.tiles.tms = parse_bool("tiles", "tms", v)?;
        }
        if let Some(v) = section.get("zoom_min") {
            config.tiles.zoom_min = parse_value("tiles", "zoom_min", v, "a zoom level")?;
        }
        if let Some(v) = section.get("zoom_max") {
            config.tiles.zoom_max = parse_value("tiles", "zoom_max", v, "a zoom level")?;
        }
        if let Some(v) = section.get("scaling_up") {
            config.tiles.scaling_up = parse_value("tiles", "scaling_up", v, "a zoom level")?;
        }
    }

    if let Some(section) = ini.section(Some("run")) {
        if let Some(v) = section.get("force") {
            config.run.force = parse_bool("run", "force", v)?;
        }
        if let Some(v) = section.get("clean_up") {
            config.run.clean_up = parse_bool("run", "clean_up", v)?;
        }
        if let Some(v) = section.get("parallel") {
            config.run.parallel = parse_bool("run", "parallel", v)?;
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_value<T: std::str::FromStr>(
    section: &str,
    key: &str,
    value: &str,
    expected: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, &format!("expected {expected}")))
}

fn parse_bool(section: &str, key: &str, value: &str) -> Result<bool, ConfigFileError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(invalid(section, key, value, "expected true or false")),
    }
}
