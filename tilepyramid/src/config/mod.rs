//! Configuration for pyramid runs.
//!
//! [`TileSetConfig`] is the immutable parameter set driving a run, built
//! once through its validating builder. [`ConfigFile`] layers an optional
//! INI file underneath, so command-line tools can overlay flags on top of
//! persistent settings.
//!
//! # Example
//!
//! ```
//! use tilepyramid::config::TileSetConfig;
//!
//! let config = TileSetConfig::builder()
//!     .with_tile_size(256)
//!     .with_zoom_range(0, 6)
//!     .build()
//!     .unwrap();
//! assert!(config.tms());
//! ```

mod error;
mod file;
mod pattern;
mod tileset;

pub use error::ConfigError;
pub use file::{config_file_path, ConfigFile, ConfigFileError, RunSection, TilesSection};
pub use pattern::StorePattern;
pub use tileset::{TileSetConfig, TileSetConfigBuilder};
