//! holekit Settings Crate
//!
//! Handles application configuration: placement defaults, import and export
//! options, and preview styling, persisted as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{
    Config, ExportSettings, ImportSettings, PlacementSettings, APP_DIR, CONFIG_FILE,
};
pub use error::{SettingsError, SettingsResult};
