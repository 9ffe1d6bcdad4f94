//! Configuration and settings management for holekit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the default file lives in the platform config
//! directory.
//!
//! Configuration is organized into logical sections:
//! - Placement defaults (clearance, diameters, spacings, mode, tuning)
//! - Import options (unit scale override, cable layer name)
//! - Export options (output naming, previews written alongside)
//! - Preview style (colours and sizes)

use crate::error::{SettingsError, SettingsResult};
use holekit_camtools::{PlacementParameters, PlacementTuning};
use holekit_core::PlacementMode;
use holekit_designer::preview::parse_hex_color;
use holekit_designer::{ImportOptions, PreviewStyle, DEFAULT_CABLE_LAYER};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Application directory name under the platform config directory
pub const APP_DIR: &str = "holekit";
/// Default configuration file name
pub const CONFIG_FILE: &str = "config.toml";

/// Placement defaults offered when the user gives no value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    pub edge_clearance: f64,
    pub drill_diameter: f64,
    pub drill_spacing: f64,
    pub placement_mode: PlacementMode,
    pub cable_diameter: f64,
    pub cable_spacing: f64,
    pub tuning: PlacementTuning,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            edge_clearance: 15.0,
            drill_diameter: 5.0,
            drill_spacing: 200.0,
            placement_mode: PlacementMode::Border,
            cable_diameter: 10.0,
            cable_spacing: 150.0,
            tuning: PlacementTuning::default(),
        }
    }
}

/// Drawing import options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Drawing units to millimetres; unset means read it from the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_scale: Option<f64>,
    pub cable_layer: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            unit_scale: None,
            cable_layer: DEFAULT_CABLE_LAYER.to_string(),
        }
    }
}

/// Output naming and companion previews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Appended to the input file stem when no output path is given
    pub output_suffix: String,
    /// Write `<output>.svg` next to the DXF
    pub svg_preview: bool,
    /// Write `<output>.png` next to the DXF
    pub png_preview: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_suffix: "_holes".to_string(),
            svg_preview: false,
            png_preview: false,
        }
    }
}

impl ExportSettings {
    /// Default DXF output path for `input`: same directory, suffixed stem.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "panel".to_string());
        input.with_file_name(format!("{}{}.dxf", stem, self.output_suffix))
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub placement: PlacementSettings,
    pub import: ImportSettings,
    pub export: ExportSettings,
    pub preview: PreviewStyle,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/holekit/config.toml`
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("platform config directory not found".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, else the default file when it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_config_path() {
            Ok(default_path) if default_path.exists() => Self::load_from_file(&default_path),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.placement_parameters()
            .validate()
            .map_err(|e| SettingsError::invalid("placement", e.to_string()))?;

        if let Some(scale) = self.import.unit_scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(SettingsError::invalid(
                    "import.unit_scale",
                    format!("must be > 0, got {}", scale),
                ));
            }
        }
        if self.import.cable_layer.trim().is_empty() {
            return Err(SettingsError::invalid("import.cable_layer", "must not be empty"));
        }

        if self.export.output_suffix.contains(['/', '\\']) {
            return Err(SettingsError::invalid(
                "export.output_suffix",
                "must not contain path separators",
            ));
        }

        let preview = &self.preview;
        if preview.width == 0 || preview.height == 0 {
            return Err(SettingsError::invalid("preview", "image dimensions must be > 0"));
        }
        if !preview.padding.is_finite() || preview.padding < 0.0 {
            return Err(SettingsError::invalid("preview.padding", "must be >= 0"));
        }
        if !preview.dot_radius.is_finite() || preview.dot_radius <= 0.0 {
            return Err(SettingsError::invalid("preview.dot_radius", "must be > 0"));
        }
        for (key, value) in [
            ("preview.background", &preview.background),
            ("preview.outline", &preview.outline),
            ("preview.drill", &preview.drill),
            ("preview.cable", &preview.cable),
        ] {
            if parse_hex_color(value).is_none() {
                return Err(SettingsError::invalid(
                    key,
                    format!("'{}' is not a #rrggbb colour", value),
                ));
            }
        }

        Ok(())
    }

    /// Placement record for the orchestrator.
    pub fn placement_parameters(&self) -> PlacementParameters {
        let p = &self.placement;
        PlacementParameters::new(
            p.edge_clearance,
            p.drill_diameter,
            p.drill_spacing,
            p.placement_mode,
            p.cable_diameter,
            p.cable_spacing,
        )
        .with_tuning(p.tuning)
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            unit_scale: self.import.unit_scale,
            cable_layer: self.import.cable_layer.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(SettingsError::invalid(
                "path",
                format!("{}: config file must be .json or .toml", path.display()),
            )),
        }
    }
}
