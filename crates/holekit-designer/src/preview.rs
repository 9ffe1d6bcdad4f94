//! Preview styling shared by the SVG and PNG renderers.

use crate::renderer::save_png;
use crate::svg_renderer::render_svg;
use anyhow::{Context, Result};
use holekit_core::{HoleSet, Polygon};
use serde::{Deserialize, Serialize};

/// Colours and sizes for previews. Colours are `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewStyle {
    /// Margin around the panel (mm in SVG output, pixels in PNG output)
    pub padding: f64,
    pub background: String,
    pub outline: String,
    pub outline_width: f64,
    pub drill: String,
    pub cable: String,
    /// Marker radius (mm)
    pub dot_radius: f64,
    /// PNG size in pixels
    pub width: u32,
    pub height: u32,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            padding: 20.0,
            background: "#071024".to_string(),
            outline: "#60a5fa".to_string(),
            outline_width: 1.0,
            drill: "#34d399".to_string(),
            cable: "#fbbf24".to_string(),
            dot_radius: 2.0,
            width: 1024,
            height: 768,
        }
    }
}

/// Parses `#rrggbb` (the `#` is optional).
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Writes a preview to `path`, SVG or PNG by extension.
pub fn write_preview(
    path: impl AsRef<std::path::Path>,
    panel: &Polygon,
    drill: &HoleSet,
    cable: &HoleSet,
    style: &PreviewStyle,
) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "svg" => {
            let svg = render_svg(panel, drill, cable, style);
            std::fs::write(path, svg)
                .with_context(|| format!("Failed to write SVG preview {}", path.display()))?;
        }
        "png" => {
            save_png(path, panel, drill, cable, style)
                .with_context(|| format!("Failed to write PNG preview {}", path.display()))?;
        }
        other => anyhow::bail!("Unsupported preview format: {} (use .svg or .png)", other),
    }
    tracing::info!("Wrote preview {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#071024"), Some((7, 16, 36)));
        assert_eq!(parse_hex_color("34d399"), Some((0x34, 0xd3, 0x99)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn test_style_serde_defaults() {
        let style: PreviewStyle = serde_json::from_str(r#"{"padding": 5.0}"#).unwrap();
        assert_eq!(style.padding, 5.0);
        assert_eq!(style.drill, "#34d399");
        assert_eq!(style.width, 1024);
    }
}
