//! # Drawing Import Module
//!
//! Turns DXF drawings (and, as a fallback, simple SVG files) into a panel
//! outline plus an optional cable path, both in millimetres.
//!
//! Supports:
//! - `LWPOLYLINE` and `POLYLINE` entities, closed by flag or by a repeated end point
//! - Open polylines as cable path candidates
//! - Unit conversion from `$INSUNITS` or an explicit scale
//! - A single `<rect>` in an SVG file as the panel

use crate::error::{DrawingError, DrawingResult};
use dxf::entities::EntityType;
use dxf::enums::Units;
use holekit_core::geometry::remove_duplicate_points;
use holekit_core::{DrawingUnit, Path, Point, Polygon};
use std::io::Read;
use tracing::{debug, info, warn};

/// End points closer than this (drawing units) close a polyline.
pub const CLOSE_TOLERANCE: f64 = 1e-6;

/// Layer that carries the cable route.
pub const DEFAULT_CABLE_LAYER: &str = "CABLE_PATH";

/// Layer name given to entities that have none.
const DEFAULT_LAYER: &str = "0";

/// Import options shared by all drawing formats.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Drawing units to millimetres. `None` derives it from the file.
    pub unit_scale: Option<f64>,
    /// Layer searched (case-insensitively) for the cable path
    pub cable_layer: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            unit_scale: None,
            cable_layer: DEFAULT_CABLE_LAYER.to_string(),
        }
    }
}

/// Source format of an imported drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Dxf,
    Svg,
}

impl FileFormat {
    /// Detects the format from a file extension.
    pub fn from_path(path: &std::path::Path) -> DrawingResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "dxf" => Ok(Self::Dxf),
            "svg" => Ok(Self::Svg),
            other => Err(DrawingError::UnsupportedFormat(if other.is_empty() {
                "<none>".to_string()
            } else {
                other.to_string()
            })),
        }
    }
}

/// A closed outline found in the drawing, tagged with its layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedLoop {
    pub layer: String,
    /// CCW, closing vertex not repeated
    pub polygon: Polygon,
}

/// An open or closed polyline in entity order, tagged with its layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedPolyline {
    pub layer: String,
    pub points: Vec<Point>,
    pub closed: bool,
}

impl TaggedPolyline {
    /// Path form used for arc-length sampling. Closed polylines repeat their
    /// first point so the closing edge is walked.
    pub fn to_path(&self) -> Path {
        let mut points = self.points.clone();
        if self.closed {
            if let Some(first) = points.first().copied() {
                points.push(first);
            }
        }
        Path::new(points)
    }
}

/// Result of importing a drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDrawing {
    /// Closed loops, largest absolute area first; never empty
    outlines: Vec<TaggedLoop>,
    /// Every polyline in entity order
    pub polylines: Vec<TaggedPolyline>,
    pub format: FileFormat,
    /// Factor applied to the source coordinates
    pub unit_scale: f64,
    cable_layer: String,
}

impl ImportedDrawing {
    fn new(
        mut outlines: Vec<TaggedLoop>,
        polylines: Vec<TaggedPolyline>,
        format: FileFormat,
        unit_scale: f64,
        cable_layer: &str,
    ) -> DrawingResult<Self> {
        if outlines.is_empty() {
            return Err(DrawingError::NoClosedOutline);
        }
        outlines.sort_by(|a, b| b.polygon.area().total_cmp(&a.polygon.area()));
        Ok(Self {
            outlines,
            polylines,
            format,
            unit_scale,
            cable_layer: cable_layer.to_string(),
        })
    }

    /// Every closed loop, largest absolute area first.
    pub fn outlines(&self) -> &[TaggedLoop] {
        &self.outlines
    }

    /// The panel outline: the closed loop with the largest absolute area.
    pub fn panel(&self) -> &Polygon {
        &self.outlines[0].polygon
    }

    /// The first polyline on the cable layer, if any.
    pub fn cable_path(&self) -> Option<Path> {
        self.polylines
            .iter()
            .find(|p| p.layer.eq_ignore_ascii_case(&self.cable_layer))
            .map(TaggedPolyline::to_path)
    }

    /// Distinct layer names in first-seen order.
    pub fn layers(&self) -> Vec<&str> {
        let mut layers: Vec<&str> = Vec::new();
        for p in &self.polylines {
            if !layers.contains(&p.layer.as_str()) {
                layers.push(&p.layer);
            }
        }
        layers
    }
}

/// DXF importer producing a panel outline and cable path
#[derive(Debug, Clone, Default)]
pub struct DxfImporter {
    pub options: ImportOptions,
}

impl DxfImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Import a DXF file from disk.
    pub fn import_file(&self, path: impl AsRef<std::path::Path>) -> DrawingResult<ImportedDrawing> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path)?;
        debug!("Importing DXF {}", path.display());
        self.import_reader(&mut file)
    }

    /// Import DXF content from any reader.
    pub fn import_reader<R: Read>(&self, reader: &mut R) -> DrawingResult<ImportedDrawing> {
        let drawing =
            dxf::Drawing::load(reader).map_err(|e| DrawingError::Dxf(e.to_string()))?;
        self.import_drawing(&drawing)
    }

    /// Import DXF text.
    pub fn import_str(&self, content: &str) -> DrawingResult<ImportedDrawing> {
        self.import_reader(&mut content.as_bytes())
    }

    fn import_drawing(&self, drawing: &dxf::Drawing) -> DrawingResult<ImportedDrawing> {
        let scale = match self.options.unit_scale {
            Some(scale) => scale,
            None => {
                let unit = drawing_unit(drawing.header.default_drawing_units);
                debug!("Drawing units: {}", unit);
                unit.to_mm_factor()
            }
        };

        let mut outlines = Vec::new();
        let mut polylines = Vec::new();
        let mut skipped = 0usize;

        for entity in drawing.entities() {
            let layer = if entity.common.layer.is_empty() {
                DEFAULT_LAYER.to_string()
            } else {
                entity.common.layer.clone()
            };

            let (points, flagged_closed) = match &entity.specific {
                EntityType::LwPolyline(polyline) => {
                    let points: Vec<Point> = polyline
                        .vertices
                        .iter()
                        .map(|v| Point::new(v.x, v.y))
                        .collect();
                    // Bit 0 (value 1) indicates closed
                    (points, polyline.flags & 1 != 0)
                }
                EntityType::Polyline(polyline) => {
                    let points: Vec<Point> = polyline
                        .vertices()
                        .map(|v| Point::new(v.location.x, v.location.y))
                        .collect();
                    (points, polyline.flags & 1 != 0)
                }
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            if let Some(tagged) = classify_polyline(layer, points, flagged_closed, scale) {
                if tagged.closed {
                    outlines.push(TaggedLoop {
                        layer: tagged.layer.clone(),
                        polygon: Polygon::new_ccw(tagged.points.clone()),
                    });
                }
                polylines.push(tagged);
            } else {
                skipped += 1;
            }
        }

        if skipped > 0 {
            debug!("Skipped {} DXF entities that are not usable polylines", skipped);
        }
        if outlines.is_empty() {
            warn!("DXF contains no closed polyline");
        }

        let imported = ImportedDrawing::new(
            outlines,
            polylines,
            FileFormat::Dxf,
            scale,
            &self.options.cable_layer,
        )?;
        info!(
            "Imported DXF: {} closed outline(s), {} polyline(s), panel area {:.3} mm²",
            imported.outlines.len(),
            imported.polylines.len(),
            imported.panel().area()
        );
        Ok(imported)
    }
}

/// Decides whether a polyline is a closed loop, an open path, or unusable,
/// and converts it to millimetres.
fn classify_polyline(
    layer: String,
    raw: Vec<Point>,
    flagged_closed: bool,
    scale: f64,
) -> Option<TaggedPolyline> {
    if raw.len() < 2 || raw.iter().any(|p| !p.is_finite()) {
        return None;
    }

    let ends_meet = match (raw.first(), raw.last()) {
        (Some(first), Some(last)) => first.distance_to(last) < CLOSE_TOLERANCE,
        _ => false,
    };

    let scaled: Vec<Point> = raw.iter().map(|p| p.scaled(scale)).collect();
    if raw.len() >= 3 && (flagged_closed || ends_meet) {
        let points = remove_duplicate_points(&scaled, CLOSE_TOLERANCE * scale.abs());
        if points.len() >= 3 {
            return Some(TaggedPolyline {
                layer,
                points,
                closed: true,
            });
        }
    }

    Some(TaggedPolyline {
        layer,
        points: scaled,
        closed: false,
    })
}

fn drawing_unit(units: Units) -> DrawingUnit {
    match units {
        Units::Unitless => DrawingUnit::Unitless,
        Units::Millimeters => DrawingUnit::Millimeters,
        Units::Centimeters => DrawingUnit::Centimeters,
        Units::Meters => DrawingUnit::Meters,
        Units::Inches => DrawingUnit::Inches,
        Units::Feet => DrawingUnit::Feet,
        other => {
            warn!("Unsupported $INSUNITS value {:?}, assuming millimetres", other);
            DrawingUnit::Unitless
        }
    }
}

/// Fallback importer: the first `<rect>` with a positive size becomes the panel.
#[derive(Debug, Clone, Default)]
pub struct SvgRectImporter {
    pub options: ImportOptions,
}

impl SvgRectImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn import_file(&self, path: impl AsRef<std::path::Path>) -> DrawingResult<ImportedDrawing> {
        let content = std::fs::read_to_string(path.as_ref())?;
        self.import_str(&content)
    }

    pub fn import_str(&self, svg_content: &str) -> DrawingResult<ImportedDrawing> {
        if !svg_content.contains("<svg") {
            return Err(DrawingError::SvgParse("missing <svg> element".to_string()));
        }
        let scale = self.options.unit_scale.unwrap_or(1.0);

        let mut search_pos = 0;
        while let Some(tag_start) = svg_content[search_pos..].find("<rect") {
            let abs_tag_start = search_pos + tag_start;
            let Some(tag_end) = svg_content[abs_tag_start..].find('>') else {
                break;
            };
            let tag = &svg_content[abs_tag_start..abs_tag_start + tag_end];
            search_pos = abs_tag_start + tag_end + 1;

            // Skip elements that merely start with "rect"
            if !tag[5..].starts_with(|c: char| c.is_whitespace() || c == '/') {
                continue;
            }

            let x = extract_attr_f64(tag, "x").unwrap_or(0.0);
            let y = extract_attr_f64(tag, "y").unwrap_or(0.0);
            let width = extract_attr_f64(tag, "width").unwrap_or(0.0);
            let height = extract_attr_f64(tag, "height").unwrap_or(0.0);
            if width > 0.0 && height > 0.0 {
                let panel = Polygon::rectangle(x, y, width, height).scaled(scale);
                info!("Imported SVG rectangle {:.3} x {:.3}", width * scale, height * scale);
                let outline = TaggedLoop {
                    layer: DEFAULT_LAYER.to_string(),
                    polygon: panel.clone(),
                };
                let polyline = TaggedPolyline {
                    layer: DEFAULT_LAYER.to_string(),
                    points: panel.into_points(),
                    closed: true,
                };
                return ImportedDrawing::new(
                    vec![outline],
                    vec![polyline],
                    FileFormat::Svg,
                    scale,
                    &self.options.cable_layer,
                );
            }
        }

        Err(DrawingError::NoClosedOutline)
    }
}

/// Finds `attr="value"` in a tag, requiring whitespace before the name so
/// that `x` does not match inside `rx`.
fn extract_attr_str<'a>(tag: &'a str, attr: &str) -> Option<&'a str> {
    let pattern = format!("{}=\"", attr);
    let mut from = 0;
    while let Some(found) = tag[from..].find(&pattern) {
        let start = from + found;
        let preceded_by_space = tag[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_whitespace());
        let val_start = start + pattern.len();
        if preceded_by_space {
            let end = tag[val_start..].find('"')?;
            return Some(&tag[val_start..val_start + end]);
        }
        from = val_start;
    }
    None
}

fn extract_attr_f64(tag: &str, attr: &str) -> Option<f64> {
    extract_attr_str(tag, attr).and_then(|s| s.trim().trim_end_matches("px").parse().ok())
}

/// Imports `path`, choosing the importer from its extension.
pub fn import_drawing(
    path: impl AsRef<std::path::Path>,
    options: &ImportOptions,
) -> DrawingResult<ImportedDrawing> {
    let path = path.as_ref();
    match FileFormat::from_path(path)? {
        FileFormat::Dxf => DxfImporter::new(options.clone()).import_file(path),
        FileFormat::Svg => SvgRectImporter::new(options.clone()).import_file(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_attr_ignores_rx() {
        let tag = r#"<rect rx="3" x="10" y="20" width="100" height="50""#;
        assert_eq!(extract_attr_f64(tag, "x"), Some(10.0));
        assert_eq!(extract_attr_f64(tag, "width"), Some(100.0));
        assert_eq!(extract_attr_f64(tag, "cx"), None);
    }

    #[test]
    fn test_classify_closed_by_repeated_point() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 0.0),
        ];
        let tagged = classify_polyline("A".to_string(), pts, false, 1.0).unwrap();
        assert!(tagged.closed);
        assert_eq!(tagged.points.len(), 3);
    }

    #[test]
    fn test_classify_open_and_scaled() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let tagged = classify_polyline("CABLE_PATH".to_string(), pts, true, 25.4).unwrap();
        assert!(!tagged.closed);
        assert_eq!(tagged.points[1], Point::new(25.4, 0.0));
        assert!(classify_polyline("0".to_string(), vec![Point::new(0.0, 0.0)], false, 1.0).is_none());
    }

    #[test]
    fn test_closed_polyline_path_repeats_first_point() {
        let tagged = TaggedPolyline {
            layer: "CABLE_PATH".to_string(),
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
            closed: true,
        };
        let path = tagged.to_path();
        assert_eq!(path.len(), 4);
        assert_eq!(path.points()[3], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            FileFormat::from_path(std::path::Path::new("panel.DXF")).unwrap(),
            FileFormat::Dxf
        );
        assert_eq!(
            FileFormat::from_path(std::path::Path::new("panel.svg")).unwrap(),
            FileFormat::Svg
        );
        assert!(matches!(
            FileFormat::from_path(std::path::Path::new("panel.step")),
            Err(DrawingError::UnsupportedFormat(ext)) if ext == "step"
        ));
    }

    #[test]
    fn test_svg_rect_import() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <rectangle/>
            <rect x="0" y="0" width="0" height="10"/>
            <rect x="5" y="10" width="300" height="200" fill="none"/>
        </svg>"#;
        let imported = SvgRectImporter::default().import_str(svg).unwrap();
        let bbox = imported.panel().bounding_box().unwrap();
        assert_eq!(bbox.min_x, 5.0);
        assert_eq!(bbox.max_y, 210.0);
        assert_eq!(imported.format, FileFormat::Svg);
        assert!(imported.cable_path().is_none());
    }

    #[test]
    fn test_svg_without_rect() {
        let svg = r#"<svg><circle cx="1" cy="1" r="1"/></svg>"#;
        assert!(matches!(
            SvgRectImporter::default().import_str(svg),
            Err(DrawingError::NoClosedOutline)
        ));
        assert!(matches!(
            SvgRectImporter::default().import_str("<html/>"),
            Err(DrawingError::SvgParse(_))
        ));
    }

    #[test]
    fn test_drawing_always_has_a_panel() {
        let empty = ImportedDrawing::new(Vec::new(), Vec::new(), FileFormat::Dxf, 1.0, "CABLE_PATH");
        assert!(matches!(empty, Err(DrawingError::NoClosedOutline)));

        let small = TaggedLoop {
            layer: "A".to_string(),
            polygon: Polygon::rectangle(0.0, 0.0, 10.0, 10.0),
        };
        let large = TaggedLoop {
            layer: "B".to_string(),
            polygon: Polygon::rectangle(0.0, 0.0, 50.0, 20.0),
        };
        let drawing =
            ImportedDrawing::new(vec![small, large], Vec::new(), FileFormat::Dxf, 1.0, "CABLE_PATH")
                .unwrap();
        assert_eq!(drawing.outlines().len(), 2);
        assert_eq!(drawing.outlines()[0].layer, "B");
        assert_eq!(drawing.panel().area(), 1000.0);
    }
}
