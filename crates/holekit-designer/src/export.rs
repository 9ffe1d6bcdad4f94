//! DXF export of placement results.
//!
//! Writes the panel outline and one circle plus centre cross per hole, each
//! category on its own layer, in millimetres.

use crate::error::{DrawingError, DrawingResult};
use dxf::entities::{Circle, Entity, EntityType, Line, LwPolyline};
use dxf::enums::{AcadVersion, Units};
use dxf::tables::Layer;
use dxf::{Color, Drawing, LwPolylineVertex};
use holekit_core::{HoleSet, Point, Polygon};
use tracing::info;

pub const LAYER_SOURCE: &str = "SOURCE";
pub const LAYER_DRILL_HOLES: &str = "DRILL_HOLES";
pub const LAYER_DRILL_CENTRES: &str = "DRILL_CENTRES";
pub const LAYER_CABLE_HOLES: &str = "CABLE_HOLES";
pub const LAYER_CABLE_CENTRES: &str = "CABLE_CENTRES";

/// Centre cross half-size as a multiple of the hole radius
pub const CROSS_SCALE: f64 = 1.2;

/// Layer names with their ACI colours: blue, green, yellow, cyan, magenta.
const LAYERS: [(&str, u8); 5] = [
    (LAYER_SOURCE, 5),
    (LAYER_DRILL_HOLES, 3),
    (LAYER_DRILL_CENTRES, 2),
    (LAYER_CABLE_HOLES, 4),
    (LAYER_CABLE_CENTRES, 6),
];

/// Builds DXF drawings from a panel and its placed holes
#[derive(Debug, Clone, Default)]
pub struct DxfExporter;

impl DxfExporter {
    pub fn new() -> Self {
        Self
    }

    /// Builds the drawing in memory.
    pub fn build(&self, panel: &Polygon, drill: &HoleSet, cable: &HoleSet) -> Drawing {
        let mut drawing = Drawing::new();
        // LWPOLYLINE needs R14 or newer
        drawing.header.version = AcadVersion::R2000;
        drawing.header.default_drawing_units = Units::Millimeters;

        for (name, aci) in LAYERS {
            drawing.add_layer(Layer {
                name: name.to_string(),
                color: Color::from_index(aci),
                ..Default::default()
            });
        }

        add_outline(&mut drawing, panel, LAYER_SOURCE);
        add_holes(&mut drawing, drill, LAYER_DRILL_HOLES, LAYER_DRILL_CENTRES);
        add_holes(&mut drawing, cable, LAYER_CABLE_HOLES, LAYER_CABLE_CENTRES);
        drawing
    }

    /// Serialises the drawing to DXF text.
    pub fn export(&self, panel: &Polygon, drill: &HoleSet, cable: &HoleSet) -> DrawingResult<Vec<u8>> {
        let drawing = self.build(panel, drill, cable);
        let mut buffer = Vec::new();
        drawing
            .save(&mut buffer)
            .map_err(|e| DrawingError::Dxf(e.to_string()))?;
        Ok(buffer)
    }

    pub fn export_file(
        &self,
        path: impl AsRef<std::path::Path>,
        panel: &Polygon,
        drill: &HoleSet,
        cable: &HoleSet,
    ) -> DrawingResult<()> {
        let path = path.as_ref();
        let bytes = self.export(panel, drill, cable)?;
        std::fs::write(path, bytes)?;
        info!(
            "Wrote DXF {} ({} drill, {} cable holes)",
            path.display(),
            drill.len(),
            cable.len()
        );
        Ok(())
    }
}

fn add_entity(drawing: &mut Drawing, specific: EntityType, layer: &str) {
    let mut entity = Entity::new(specific);
    entity.common.layer = layer.to_string();
    drawing.add_entity(entity);
}

fn add_outline(drawing: &mut Drawing, panel: &Polygon, layer: &str) {
    if panel.is_empty() {
        return;
    }
    let mut polyline = LwPolyline::default();
    polyline.vertices = panel
        .points()
        .iter()
        .map(|p| LwPolylineVertex {
            x: p.x,
            y: p.y,
            id: 0,
            starting_width: 0.0,
            ending_width: 0.0,
            bulge: 0.0,
        })
        .collect();
    polyline.flags = 1; // Closed polyline
    add_entity(drawing, EntityType::LwPolyline(polyline), layer);
}

fn add_holes(drawing: &mut Drawing, holes: &HoleSet, hole_layer: &str, centre_layer: &str) {
    let radius = holes.radius();
    for p in holes.iter() {
        let circle = Circle::new(dxf::Point::new(p.x, p.y, 0.0), radius);
        add_entity(drawing, EntityType::Circle(circle), hole_layer);
    }

    let half = radius * CROSS_SCALE;
    for p in holes.iter() {
        for (a, b) in cross_segments(p, half) {
            let line = Line::new(dxf::Point::new(a.x, a.y, 0.0), dxf::Point::new(b.x, b.y, 0.0));
            add_entity(drawing, EntityType::Line(line), centre_layer);
        }
    }
}

fn cross_segments(center: &Point, half: f64) -> [(Point, Point); 2] {
    [
        (
            Point::new(center.x - half, center.y),
            Point::new(center.x + half, center.y),
        ),
        (
            Point::new(center.x, center.y - half),
            Point::new(center.x, center.y + half),
        ),
    ]
}
