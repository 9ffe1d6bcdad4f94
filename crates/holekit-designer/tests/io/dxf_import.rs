// Integration tests for DXF and SVG import

use dxf::entities::{Entity, EntityType, Line, LwPolyline};
use dxf::enums::{AcadVersion, Units};
use dxf::{Drawing, LwPolylineVertex};
use holekit_designer::{
    import_drawing, DrawingError, DxfImporter, FileFormat, ImportOptions,
};
use std::io::Write;

fn lwpolyline(points: &[(f64, f64)], closed: bool, layer: &str) -> Entity {
    let mut polyline = LwPolyline::default();
    polyline.vertices = points
        .iter()
        .map(|&(x, y)| LwPolylineVertex {
            x,
            y,
            id: 0,
            starting_width: 0.0,
            ending_width: 0.0,
            bulge: 0.0,
        })
        .collect();
    polyline.flags = if closed { 1 } else { 0 };
    let mut entity = Entity::new(EntityType::LwPolyline(polyline));
    entity.common.layer = layer.to_string();
    entity
}

fn dxf_bytes(units: Units, entities: Vec<Entity>) -> Vec<u8> {
    let mut drawing = Drawing::new();
    drawing.header.version = AcadVersion::R2000;
    drawing.header.default_drawing_units = units;
    for entity in entities {
        drawing.add_entity(entity);
    }
    let mut buffer = Vec::new();
    drawing.save(&mut buffer).unwrap();
    buffer
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Vec<(f64, f64)> {
    vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h)]
}

#[test]
fn test_largest_closed_loop_is_panel() {
    let bytes = dxf_bytes(
        Units::Millimeters,
        vec![
            lwpolyline(&rect(10.0, 10.0, 50.0, 50.0), true, "CUTOUTS"),
            lwpolyline(&rect(0.0, 0.0, 200.0, 100.0), true, "OUTLINE"),
        ],
    );
    let imported = DxfImporter::default()
        .import_reader(&mut bytes.as_slice())
        .unwrap();

    assert_eq!(imported.format, FileFormat::Dxf);
    assert_eq!(imported.outlines().len(), 2);
    assert_eq!(imported.outlines()[0].layer, "OUTLINE");
    assert!((imported.panel().area() - 20000.0).abs() < 1e-6);
    assert!(!imported.panel().is_clockwise());
    assert!(imported.cable_path().is_none());
}

#[test]
fn test_clockwise_outline_is_normalised() {
    let mut cw = rect(0.0, 0.0, 100.0, 100.0);
    cw.reverse();
    let bytes = dxf_bytes(Units::Millimeters, vec![lwpolyline(&cw, true, "0")]);
    let imported = DxfImporter::default()
        .import_reader(&mut bytes.as_slice())
        .unwrap();
    assert!(imported.panel().signed_area() > 0.0);
}

#[test]
fn test_repeated_end_point_closes_outline() {
    let mut pts = rect(0.0, 0.0, 80.0, 40.0);
    pts.push((0.0, 0.0));
    let bytes = dxf_bytes(Units::Millimeters, vec![lwpolyline(&pts, false, "0")]);
    let imported = DxfImporter::default()
        .import_reader(&mut bytes.as_slice())
        .unwrap();
    assert_eq!(imported.panel().len(), 4);
}

#[test]
fn test_cable_path_layer_is_case_insensitive() {
    let bytes = dxf_bytes(
        Units::Millimeters,
        vec![
            lwpolyline(&rect(0.0, 0.0, 300.0, 200.0), true, "OUTLINE"),
            lwpolyline(&[(20.0, 100.0), (280.0, 100.0)], false, "cable_path"),
        ],
    );
    let imported = DxfImporter::default()
        .import_reader(&mut bytes.as_slice())
        .unwrap();

    let cable = imported.cable_path().unwrap();
    assert_eq!(cable.len(), 2);
    assert!((cable.length() - 260.0).abs() < 1e-9);
    assert_eq!(imported.layers(), vec!["OUTLINE", "cable_path"]);
}

#[test]
fn test_closed_cable_loop_walks_closing_edge() {
    let bytes = dxf_bytes(
        Units::Millimeters,
        vec![
            lwpolyline(&rect(0.0, 0.0, 300.0, 200.0), true, "OUTLINE"),
            lwpolyline(&rect(50.0, 50.0, 100.0, 50.0), true, "CABLE_PATH"),
        ],
    );
    let options = ImportOptions::default();
    let imported = DxfImporter::new(options)
        .import_reader(&mut bytes.as_slice())
        .unwrap();

    let cable = imported.cable_path().unwrap();
    assert_eq!(cable.len(), 5);
    assert!((cable.length() - 300.0).abs() < 1e-9);
}

#[test]
fn test_custom_cable_layer() {
    let bytes = dxf_bytes(
        Units::Millimeters,
        vec![
            lwpolyline(&rect(0.0, 0.0, 300.0, 200.0), true, "OUTLINE"),
            lwpolyline(&[(20.0, 100.0), (280.0, 100.0)], false, "WIRING"),
        ],
    );
    let options = ImportOptions {
        cable_layer: "wiring".to_string(),
        ..Default::default()
    };
    let imported = DxfImporter::new(options)
        .import_reader(&mut bytes.as_slice())
        .unwrap();
    assert!(imported.cable_path().is_some());
}

#[test]
fn test_no_closed_outline() {
    let mut line = Entity::new(EntityType::Line(Line::new(
        dxf::Point::new(0.0, 0.0, 0.0),
        dxf::Point::new(10.0, 0.0, 0.0),
    )));
    line.common.layer = "0".to_string();
    let bytes = dxf_bytes(
        Units::Millimeters,
        vec![line, lwpolyline(&[(0.0, 0.0), (10.0, 10.0)], false, "0")],
    );
    let result = DxfImporter::default().import_reader(&mut bytes.as_slice());
    assert!(matches!(result, Err(DrawingError::NoClosedOutline)));
}

#[test]
fn test_units_from_header() {
    let bytes = dxf_bytes(
        Units::Inches,
        vec![lwpolyline(&rect(0.0, 0.0, 10.0, 5.0), true, "0")],
    );
    let imported = DxfImporter::default()
        .import_reader(&mut bytes.as_slice())
        .unwrap();
    assert!((imported.unit_scale - 25.4).abs() < 1e-12);
    let bbox = imported.panel().bounding_box().unwrap();
    assert!((bbox.width() - 254.0).abs() < 1e-9);
}

#[test]
fn test_explicit_scale_overrides_header() {
    let bytes = dxf_bytes(
        Units::Inches,
        vec![lwpolyline(&rect(0.0, 0.0, 10.0, 5.0), true, "0")],
    );
    let options = ImportOptions {
        unit_scale: Some(2.0),
        ..Default::default()
    };
    let imported = DxfImporter::new(options)
        .import_reader(&mut bytes.as_slice())
        .unwrap();
    let bbox = imported.panel().bounding_box().unwrap();
    assert!((bbox.width() - 20.0).abs() < 1e-9);
}

#[test]
fn test_garbage_is_rejected() {
    let result = DxfImporter::default().import_str("this is not a drawing");
    assert!(result.is_err());
}

#[test]
fn test_import_drawing_dispatch() {
    let dir = tempfile::tempdir().unwrap();

    let dxf_path = dir.path().join("panel.dxf");
    std::fs::write(
        &dxf_path,
        dxf_bytes(
            Units::Millimeters,
            vec![lwpolyline(&rect(0.0, 0.0, 120.0, 80.0), true, "0")],
        ),
    )
    .unwrap();
    let imported = import_drawing(&dxf_path, &ImportOptions::default()).unwrap();
    assert!((imported.panel().area() - 9600.0).abs() < 1e-6);

    let svg_path = dir.path().join("panel.svg");
    let mut file = std::fs::File::create(&svg_path).unwrap();
    writeln!(
        file,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect x="0" y="0" width="40" height="30"/></svg>"#
    )
    .unwrap();
    let imported = import_drawing(&svg_path, &ImportOptions::default()).unwrap();
    assert_eq!(imported.format, FileFormat::Svg);
    assert!((imported.panel().area() - 1200.0).abs() < 1e-9);

    let txt_path = dir.path().join("panel.txt");
    std::fs::write(&txt_path, "x").unwrap();
    assert!(matches!(
        import_drawing(&txt_path, &ImportOptions::default()),
        Err(DrawingError::UnsupportedFormat(_))
    ));

    assert!(matches!(
        import_drawing(dir.path().join("missing.dxf"), &ImportOptions::default()),
        Err(DrawingError::Io(_))
    ));
}
