// Integration tests for DXF export

use dxf::entities::EntityType;
use dxf::Drawing;
use holekit_core::{HoleCategory, HoleSet, Point, Polygon};
use holekit_designer::export::{
    LAYER_CABLE_CENTRES, LAYER_CABLE_HOLES, LAYER_DRILL_CENTRES, LAYER_DRILL_HOLES, LAYER_SOURCE,
};
use holekit_designer::{DxfExporter, DxfImporter};

fn sample_result() -> (Polygon, HoleSet, HoleSet) {
    let panel = Polygon::rectangle(0.0, 0.0, 200.0, 100.0);
    let drill = HoleSet::new(
        HoleCategory::Drill,
        5.0,
        vec![
            Point::new(20.0, 20.0),
            Point::new(180.0, 20.0),
            Point::new(100.0, 80.0),
        ],
    );
    let cable = HoleSet::new(HoleCategory::Cable, 10.0, vec![Point::new(100.0, 50.0)]);
    (panel, drill, cable)
}

#[test]
fn test_export_layers_and_entities() {
    let (panel, drill, cable) = sample_result();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holes.dxf");
    DxfExporter::new()
        .export_file(&path, &panel, &drill, &cable)
        .unwrap();

    let mut file = std::fs::File::open(&path).unwrap();
    let drawing = Drawing::load(&mut file).unwrap();

    for (name, aci) in [
        (LAYER_SOURCE, 5u8),
        (LAYER_DRILL_HOLES, 3),
        (LAYER_DRILL_CENTRES, 2),
        (LAYER_CABLE_HOLES, 4),
        (LAYER_CABLE_CENTRES, 6),
    ] {
        let layer = drawing.layers().find(|l| l.name == name);
        assert!(layer.is_some(), "missing layer {}", name);
        assert_eq!(layer.unwrap().color.index(), Some(aci));
    }

    let circles: Vec<(String, f64)> = drawing
        .entities()
        .filter_map(|e| match &e.specific {
            EntityType::Circle(c) => Some((e.common.layer.clone(), c.radius)),
            _ => None,
        })
        .collect();
    assert_eq!(circles.len(), 4);
    assert_eq!(
        circles.iter().filter(|(l, r)| l == LAYER_DRILL_HOLES && *r == 2.5).count(),
        3
    );
    assert_eq!(
        circles.iter().filter(|(l, r)| l == LAYER_CABLE_HOLES && *r == 5.0).count(),
        1
    );

    let cross_lines = drawing
        .entities()
        .filter(|e| matches!(e.specific, EntityType::Line(_)))
        .count();
    assert_eq!(cross_lines, 8);
}

#[test]
fn test_cross_half_size() {
    let (panel, drill, _) = sample_result();
    let cable = HoleSet::empty(HoleCategory::Cable, 10.0);
    let drawing = DxfExporter::new().build(&panel, &drill, &cable);

    let line = drawing
        .entities()
        .find_map(|e| match &e.specific {
            EntityType::Line(l) if e.common.layer == LAYER_DRILL_CENTRES => Some(l.clone()),
            _ => None,
        })
        .unwrap();
    // 1.2 x radius on each side of the centre
    assert!(((line.p2.x - line.p1.x) - 6.0).abs() < 1e-9);
}

#[test]
fn test_export_round_trips_through_import() {
    let (panel, drill, cable) = sample_result();
    let bytes = DxfExporter::new().export(&panel, &drill, &cable).unwrap();

    let imported = DxfImporter::default()
        .import_reader(&mut bytes.as_slice())
        .unwrap();
    assert_eq!(imported.outlines().len(), 1);
    assert_eq!(imported.outlines()[0].layer, LAYER_SOURCE);
    assert!((imported.panel().area() - panel.area()).abs() < 1e-6);
}
