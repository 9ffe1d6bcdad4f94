// Integration tests for preview output

use holekit_core::{HoleCategory, HoleSet, Point, Polygon};
use holekit_designer::{write_preview, PreviewStyle};

fn holes() -> (HoleSet, HoleSet) {
    (
        HoleSet::new(HoleCategory::Drill, 5.0, vec![Point::new(25.0, 25.0)]),
        HoleSet::new(HoleCategory::Cable, 10.0, vec![Point::new(75.0, 25.0)]),
    )
}

#[test]
fn test_write_svg_preview() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preview.svg");
    let (drill, cable) = holes();

    write_preview(
        &path,
        &Polygon::rectangle(0.0, 0.0, 100.0, 50.0),
        &drill,
        &cable,
        &PreviewStyle::default(),
    )
    .unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<circle").count(), 2);
}

#[test]
fn test_write_png_preview() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preview.png");
    let (drill, cable) = holes();
    let style = PreviewStyle {
        width: 320,
        height: 200,
        ..Default::default()
    };

    write_preview(
        &path,
        &Polygon::rectangle(0.0, 0.0, 100.0, 50.0),
        &drill,
        &cable,
        &style,
    )
    .unwrap();

    let image = image::open(&path).unwrap();
    assert_eq!(image.width(), 320);
    assert_eq!(image.height(), 200);
}

#[test]
fn test_unsupported_preview_extension() {
    let dir = tempfile::tempdir().unwrap();
    let (drill, cable) = holes();
    let err = write_preview(
        dir.path().join("preview.bmp2"),
        &Polygon::rectangle(0.0, 0.0, 10.0, 10.0),
        &drill,
        &cable,
        &PreviewStyle::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unsupported preview format"));
}
