//! SVG preview of a panel and its placed holes.
//!
//! Coordinates are written in drawing millimetres inside a group that flips
//! the Y axis, so the preview reads like the CAD drawing (Y up).

use crate::preview::PreviewStyle;
use holekit_core::{HoleSet, Polygon};
use std::fmt::Write;

/// Render the panel outline and hole markers as an SVG document.
pub fn render_svg(panel: &Polygon, drill: &HoleSet, cable: &HoleSet, style: &PreviewStyle) -> String {
    let pad = style.padding;
    let Some(bbox) = panel.bounding_box() else {
        return format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {w}\"><rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{w}\" fill=\"{bg}\"/></svg>\n",
            w = 2.0 * pad,
            bg = style.background
        );
    };

    let view = bbox.padded(pad);
    let (width, height) = (view.width(), view.height());
    let min_x = view.min_x;
    // Y is flipped, so the top of the view box is the negated top of the panel
    let min_y = -view.max_y;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">",
        min_x, min_y, width, height
    );
    let _ = writeln!(
        svg,
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
        min_x, min_y, width, height, style.background
    );
    svg.push_str("  <g transform=\"scale(1 -1)\">\n");

    let points: Vec<String> = panel
        .points()
        .iter()
        .chain(panel.points().first())
        .map(|p| format!("{},{}", p.x, p.y))
        .collect();
    let _ = writeln!(
        svg,
        "    <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
        points.join(" "),
        style.outline,
        style.outline_width
    );

    render_dots(&mut svg, drill, &style.drill, style.dot_radius);
    render_dots(&mut svg, cable, &style.cable, style.dot_radius);

    svg.push_str("  </g>\n</svg>\n");
    svg
}

fn render_dots(svg: &mut String, holes: &HoleSet, color: &str, radius: f64) {
    for p in holes.iter() {
        let _ = writeln!(
            svg,
            "    <circle class=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
            holes.category, p.x, p.y, radius, color
        );
    }
}
