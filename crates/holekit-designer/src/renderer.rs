//! Raster preview renderer
//! Draws the panel outline and hole markers into an image buffer using tiny-skia.
//!
//! The panel is fitted into the image with `style.padding` pixels of margin,
//! centred, Y up.

use crate::error::{DrawingError, DrawingResult};
use crate::preview::{parse_hex_color, PreviewStyle};
use holekit_core::{HoleSet, Polygon};
use image::{Rgb, RgbImage};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Smallest marker radius in pixels, so holes stay visible on large panels.
const MIN_DOT_PIXELS: f32 = 1.5;

fn color_or(value: &str, fallback: (u8, u8, u8)) -> Color {
    let (r, g, b) = parse_hex_color(value).unwrap_or(fallback);
    Color::from_rgba8(r, g, b, 255)
}

/// World-to-pixel transform fitting `panel` into a `width` x `height` image.
fn fit_transform(panel: &Polygon, width: u32, height: u32, padding: f32) -> Option<(Transform, f32)> {
    let bbox = panel.bounding_box()?;
    let avail_w = width as f32 - 2.0 * padding;
    let avail_h = height as f32 - 2.0 * padding;
    if avail_w <= 0.0 || avail_h <= 0.0 || bbox.width() <= 0.0 || bbox.height() <= 0.0 {
        return None;
    }

    let scale = (avail_w / bbox.width() as f32).min(avail_h / bbox.height() as f32);
    let offset_x = (width as f32 - bbox.width() as f32 * scale) / 2.0;
    let offset_y = (height as f32 - bbox.height() as f32 * scale) / 2.0;

    // pixel_x = (x - min_x) * scale + offset_x
    // pixel_y = height - ((y - min_y) * scale + offset_y)
    let transform = Transform::from_scale(scale, -scale).post_translate(
        offset_x - bbox.min_x as f32 * scale,
        height as f32 - offset_y + bbox.min_y as f32 * scale,
    );
    Some((transform, scale))
}

/// Render the panel and holes to an RGB image.
pub fn render_png(
    panel: &Polygon,
    drill: &HoleSet,
    cable: &HoleSet,
    width: u32,
    height: u32,
    style: &PreviewStyle,
) -> RgbImage {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbImage::new(width, height);
    };
    pixmap.fill(color_or(&style.background, (7, 16, 36)));

    if let Some((transform, scale)) = fit_transform(panel, width, height, style.padding as f32) {
        let mut pb = PathBuilder::new();
        for (i, p) in panel.points().iter().enumerate() {
            if i == 0 {
                pb.move_to(p.x as f32, p.y as f32);
            } else {
                pb.line_to(p.x as f32, p.y as f32);
            }
        }
        pb.close();

        if let Some(path) = pb.finish() {
            let mut paint = Paint::default();
            paint.set_color(color_or(&style.outline, (96, 165, 250)));
            paint.anti_alias = true;
            let stroke = Stroke {
                width: style.outline_width as f32 / scale,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }

        let radius = (style.dot_radius as f32).max(MIN_DOT_PIXELS / scale);
        draw_dots(&mut pixmap, drill, color_or(&style.drill, (52, 211, 153)), radius, transform);
        draw_dots(&mut pixmap, cable, color_or(&style.cable, (251, 191, 36)), radius, transform);
    }

    // Convert Pixmap to RgbImage
    let data = pixmap.data();
    RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    })
}

fn draw_dots(pixmap: &mut Pixmap, holes: &HoleSet, color: Color, radius: f32, transform: Transform) {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;

    for p in holes.iter() {
        if let Some(circle) = PathBuilder::from_circle(p.x as f32, p.y as f32, radius) {
            pixmap.fill_path(&circle, &paint, FillRule::Winding, transform, None);
        }
    }
}

/// Render and write a PNG using the style's image size.
pub fn save_png(
    path: impl AsRef<std::path::Path>,
    panel: &Polygon,
    drill: &HoleSet,
    cable: &HoleSet,
    style: &PreviewStyle,
) -> DrawingResult<()> {
    let image = render_png(panel, drill, cable, style.width, style.height, style);
    image
        .save(path.as_ref())
        .map_err(|e| DrawingError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use holekit_core::{HoleCategory, Point};

    #[test]
    fn test_background_and_drill_dot() {
        let panel = Polygon::rectangle(0.0, 0.0, 100.0, 100.0);
        let drill = HoleSet::new(HoleCategory::Drill, 5.0, vec![Point::new(50.0, 50.0)]);
        let cable = HoleSet::empty(HoleCategory::Cable, 10.0);
        let style = PreviewStyle {
            dot_radius: 5.0,
            ..Default::default()
        };

        let image = render_png(&panel, &drill, &cable, 200, 200, &style);
        assert_eq!(image.dimensions(), (200, 200));
        assert_eq!(*image.get_pixel(0, 0), Rgb([7, 16, 36]));
        assert_eq!(*image.get_pixel(100, 100), Rgb([52, 211, 153]));
    }

    #[test]
    fn test_y_axis_points_up() {
        let panel = Polygon::rectangle(0.0, 0.0, 100.0, 100.0);
        let drill = HoleSet::empty(HoleCategory::Drill, 5.0);
        let cable = HoleSet::new(HoleCategory::Cable, 10.0, vec![Point::new(50.0, 80.0)]);
        let style = PreviewStyle {
            dot_radius: 5.0,
            ..Default::default()
        };

        // Scale is (200 - 40) / 100 = 1.6; y = 80 lands 48 px above centre
        let image = render_png(&panel, &drill, &cable, 200, 200, &style);
        assert_eq!(*image.get_pixel(100, 52), Rgb([251, 191, 36]));
        assert_eq!(*image.get_pixel(100, 148), Rgb([7, 16, 36]));
    }

    #[test]
    fn test_zero_size_image() {
        let image = render_png(
            &Polygon::rectangle(0.0, 0.0, 10.0, 10.0),
            &HoleSet::empty(HoleCategory::Drill, 5.0),
            &HoleSet::empty(HoleCategory::Cable, 10.0),
            0,
            0,
            &PreviewStyle::default(),
        );
        assert_eq!(image.dimensions(), (0, 0));
    }
}
