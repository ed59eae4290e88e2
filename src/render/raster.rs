//! Shape rendering for annotations using tiny-skia
//!
//! These functions draw filled annotation shapes onto a pixmap borrowed
//! from an RgbaImage via [`with_pixmap`]. Text annotations are handled
//! separately by [`super::text`].

use image::RgbaImage;
use tiny_skia::{Paint, PathBuilder, Pixmap, Transform};

use crate::domain::geometry::BEZIER_K;
use crate::domain::{CircleAnnotation, RectangleAnnotation, ShapeColor, TriangleAnnotation};

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
///
/// One call covers any number of fills, so callers should batch
/// consecutive shape draws instead of round-tripping per shape.
pub(crate) fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

fn fill_paint(color: ShapeColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Build an ellipse path using cubic bezier curves
fn build_ellipse_path(cx: f32, cy: f32, rx: f32, ry: f32) -> Option<tiny_skia::Path> {
    let kx = rx * BEZIER_K;
    let ky = ry * BEZIER_K;

    let mut pb = PathBuilder::new();

    // Start at top
    pb.move_to(cx, cy - ry);

    // Top to right
    pb.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);

    // Right to bottom
    pb.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);

    // Bottom to left
    pb.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);

    // Left to top
    pb.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);

    pb.close();
    pb.finish()
}

/// Build an isoceles triangle path: apex at top-center, base at the bottom
fn build_triangle_path(x: f32, y: f32, width: f32, height: f32) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x + width * 0.5, y);
    pb.line_to(x + width, y + height);
    pb.line_to(x, y + height);
    pb.close();
    pb.finish()
}

/// Draw a filled circle onto a pixmap
pub(crate) fn fill_circle(pixmap: &mut Pixmap, circle: &CircleAnnotation) {
    let cx = circle.x + circle.radius;
    let cy = circle.y + circle.radius;
    let Some(path) = build_ellipse_path(cx, cy, circle.radius, circle.radius) else {
        return;
    };
    pixmap.fill_path(
        &path,
        &fill_paint(circle.color),
        tiny_skia::FillRule::Winding,
        Transform::identity(),
        None,
    );
}

/// Draw a filled rectangle onto a pixmap
pub(crate) fn fill_rectangle(pixmap: &mut Pixmap, rect: &RectangleAnnotation) {
    let Some(r) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
        return;
    };
    pixmap.fill_rect(r, &fill_paint(rect.color), Transform::identity(), None);
}

/// Draw a filled triangle onto a pixmap
pub(crate) fn fill_triangle(pixmap: &mut Pixmap, tri: &TriangleAnnotation) {
    let Some(path) = build_triangle_path(tri.x, tri.y, tri.width, tri.height) else {
        return;
    };
    pixmap.fill_path(
        &path,
        &fill_paint(tri.color),
        tiny_skia::FillRule::Winding,
        Transform::identity(),
        None,
    );
}
