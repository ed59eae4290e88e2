//! Rasterization of the scene onto an image buffer
//!
//! Shape fills go through tiny-skia; text goes through ab_glyph. Both draw
//! directly onto an `RgbaImage` so the exported raster matches the scene
//! state at the moment of flattening.

pub mod raster;
pub mod text;

use ab_glyph::FontArc;
use image::RgbaImage;

use crate::domain::Annotation;
use crate::error::{Error, Result};

/// Draw all annotations in a single pass (z-order = slice order)
///
/// Consecutive shapes share one pixmap borrow of the image; only a text
/// annotation forces a flush, since text draws on the image directly.
/// Fails with [`Error::FontUnavailable`] if a text annotation is reached
/// and no font was resolved; text is never silently dropped from exports.
pub fn draw_annotations_in_order(
    img: &mut RgbaImage,
    annotations: &[Annotation],
    font: Option<&FontArc>,
) -> Result<()> {
    let mut i = 0;
    while i < annotations.len() {
        if let Annotation::Text(t) = &annotations[i] {
            let font = font.ok_or(Error::FontUnavailable)?;
            text::draw_text_on_image(img, t, font);
            i += 1;
            continue;
        }

        let start = i;
        while i < annotations.len() && !annotations[i].is_text() {
            i += 1;
        }
        raster::with_pixmap(img, |pixmap| {
            for annotation in &annotations[start..i] {
                match annotation {
                    Annotation::Circle(circle) => raster::fill_circle(pixmap, circle),
                    Annotation::Rectangle(rect) => raster::fill_rectangle(pixmap, rect),
                    Annotation::Triangle(tri) => raster::fill_triangle(pixmap, tri),
                    Annotation::Text(_) => unreachable!("text ends a shape run"),
                }
            }
        });
    }
    Ok(())
}
