//! Text rendering for annotations using ab_glyph
//!
//! Glyphs are laid out with kerning and horizontal advances, then blended
//! per-pixel onto the target image using the outline coverage as alpha.

use ab_glyph::{Font, FontArc, ScaleFont, point};
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::domain::TextAnnotation;

/// Common font locations probed when no font path is configured
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-fonts/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Load a font from an explicit file path
pub fn load_font(path: &Path) -> Option<FontArc> {
    let data = std::fs::read(path)
        .map_err(|err| log::warn!("Could not read font {}: {err}", path.display()))
        .ok()?;
    FontArc::try_from_vec(data)
        .map_err(|err| log::warn!("Could not parse font {}: {err:?}", path.display()))
        .ok()
}

/// Probe common system locations for a usable sans-serif font
pub fn load_default_font() -> Option<FontArc> {
    for candidate in FONT_SEARCH_PATHS {
        let path = Path::new(candidate);
        if path.exists()
            && let Some(font) = load_font(path)
        {
            log::debug!("Using font {}", path.display());
            return Some(font);
        }
    }
    log::warn!("No system font found; text annotations cannot be rasterized");
    None
}

/// Draw a text annotation onto an image
///
/// The annotation position is the top-left corner of the text box; the
/// baseline sits one ascent below it.
pub fn draw_text_on_image(img: &mut RgbaImage, text: &TextAnnotation, font: &FontArc) {
    let scaled = font.as_scaled(text.font_size);
    let [r, g, b, a] = text.color.to_rgba_u8();

    let base_y = text.y + scaled.ascent();
    let mut cx = text.x;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.content.chars() {
        let gid = font.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            cx += scaled.kern(prev, gid);
        }
        let glyph = gid.with_scale_and_position(text.font_size, point(cx, base_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, cov| {
                let x = bounds.min.x + px as f32;
                let y = bounds.min.y + py as f32;
                if x < 0.0 || y < 0.0 || x >= img.width() as f32 || y >= img.height() as f32 {
                    return;
                }
                let alpha = (cov * a as f32).round().min(255.0) as u8;
                if alpha == 0 {
                    return;
                }
                blend_pixel(img, x as u32, y as u32, [r, g, b, alpha]);
            });
        }
        cx += scaled.h_advance(gid);
        prev_glyph = Some(gid);
    }
}

/// Source-over blend of a straight-alpha color onto one pixel
fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, src: [u8; 4]) {
    let dst = img.get_pixel(x, y);
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return;
    }
    let channel = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        (((s * sa + d * da * (1.0 - sa)) / out_a) * 255.0).round() as u8
    };
    img.put_pixel(
        x,
        y,
        Rgba([
            channel(src[0], dst[0]),
            channel(src[1], dst[1]),
            channel(src[2], dst[2]),
            (out_a * 255.0).round() as u8,
        ]),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::annotation::text;
    use crate::domain::ShapeColor;

    fn sample_text() -> TextAnnotation {
        TextAnnotation {
            x: 10.0,
            y: 10.0,
            content: "Hello".to_string(),
            font_size: 24.0,
            color: text::DEFAULT_COLOR,
        }
    }

    #[test]
    fn test_draw_text_marks_pixels() {
        // Runs only when a system font is present
        let Some(font) = load_default_font() else {
            return;
        };

        let mut img = RgbaImage::from_pixel(200, 60, image::Rgba([255, 255, 255, 255]));
        let before = img.clone();
        draw_text_on_image(&mut img, &sample_text(), &font);
        assert_ne!(img, before, "text rendering left the image untouched");
    }

    #[test]
    fn test_blend_pixel_opaque_replaces() {
        let mut img = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        blend_pixel(&mut img, 0, 0, [0, 0, 0, 255]);
        assert_eq!(*img.get_pixel(0, 0), image::Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_blend_pixel_half_alpha_mixes() {
        let mut img = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        blend_pixel(&mut img, 0, 0, [0, 0, 0, 128]);
        let px = img.get_pixel(0, 0);
        assert!(px[0] > 100 && px[0] < 150, "expected mid-gray, got {px:?}");
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_load_font_missing_path() {
        assert!(load_font(Path::new("/nonexistent/font.ttf")).is_none());
    }

    #[test]
    fn test_shape_color_alpha_passthrough() {
        let c = ShapeColor::new(0.0, 0.0, 0.0, 0.25);
        assert_eq!(c.to_rgba_u8()[3], 64);
    }
}
