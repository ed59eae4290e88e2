//! Annotation types for drawing on the editing surface
//!
//! All annotation types store coordinates in canvas pixels. Positions are
//! the top-left corner of the object's bounding box, matching how the
//! on-screen editor places new objects.

use super::geometry::Bounds;

/// RGBA fill color with components in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ShapeColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }
}

/// Default placement for newly inserted objects
pub const DEFAULT_POSITION: (f32, f32) = (100.0, 100.0);

/// Defaults for text annotations
pub mod text {
    /// Placeholder content until the user edits the text in place
    pub const DEFAULT_CONTENT: &str = "Double click to edit";
    /// Default font size in canvas pixels
    pub const DEFAULT_FONT_SIZE: f32 = 20.0;
    /// Approximate glyph width as a fraction of font size, for hit-testing
    pub const APPROX_CHAR_WIDTH: f32 = 0.6;
    /// Line height as a fraction of font size, for hit-testing
    pub const LINE_HEIGHT: f32 = 1.2;

    use super::ShapeColor;
    /// Default text fill (opaque black)
    pub const DEFAULT_COLOR: ShapeColor = ShapeColor::new(0.0, 0.0, 0.0, 1.0);
}

/// Defaults for shape annotations
pub mod shape {
    use super::ShapeColor;

    /// Default circle radius in canvas pixels
    pub const DEFAULT_RADIUS: f32 = 50.0;
    /// Default rectangle/triangle edge length in canvas pixels
    pub const DEFAULT_SIZE: f32 = 100.0;

    /// Semi-transparent red fill for circles
    pub const CIRCLE_FILL: ShapeColor = ShapeColor::new(1.0, 0.0, 0.0, 0.5);
    /// Semi-transparent green fill for rectangles
    pub const RECTANGLE_FILL: ShapeColor = ShapeColor::new(0.0, 1.0, 0.0, 0.5);
    /// Semi-transparent blue fill for triangles
    pub const TRIANGLE_FILL: ShapeColor = ShapeColor::new(0.0, 0.0, 1.0, 0.5);
}

/// Text annotation
#[derive(Clone, Debug, PartialEq)]
pub struct TextAnnotation {
    /// Top-left corner of the text box
    pub x: f32,
    pub y: f32,
    pub content: String,
    pub font_size: f32,
    pub color: ShapeColor,
}

/// Filled circle annotation
#[derive(Clone, Debug, PartialEq)]
pub struct CircleAnnotation {
    /// Top-left corner of the bounding box (center is at x+radius, y+radius)
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: ShapeColor,
}

/// Filled rectangle annotation
#[derive(Clone, Debug, PartialEq)]
pub struct RectangleAnnotation {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: ShapeColor,
}

/// Filled isoceles triangle annotation (apex top-center, base at the bottom)
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleAnnotation {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: ShapeColor,
}

/// Shape variant selector for insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Triangle,
}

/// Unified annotation type for ordered drawing (z-order = insertion order)
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    Text(TextAnnotation),
    Circle(CircleAnnotation),
    Rectangle(RectangleAnnotation),
    Triangle(TriangleAnnotation),
}

impl Annotation {
    /// New text annotation with placeholder content at the default position
    pub fn new_text() -> Self {
        Annotation::Text(TextAnnotation {
            x: DEFAULT_POSITION.0,
            y: DEFAULT_POSITION.1,
            content: text::DEFAULT_CONTENT.to_string(),
            font_size: text::DEFAULT_FONT_SIZE,
            color: text::DEFAULT_COLOR,
        })
    }

    /// New shape annotation of the given kind with its default size and fill
    pub fn new_shape(kind: ShapeKind) -> Self {
        let (x, y) = DEFAULT_POSITION;
        match kind {
            ShapeKind::Circle => Annotation::Circle(CircleAnnotation {
                x,
                y,
                radius: shape::DEFAULT_RADIUS,
                color: shape::CIRCLE_FILL,
            }),
            ShapeKind::Rectangle => Annotation::Rectangle(RectangleAnnotation {
                x,
                y,
                width: shape::DEFAULT_SIZE,
                height: shape::DEFAULT_SIZE,
                color: shape::RECTANGLE_FILL,
            }),
            ShapeKind::Triangle => Annotation::Triangle(TriangleAnnotation {
                x,
                y,
                width: shape::DEFAULT_SIZE,
                height: shape::DEFAULT_SIZE,
                color: shape::TRIANGLE_FILL,
            }),
        }
    }

    /// Check if this is a text annotation
    pub fn is_text(&self) -> bool {
        matches!(self, Annotation::Text(_))
    }

    /// Bounding box in canvas coordinates
    ///
    /// Text bounds are an approximation from character count; exact metrics
    /// would need the font, which domain types do not depend on.
    pub fn bounds(&self) -> Bounds {
        match self {
            Annotation::Text(t) => {
                let width = t.content.chars().count() as f32 * t.font_size * text::APPROX_CHAR_WIDTH;
                let height = t.font_size * text::LINE_HEIGHT;
                Bounds::from_position_size(t.x, t.y, width.max(t.font_size), height)
            }
            Annotation::Circle(c) => {
                Bounds::from_position_size(c.x, c.y, c.radius * 2.0, c.radius * 2.0)
            }
            Annotation::Rectangle(r) => Bounds::from_position_size(r.x, r.y, r.width, r.height),
            Annotation::Triangle(t) => Bounds::from_position_size(t.x, t.y, t.width, t.height),
        }
    }

    /// Scale the annotation's size by `factor`, keeping its top-left corner
    ///
    /// Circles scale their radius, rectangles and triangles scale both
    /// edges, text scales its font size.
    pub fn scale(&mut self, factor: f32) {
        match self {
            Annotation::Text(t) => t.font_size *= factor,
            Annotation::Circle(c) => c.radius *= factor,
            Annotation::Rectangle(r) => {
                r.width *= factor;
                r.height *= factor;
            }
            Annotation::Triangle(t) => {
                t.width *= factor;
                t.height *= factor;
            }
        }
    }

    /// Move the annotation by the given offset
    pub fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Annotation::Text(t) => {
                t.x += dx;
                t.y += dy;
            }
            Annotation::Circle(c) => {
                c.x += dx;
                c.y += dy;
            }
            Annotation::Rectangle(r) => {
                r.x += dx;
                r.y += dy;
            }
            Annotation::Triangle(t) => {
                t.x += dx;
                t.y += dy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_color_to_rgba_u8() {
        assert_eq!(shape::CIRCLE_FILL.to_rgba_u8(), [255, 0, 0, 128]);
        assert_eq!(shape::RECTANGLE_FILL.to_rgba_u8(), [0, 255, 0, 128]);
        assert_eq!(shape::TRIANGLE_FILL.to_rgba_u8(), [0, 0, 255, 128]);
        assert_eq!(text::DEFAULT_COLOR.to_rgba_u8(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_new_shape_defaults() {
        let Annotation::Circle(c) = Annotation::new_shape(ShapeKind::Circle) else {
            panic!("expected circle");
        };
        assert_eq!((c.x, c.y), DEFAULT_POSITION);
        assert_eq!(c.radius, 50.0);

        let Annotation::Triangle(t) = Annotation::new_shape(ShapeKind::Triangle) else {
            panic!("expected triangle");
        };
        assert_eq!(t.width, 100.0);
        assert_eq!(t.height, 100.0);
    }

    #[test]
    fn test_circle_bounds_cover_diameter() {
        let ann = Annotation::new_shape(ShapeKind::Circle);
        let b = ann.bounds();
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 100.0);
        assert!(b.contains_point(150.0, 150.0));
        assert!(!b.contains_point(201.0, 150.0));
    }

    #[test]
    fn test_translate_moves_bounds() {
        let mut ann = Annotation::new_shape(ShapeKind::Rectangle);
        let before = ann.bounds();
        ann.translate(30.0, -10.0);
        let after = ann.bounds();
        assert_eq!(after.left, before.left + 30.0);
        assert_eq!(after.top, before.top - 10.0);
        assert_eq!(after.width(), before.width());
    }

    #[test]
    fn test_scale_keeps_corner_and_grows_bounds() {
        let mut ann = Annotation::new_shape(ShapeKind::Circle);
        ann.scale(2.0);
        let b = ann.bounds();
        assert_eq!((b.left, b.top), DEFAULT_POSITION);
        assert_eq!(b.width(), 200.0);
        assert_eq!(b.height(), 200.0);

        let mut ann = Annotation::new_text();
        ann.scale(0.5);
        let Annotation::Text(t) = &ann else {
            panic!("expected text");
        };
        assert_eq!(t.font_size, 10.0);
    }

    #[test]
    fn test_text_bounds_grow_with_content() {
        let mut ann = Annotation::new_text();
        let short = ann.bounds().width();
        if let Annotation::Text(t) = &mut ann {
            t.content.push_str(" with much longer content");
        }
        assert!(ann.bounds().width() > short);
    }
}
