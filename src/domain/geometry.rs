//! Geometric types and fit math for the editing surface
//!
//! All coordinates are in canvas pixels with the origin at the top-left.

/// Axis-aligned bounding box in canvas coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    /// Create a bounding box from its top-left corner and size
    pub fn from_position_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Get the width of the box
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Get the height of the box
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Check if this box contains a point
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Largest uniform scale factor that keeps an image of `img_w` x `img_h`
/// inside a `frame_w` x `frame_h` frame on both axes.
///
/// The result may exceed 1.0: small images are scaled up to fill the frame.
#[inline]
pub fn fit_scale(frame_w: f32, frame_h: f32, img_w: f32, img_h: f32) -> f32 {
    (frame_w / img_w).min(frame_h / img_h)
}

/// Offset that centers a span of `scaled` pixels inside a `frame` span
#[inline]
pub fn centered_offset(frame: f32, scaled: f32) -> f32 {
    (frame - scaled) / 2.0
}

/// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
pub const BEZIER_K: f32 = 0.552_284_8;
