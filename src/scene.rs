//! Layered drawing model for one edit session
//!
//! A [`Scene`] owns a fixed-size surface, an optional background photo and
//! an ordered set of annotation objects. Insertion order is z-order. The
//! scene moves through `Uninitialized -> Ready -> Disposed`; every mutation
//! is only valid in `Ready`, and calling one in any other state is a
//! programming error that panics rather than silently succeeding.

use ab_glyph::FontArc;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage, imageops};

use crate::domain::{Annotation, ShapeKind, centered_offset, fit_scale};
use crate::error::{Error, Result};
use crate::render;

/// Identifier of one annotation object within its scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

/// Lifecycle state of a scene
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneState {
    /// Created, background photo not loaded yet
    Uninitialized,
    /// Background in place, mutations allowed
    Ready,
    /// Torn down; terminal
    Disposed,
}

/// Background photo layer, scaled once at load time
#[derive(Clone, Debug)]
struct Background {
    /// Photo already resized to its on-canvas dimensions
    scaled: RgbaImage,
    /// Uniform fit scale that was applied
    scale: f32,
    /// Placement of the scaled photo on the canvas
    left: f32,
    top: f32,
}

/// One annotation object with its stable id
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub id: ObjectId,
    pub annotation: Annotation,
}

/// The in-memory layered drawing associated with one edit session
pub struct Scene {
    width: u32,
    height: u32,
    state: SceneState,
    background: Option<Background>,
    objects: Vec<SceneObject>,
    selection: Option<ObjectId>,
    next_id: u64,
    font: Option<FontArc>,
}

impl Scene {
    /// Create an empty scene for a surface of the given pixel dimensions
    ///
    /// `font` is used to rasterize text annotations at export time; pass
    /// `None` when no font could be resolved (text exports will then fail
    /// explicitly instead of dropping layers).
    pub fn new(width: u32, height: u32, font: Option<FontArc>) -> Self {
        Self {
            width,
            height,
            state: SceneState::Uninitialized,
            background: None,
            objects: Vec::new(),
            selection: None,
            next_id: 0,
            font,
        }
    }

    /// Insert the photo as the lowest layer and move to `Ready`
    ///
    /// The photo is scaled uniformly to fit inside the surface (aspect ratio
    /// preserved, upscaling allowed) and centered on both axes.
    pub fn set_background(&mut self, photo: &DynamicImage) {
        assert_eq!(
            self.state,
            SceneState::Uninitialized,
            "background can only be set on an uninitialized scene"
        );

        let (img_w, img_h) = (photo.width() as f32, photo.height() as f32);
        let scale = fit_scale(self.width as f32, self.height as f32, img_w, img_h);
        let scaled_w = ((img_w * scale).round() as u32).max(1);
        let scaled_h = ((img_h * scale).round() as u32).max(1);
        let left = centered_offset(self.width as f32, img_w * scale);
        let top = centered_offset(self.height as f32, img_h * scale);

        log::debug!(
            "Background {}x{} scaled by {scale} to {scaled_w}x{scaled_h} at ({left}, {top})",
            photo.width(),
            photo.height()
        );

        let scaled = imageops::resize(&photo.to_rgba8(), scaled_w, scaled_h, FilterType::Triangle);
        self.background = Some(Background {
            scaled,
            scale,
            left,
            top,
        });
        self.state = SceneState::Ready;
    }

    /// Current lifecycle state
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Surface dimensions in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Fit scale applied to the background, if one is loaded
    pub fn background_scale(&self) -> Option<f32> {
        self.background.as_ref().map(|b| b.scale)
    }

    /// Placement of the background's top-left corner, if one is loaded
    pub fn background_offset(&self) -> Option<(f32, f32)> {
        self.background.as_ref().map(|b| (b.left, b.top))
    }

    /// Number of annotation objects (the background is not counted)
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Currently selected object, if any
    pub fn selected(&self) -> Option<ObjectId> {
        self.selection
    }

    fn assert_ready(&self) {
        assert_eq!(
            self.state,
            SceneState::Ready,
            "scene mutation while not ready"
        );
    }

    fn insert(&mut self, annotation: Annotation) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject { id, annotation });
        self.selection = Some(id);
        id
    }

    /// Insert a new text object with placeholder content and select it
    pub fn add_text(&mut self) -> ObjectId {
        self.assert_ready();
        self.insert(Annotation::new_text())
    }

    /// Insert a new shape of the given kind and select it
    pub fn add_shape(&mut self, kind: ShapeKind) -> ObjectId {
        self.assert_ready();
        self.insert(Annotation::new_shape(kind))
    }

    /// Select the topmost object whose bounds contain the point, or clear
    /// the selection when the point hits none. The background is never
    /// selectable. Returns the new selection.
    pub fn select_at(&mut self, x: f32, y: f32) -> Option<ObjectId> {
        self.assert_ready();
        self.selection = self
            .objects
            .iter()
            .rev()
            .find(|obj| obj.annotation.bounds().contains_point(x, y))
            .map(|obj| obj.id);
        self.selection
    }

    /// Move the selected object by the given offset; no-op without selection
    pub fn translate_selected(&mut self, dx: f32, dy: f32) {
        self.assert_ready();
        let Some(id) = self.selection else {
            return;
        };
        if let Some(obj) = self.objects.iter_mut().find(|obj| obj.id == id) {
            obj.annotation.translate(dx, dy);
        }
    }

    /// Scale the selected object by `factor`, keeping its top-left corner;
    /// no-op without selection. Non-positive and non-finite factors are
    /// ignored so a degenerate drag cannot collapse or invert an object.
    pub fn scale_selected(&mut self, factor: f32) {
        self.assert_ready();
        if !factor.is_finite() || factor <= 0.0 {
            log::debug!("ignoring scale factor {factor}");
            return;
        }
        let Some(id) = self.selection else {
            return;
        };
        if let Some(obj) = self.objects.iter_mut().find(|obj| obj.id == id) {
            obj.annotation.scale(factor);
        }
    }

    /// Replace the content of the selected text object (in-place editing)
    ///
    /// No-op when nothing is selected or the selection is not text.
    pub fn set_selected_text(&mut self, content: impl Into<String>) {
        self.assert_ready();
        let Some(id) = self.selection else {
            return;
        };
        let Some(obj) = self.objects.iter_mut().find(|obj| obj.id == id) else {
            return;
        };
        match &mut obj.annotation {
            Annotation::Text(text) => text.content = content.into(),
            _ => log::debug!("set_selected_text on non-text object {id:?}"),
        }
    }

    /// Remove the selected object; no-op when nothing is selected
    pub fn delete_selected(&mut self) {
        self.assert_ready();
        let Some(id) = self.selection.take() else {
            return;
        };
        self.objects.retain(|obj| obj.id != id);
    }

    /// Look at the annotation behind an id (read-only)
    pub fn annotation(&self, id: ObjectId) -> Option<&Annotation> {
        self.objects
            .iter()
            .find(|obj| obj.id == id)
            .map(|obj| &obj.annotation)
    }

    /// Flatten all layers in z-order into a PNG-encoded raster
    ///
    /// The raster has the surface's exact pixel dimensions. Margins around
    /// the fitted photo are white. Fails with [`Error::SceneNotReady`]
    /// before the background has loaded and [`Error::FontUnavailable`] when
    /// text is present but no font was resolved.
    pub fn export(&self) -> Result<Vec<u8>> {
        assert_ne!(self.state, SceneState::Disposed, "export on disposed scene");
        let Some(background) = &self.background else {
            return Err(Error::SceneNotReady);
        };

        let mut canvas = RgbaImage::from_pixel(self.width, self.height, Rgba([255, 255, 255, 255]));
        imageops::overlay(
            &mut canvas,
            &background.scaled,
            background.left.round() as i64,
            background.top.round() as i64,
        );

        let annotations: Vec<Annotation> = self
            .objects
            .iter()
            .map(|obj| obj.annotation.clone())
            .collect();
        render::draw_annotations_in_order(&mut canvas, &annotations, self.font.as_ref())?;

        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(
                canvas.as_raw(),
                self.width,
                self.height,
                ExtendedColorType::Rgba8,
            )
            .map_err(|err| Error::Encode(err.to_string()))?;
        Ok(bytes)
    }

    /// Release the drawing surface; must be called exactly once
    pub fn dispose(&mut self) {
        assert_ne!(self.state, SceneState::Disposed, "scene disposed twice");
        self.background = None;
        self.objects.clear();
        self.selection = None;
        self.state = SceneState::Disposed;
    }
}
