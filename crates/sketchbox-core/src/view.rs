//! Pointer-to-world coordinate conversion.
//!
//! The canvas shows the world rectangle `bounds` stretched over
//! `canvas_size` pixels, so each axis has its own scale factor:
//!
//! ```text
//! world = (bounds_extent / canvas_extent) * canvas_pixel + bounds.min
//! ```

use glam::Vec2;

use crate::geometry::Bounds;

/// The camera state needed to map pixels into the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// World rectangle currently visible.
    pub bounds: Bounds,
    /// Logical pixel size of the canvas.
    pub canvas_size: Vec2,
}

impl CameraView {
    pub const fn new(bounds: Bounds, canvas_size: Vec2) -> Self {
        Self {
            bounds,
            canvas_size,
        }
    }

    /// World units per canvas pixel, per axis.
    fn scale(&self) -> Vec2 {
        self.bounds.size() / self.canvas_size
    }
}

/// Converts a page-relative pointer position into world coordinates.
///
/// `canvas_origin` is the canvas element's top-left corner on the page. With
/// no camera the canvas-relative pixel position is returned as is.
pub fn screen_to_world(pointer: Vec2, canvas_origin: Vec2, camera: Option<&CameraView>) -> Vec2 {
    let local = pointer - canvas_origin;
    match camera {
        Some(camera) => camera.scale() * local + camera.bounds.min,
        None => local,
    }
}

/// Scales a pixel delta (e.g. pointer movement) into a world delta.
///
/// Same scale as [`screen_to_world`] but without the `bounds.min` offset.
pub fn translate_vector(delta: Vec2, camera: Option<&CameraView>) -> Vec2 {
    match camera {
        Some(camera) => camera.scale() * delta,
        None => delta,
    }
}
