//! Camera rectangles and the persisted layout of world positions.
//!
//! Points, vectors and sizes are plain [`Vec2`]s; a size keeps the width in
//! `x` and the height in `y`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned world rectangle visible through the camera.
///
/// Callers keep `min.x < max.x` and `min.y < max.y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Bounds spanning the origin to `size`.
    pub const fn from_size(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Adds the delta's `min` offset to `min` and its `max` offset to `max`.
    pub fn apply(&self, delta: &BoundsDelta) -> Self {
        Self::new(self.min + delta.min, self.max + delta.max)
    }
}

/// Offsets to add to each corner of a [`Bounds`].
///
/// A pan moves both corners by the same vector; a zoom moves them apart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundsDelta {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundsDelta {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Uniform translation of both corners.
    pub const fn translation(by: Vec2) -> Self {
        Self::new(by, by)
    }
}

/// `#[serde(with = "xy")]` adapter writing a [`Vec2`] as `{"x": .., "y": ..}`.
///
/// glam's own impls use `[x, y]`; saved levels use the object form.
pub mod xy {
    use glam::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xy {
        x: f32,
        y: f32,
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &Vec2, serializer: S) -> Result<S::Ok, S::Error> {
        Xy {
            x: value.x,
            y: value.y,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec2, D::Error> {
        let Xy { x, y } = Xy::deserialize(deserializer)?;
        Ok(Vec2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_apply_translation() {
        let bounds = Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(800.0, 600.0));
        let moved = bounds.apply(&BoundsDelta::translation(Vec2::new(10.0, -5.0)));
        assert_eq!(moved.min, Vec2::new(10.0, -5.0));
        assert_eq!(moved.max, Vec2::new(810.0, 595.0));
        assert_eq!(moved.width(), 800.0);
        assert_eq!(moved.height(), 600.0);
    }

    #[test]
    fn test_bounds_apply_zoom_delta() {
        let bounds = Bounds::from_size(Vec2::new(100.0, 50.0));
        let delta = BoundsDelta::new(Vec2::splat(-10.0), Vec2::splat(10.0));
        let zoomed = bounds.apply(&delta);
        assert_eq!(zoomed.size(), Vec2::new(120.0, 70.0));
    }

    #[test]
    fn test_xy_layout() {
        #[derive(Serialize, Deserialize)]
        struct Holder {
            #[serde(with = "xy")]
            at: Vec2,
        }

        let json = serde_json::to_string(&Holder {
            at: Vec2::new(1.5, -2.0),
        })
        .unwrap();
        assert_eq!(json, r#"{"at":{"x":1.5,"y":-2.0}}"#);

        let back: Holder = serde_json::from_str(r#"{"at":{"x":3,"y":4}}"#).unwrap();
        assert_eq!(back.at, Vec2::new(3.0, 4.0));
    }
}
