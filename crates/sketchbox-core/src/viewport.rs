//! Camera bounds management: clamping pans to the level and fitting the
//! whole level into the canvas.

use glam::Vec2;

use crate::geometry::{Bounds, BoundsDelta};

/// Which level edges a proposed camera rectangle crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeFlags {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl EdgeFlags {
    /// Computes the flags for `bounds` against a level of size `level`.
    pub fn of(bounds: &Bounds, level: Vec2) -> Self {
        Self {
            left: bounds.min.x < 0.0,
            top: bounds.min.y < 0.0,
            right: bounds.max.x > level.x,
            bottom: bounds.max.y > level.y,
        }
    }

    /// True when two adjacent edges are crossed at once.
    pub fn in_corner(&self) -> bool {
        (self.left && self.top)
            || (self.top && self.right)
            || (self.right && self.bottom)
            || (self.bottom && self.left)
    }
}

/// Applies `delta` to `current`, keeping the camera inside `[0, w] x [0, h]`.
///
/// A move that crosses two adjacent edges is rejected outright and `current`
/// is returned. Otherwise an axis crossing one side has that coordinate pinned
/// to the level edge while the opposite coordinate still moves by the delta.
///
/// When a move crosses both sides of one axis (the view is wider or taller
/// than the level), that axis keeps its current coordinates instead of being
/// squeezed to `[0, extent]`; the other axis is still clamped as usual.
pub fn clamp_viewport(delta: &BoundsDelta, current: &Bounds, level: Vec2) -> Bounds {
    let proposed = current.apply(delta);
    let edges = EdgeFlags::of(&proposed, level);

    if edges.in_corner() {
        tracing::trace!(?edges, "viewport pinned in a corner, pan rejected");
        return *current;
    }

    let (min_x, max_x) = clamp_axis(
        (proposed.min.x, proposed.max.x),
        (current.min.x, current.max.x),
        (edges.left, edges.right),
        level.x,
    );
    let (min_y, max_y) = clamp_axis(
        (proposed.min.y, proposed.max.y),
        (current.min.y, current.max.y),
        (edges.top, edges.bottom),
        level.y,
    );

    Bounds::new(Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
}

fn clamp_axis(
    proposed: (f32, f32),
    current: (f32, f32),
    (low, high): (bool, bool),
    extent: f32,
) -> (f32, f32) {
    match (low, high) {
        (false, false) => proposed,
        (true, false) => (0.0, proposed.1),
        (false, true) => (proposed.0, extent),
        // View is larger than the level on this axis; leave it where it is.
        (true, true) => current,
    }
}

/// Camera bounds showing the whole level centred in a viewport.
///
/// The axis where the level is relatively longer spans the level exactly;
/// the other axis is padded by `(level - viewport) / 2` on both sides. That
/// padding is negative when the viewport is larger, which zooms in.
pub fn fit_bounds(level: Vec2, viewport: Vec2) -> Bounds {
    if aspect(level) >= aspect(viewport) {
        let pad = (level.y - viewport.y) / 2.0;
        Bounds::new(Vec2::new(0.0, -pad), Vec2::new(level.x, level.y + pad))
    } else {
        let pad = (level.x - viewport.x) / 2.0;
        Bounds::new(Vec2::new(-pad, 0.0), Vec2::new(level.x + pad, level.y))
    }
}

fn aspect(size: Vec2) -> f32 {
    size.x / size.y
}

/// Bounds delta for one wheel event: positive `wheel_delta` widens the view.
pub fn zoom_delta(wheel_delta: f32, velocity: f32) -> BoundsDelta {
    let step = velocity * wheel_delta;
    BoundsDelta::new(Vec2::splat(-step), Vec2::splat(step))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: Vec2 = Vec2::new(2200.0, 1200.0);

    fn bounds(min: (f32, f32), max: (f32, f32)) -> Bounds {
        Bounds::new(min.into(), max.into())
    }

    fn pan(x: f32, y: f32) -> BoundsDelta {
        BoundsDelta::translation(Vec2::new(x, y))
    }

    #[test]
    fn test_inside_moves_shift_exactly() {
        let current = bounds((100.0, 100.0), (900.0, 700.0));
        for (dx, dy) in [(10.0, 0.0), (-99.0, 50.0), (0.0, -99.5), (1299.0, 499.0)] {
            let result = clamp_viewport(&pan(dx, dy), &current, LEVEL);
            assert_eq!(result, current.apply(&pan(dx, dy)), "delta ({dx}, {dy})");
        }
    }

    #[test]
    fn test_left_breach_pins_min_x() {
        let current = bounds((0.0, 0.0), (800.0, 600.0));
        let result = clamp_viewport(&pan(-50.0, 0.0), &current, LEVEL);
        assert_eq!(result.min.x, 0.0);
        assert_eq!(result.max.x, 750.0);
        assert_eq!(result.min.y, 0.0);
        assert_eq!(result.max.y, 600.0);
    }

    #[test]
    fn test_right_breach_pins_max_x() {
        let current = bounds((1300.0, 200.0), (2100.0, 800.0));
        let result = clamp_viewport(&pan(150.0, 10.0), &current, LEVEL);
        assert_eq!(result.max.x, 2200.0);
        assert_eq!(result.min.x, 1450.0);
        assert_eq!(result.min.y, 210.0);
        assert_eq!(result.max.y, 810.0);
    }

    #[test]
    fn test_top_breach_pins_min_y() {
        let current = bounds((500.0, 20.0), (1300.0, 620.0));
        let result = clamp_viewport(&pan(0.0, -50.0), &current, LEVEL);
        assert_eq!(result.min.y, 0.0);
        assert_eq!(result.max.y, 570.0);
        assert_eq!(result.min.x, 500.0);
        assert_eq!(result.max.x, 1300.0);
    }

    #[test]
    fn test_bottom_breach_pins_max_y() {
        let current = bounds((500.0, 500.0), (1300.0, 1100.0));
        let result = clamp_viewport(&pan(0.0, 200.0), &current, LEVEL);
        assert_eq!(result.max.y, 1200.0);
        assert_eq!(result.min.y, 700.0);
    }

    #[test]
    fn test_adjacent_edges_reject_move() {
        let current = bounds((10.0, 10.0), (810.0, 610.0));
        // left + top
        assert_eq!(clamp_viewport(&pan(-20.0, -20.0), &current, LEVEL), current);

        let far = bounds((1390.0, 590.0), (2190.0, 1190.0));
        // right + bottom
        assert_eq!(clamp_viewport(&pan(20.0, 20.0), &far, LEVEL), far);

        let top_right = bounds((1390.0, 10.0), (2190.0, 610.0));
        assert_eq!(clamp_viewport(&pan(20.0, -20.0), &top_right, LEVEL), top_right);

        let bottom_left = bounds((10.0, 590.0), (810.0, 1190.0));
        assert_eq!(
            clamp_viewport(&pan(-20.0, 20.0), &bottom_left, LEVEL),
            bottom_left
        );
    }

    #[test]
    fn test_corner_rejection_blocks_free_axis_too() {
        // Already touching the left edge; moving up-left is rejected even
        // though x alone could have been pinned.
        let current = bounds((0.0, 5.0), (800.0, 605.0));
        assert_eq!(clamp_viewport(&pan(-1.0, -10.0), &current, LEVEL), current);
    }

    #[test]
    fn test_opposite_edges_keep_axis_in_place() {
        let wide = bounds((-100.0, 100.0), (2300.0, 700.0));
        let result = clamp_viewport(&pan(30.0, 30.0), &wide, LEVEL);
        // x crosses both left and right: x stays, y moves.
        assert_eq!(result.min.x, -100.0);
        assert_eq!(result.max.x, 2300.0);
        assert_eq!(result.min.y, 130.0);
        assert_eq!(result.max.y, 730.0);
    }

    #[test]
    fn test_fit_wide_level_spans_width() {
        let fitted = fit_bounds(LEVEL, Vec2::new(800.0, 600.0));
        assert_eq!(fitted.min.x, 0.0);
        assert_eq!(fitted.max.x, 2200.0);
        assert_eq!(fitted.min.y, -300.0);
        assert_eq!(fitted.max.y, 1500.0);
        // centred: equal padding above and below
        assert_eq!(fitted.min.y + fitted.max.y, LEVEL.y);
    }

    #[test]
    fn test_fit_tall_level_spans_height() {
        let level = Vec2::new(600.0, 1000.0);
        let fitted = fit_bounds(level, Vec2::new(800.0, 600.0));
        assert_eq!(fitted.min.y, 0.0);
        assert_eq!(fitted.max.y, 1000.0);
        assert_eq!(fitted.min.x, 100.0);
        assert_eq!(fitted.max.x, 500.0);
        assert_eq!(fitted.min.x + fitted.max.x, level.x);
    }

    #[test]
    fn test_fit_equal_aspect_fits_width() {
        let fitted = fit_bounds(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
        assert_eq!(fitted.width(), 400.0);
        assert_eq!(fitted.min.x, 0.0);
    }

    #[test]
    fn test_zoom_delta_is_symmetric() {
        let delta = zoom_delta(100.0, 0.23);
        assert!((delta.min.x + 23.0).abs() < 1e-4);
        assert!((delta.max.y - 23.0).abs() < 1e-4);
        let zoomed = bounds((0.0, 0.0), (800.0, 600.0)).apply(&delta);
        assert!((zoomed.width() - 846.0).abs() < 1e-3);
    }
}
