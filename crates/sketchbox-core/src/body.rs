//! Body shapes, editor metadata and the placement presets.

use glam::Vec2;
use rapier2d::prelude::{Collider, ColliderBuilder, RigidBody, RigidBodyBuilder, Vector};
use serde::{Deserialize, Serialize};

/// Stable identifier handed out by [`crate::world::EditorWorld`].
pub type BodyId = u32;

/// Thickness of the walls framing the level.
pub const BOUNDARY_THICKNESS: f32 = 5.0;

/// Side length of the rectangle preset.
pub const RECTANGLE_SIZE: f32 = 40.0;

/// Radius of the circle preset.
pub const CIRCLE_RADIUS: f32 = 20.0;

/// Bounciness of the circle preset.
pub const CIRCLE_RESTITUTION: f32 = 0.9;

/// Opacity of a body being dragged.
pub const SELECTED_OPACITY: f32 = 0.5;

/// Opacity of a body overlapped by the dragged one, for a single frame.
pub const OVERLAP_OPACITY: f32 = 0.3;

/// Error type for building shapes from stored parameters.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ShapeError {
    #[error("{kind:?} expects {expected} parameters, got {got}")]
    Arity {
        kind: ShapeKind,
        expected: usize,
        got: usize,
    },
    #[error("shape parameter must be positive and finite, got {0}")]
    InvalidParam(f32),
}

/// Whether the world is being edited or simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Bodies are fixed and can be placed and dragged.
    #[default]
    Editor,
    /// The simulation runs with real dynamics; only panning is allowed.
    Runtime,
}

/// Kind of shape, as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl ShapeKind {
    fn param_count(self) -> usize {
        match self {
            Self::Rectangle => 2,
            Self::Circle => 1,
        }
    }
}

/// Concrete shape of a body. Rectangles are axis aligned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rectangle { width: f32, height: f32 },
    Circle { radius: f32 },
}

impl Shape {
    /// Builds a shape from its kind and ordered constructor parameters
    /// (`[width, height]` or `[radius]`).
    pub fn from_params(kind: ShapeKind, params: &[f32]) -> Result<Self, ShapeError> {
        if params.len() != kind.param_count() {
            return Err(ShapeError::Arity {
                kind,
                expected: kind.param_count(),
                got: params.len(),
            });
        }
        if let Some(&bad) = params.iter().find(|p| !p.is_finite() || **p <= 0.0) {
            return Err(ShapeError::InvalidParam(bad));
        }

        Ok(match kind {
            ShapeKind::Rectangle => Self::Rectangle {
                width: params[0],
                height: params[1],
            },
            ShapeKind::Circle => Self::Circle { radius: params[0] },
        })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Circle { .. } => ShapeKind::Circle,
        }
    }

    /// Parameters in the order [`Shape::from_params`] accepts.
    pub fn constructor_params(&self) -> Vec<f32> {
        match *self {
            Self::Rectangle { width, height } => vec![width, height],
            Self::Circle { radius } => vec![radius],
        }
    }

    /// Builds the matching `Rapier2D` collider.
    pub fn collider(&self) -> ColliderBuilder {
        match *self {
            Self::Rectangle { width, height } => ColliderBuilder::cuboid(width / 2.0, height / 2.0),
            Self::Circle { radius } => ColliderBuilder::ball(radius),
        }
    }

    /// Whether `point` lies inside (or on the border of) this shape centred
    /// at `center`.
    pub fn contains_point(&self, center: Vec2, point: Vec2) -> bool {
        match *self {
            Self::Rectangle { width, height } => {
                let offset = (point - center).abs();
                offset.x <= width / 2.0 && offset.y <= height / 2.0
            }
            Self::Circle { radius } => center.distance_squared(point) <= radius * radius,
        }
    }

    /// Whether the two shapes overlap with positive depth. Shapes that only
    /// touch along an edge or at a point do not count.
    pub fn intersects(&self, center: Vec2, other: &Shape, other_center: Vec2) -> bool {
        match (*self, *other) {
            (
                Self::Rectangle { width, height },
                Self::Rectangle {
                    width: other_width,
                    height: other_height,
                },
            ) => {
                let offset = (center - other_center).abs();
                offset.x < (width + other_width) / 2.0 && offset.y < (height + other_height) / 2.0
            }
            (Self::Circle { radius }, Self::Circle { radius: other_radius }) => {
                let reach = radius + other_radius;
                center.distance_squared(other_center) < reach * reach
            }
            (Self::Rectangle { width, height }, Self::Circle { radius }) => {
                rect_circle_overlap(center, width, height, other_center, radius)
            }
            (Self::Circle { radius }, Self::Rectangle { width, height }) => {
                rect_circle_overlap(other_center, width, height, center, radius)
            }
        }
    }
}

/// Closest point on the rectangle to the circle centre, compared against
/// the radius.
fn rect_circle_overlap(
    rect_center: Vec2,
    width: f32,
    height: f32,
    circle_center: Vec2,
    radius: f32,
) -> bool {
    let half = Vec2::new(width, height) / 2.0;
    let closest = circle_center.clamp(rect_center - half, rect_center + half);
    circle_center.distance_squared(closest) < radius * radius
}

/// Editor bookkeeping attached to a placed body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMeta {
    /// Position written to the saved state.
    pub initial_position: Vec2,
    /// Position at the start of the current drag.
    pub previous_position: Vec2,
}

impl BodyMeta {
    pub fn at(position: Vec2) -> Self {
        Self {
            initial_position: position,
            previous_position: position,
        }
    }
}

/// What a body is for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyRole {
    /// Placed by the user: selectable, draggable and persisted.
    Editor(BodyMeta),
    /// Level frame; never selectable or persisted.
    Boundary,
}

/// Builds the rigid body for a preset shape.
///
/// Rectangles are always fixed. Circles only become dynamic in runtime mode.
pub fn preset_body(shape: &Shape, position: Vec2, mode: GameMode) -> (RigidBody, Collider) {
    let builder = match (shape.kind(), mode) {
        (ShapeKind::Circle, GameMode::Runtime) => RigidBodyBuilder::dynamic(),
        _ => RigidBodyBuilder::fixed(),
    };
    let body = builder.translation(Vector::new(position.x, position.y)).build();

    let collider = match shape.kind() {
        ShapeKind::Circle => shape.collider().restitution(CIRCLE_RESTITUTION),
        ShapeKind::Rectangle => shape.collider(),
    };

    (body, collider.build())
}

/// Default shape placed for each kind.
pub fn preset_shape(kind: ShapeKind) -> Shape {
    match kind {
        ShapeKind::Rectangle => Shape::Rectangle {
            width: RECTANGLE_SIZE,
            height: RECTANGLE_SIZE,
        },
        ShapeKind::Circle => Shape::Circle {
            radius: CIRCLE_RADIUS,
        },
    }
}

/// Four thin walls framing a level, as `(shape, centre)` pairs in
/// left, bottom, top, right order.
pub fn boundary_walls(level: Vec2) -> [(Shape, Vec2); 4] {
    let (width, height) = (level.x, level.y);
    let vertical = Shape::Rectangle {
        width: BOUNDARY_THICKNESS,
        height,
    };
    let horizontal = Shape::Rectangle {
        width,
        height: BOUNDARY_THICKNESS,
    };
    [
        (vertical, Vec2::new(0.0, height / 2.0)),
        (horizontal, Vec2::new(width / 2.0, height - 1.0)),
        (horizontal, Vec2::new(width / 2.0, 0.0)),
        (vertical, Vec2::new(width - 1.0, height / 2.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: Shape = Shape::Rectangle {
        width: 40.0,
        height: 40.0,
    };
    const BALL: Shape = Shape::Circle { radius: 20.0 };

    #[test]
    fn test_from_params_roundtrips_kind_and_params() {
        let rect = Shape::from_params(ShapeKind::Rectangle, &[40.0, 20.0]).unwrap();
        assert_eq!(rect.kind(), ShapeKind::Rectangle);
        assert_eq!(rect.constructor_params(), vec![40.0, 20.0]);

        let ball = Shape::from_params(ShapeKind::Circle, &[12.5]).unwrap();
        assert_eq!(ball, Shape::Circle { radius: 12.5 });
    }

    #[test]
    fn test_from_params_rejects_bad_input() {
        assert_eq!(
            Shape::from_params(ShapeKind::Circle, &[1.0, 2.0]),
            Err(ShapeError::Arity {
                kind: ShapeKind::Circle,
                expected: 1,
                got: 2
            })
        );
        assert_eq!(
            Shape::from_params(ShapeKind::Rectangle, &[10.0, -1.0]),
            Err(ShapeError::InvalidParam(-1.0))
        );
        assert!(Shape::from_params(ShapeKind::Circle, &[f32::NAN]).is_err());
    }

    #[test]
    fn test_rectangle_contains_point_inclusive() {
        let center = Vec2::new(100.0, 100.0);
        assert!(SQUARE.contains_point(center, Vec2::new(100.0, 100.0)));
        assert!(SQUARE.contains_point(center, Vec2::new(120.0, 80.0)));
        assert!(!SQUARE.contains_point(center, Vec2::new(120.1, 100.0)));
    }

    #[test]
    fn test_circle_contains_point() {
        let center = Vec2::new(0.0, 0.0);
        assert!(BALL.contains_point(center, Vec2::new(12.0, 16.0)));
        // corner of the bounding box is outside the circle
        assert!(!BALL.contains_point(center, Vec2::new(19.0, 19.0)));
    }

    #[test]
    fn test_rectangles_touching_do_not_intersect() {
        let a = Vec2::new(110.0, 110.0);
        assert!(!SQUARE.intersects(a, &SQUARE, Vec2::new(150.0, 110.0)));
        assert!(SQUARE.intersects(a, &SQUARE, Vec2::new(149.0, 120.0)));
    }

    #[test]
    fn test_circles_intersect_by_distance() {
        let a = Vec2::new(0.0, 0.0);
        assert!(BALL.intersects(a, &BALL, Vec2::new(30.0, 0.0)));
        assert!(!BALL.intersects(a, &BALL, Vec2::new(40.0, 0.0)));
    }

    #[test]
    fn test_rectangle_circle_intersection_is_symmetric() {
        let rect_center = Vec2::new(0.0, 0.0);
        // circle near the corner but outside it
        let near_corner = Vec2::new(35.0, 35.0);
        assert!(!SQUARE.intersects(rect_center, &BALL, near_corner));
        assert!(!BALL.intersects(near_corner, &SQUARE, rect_center));

        let overlapping = Vec2::new(30.0, 0.0);
        assert!(SQUARE.intersects(rect_center, &BALL, overlapping));
        assert!(BALL.intersects(overlapping, &SQUARE, rect_center));
    }

    #[test]
    fn test_preset_circle_is_dynamic_only_at_runtime() {
        let shape = preset_shape(ShapeKind::Circle);
        let (editor_body, _) = preset_body(&shape, Vec2::new(10.0, 10.0), GameMode::Editor);
        let (runtime_body, collider) =
            preset_body(&shape, Vec2::new(10.0, 10.0), GameMode::Runtime);
        assert!(editor_body.is_fixed());
        assert!(runtime_body.is_dynamic());
        assert_eq!(collider.restitution(), CIRCLE_RESTITUTION);

        let (rect_body, _) = preset_body(
            &preset_shape(ShapeKind::Rectangle),
            Vec2::ZERO,
            GameMode::Runtime,
        );
        assert!(rect_body.is_fixed());
    }

    #[test]
    fn test_boundary_walls_frame_level() {
        let walls = boundary_walls(Vec2::new(2200.0, 1200.0));
        assert_eq!(walls.len(), 4);
        let (left, left_center) = walls[0];
        assert_eq!(left_center, Vec2::new(0.0, 600.0));
        assert_eq!(left.constructor_params(), vec![BOUNDARY_THICKNESS, 1200.0]);
        let (_, right_center) = walls[3];
        assert_eq!(right_center.x, 2199.0);
    }
}
