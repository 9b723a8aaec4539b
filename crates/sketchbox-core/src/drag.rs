//! Drag-and-drop of editor bodies with grid snapping and overlap rejection.
//!
//! ```text
//! Idle --begin--> Dragging --update*--> Dragging --end--> Idle
//!                                                 (revert if overlapping)
//! ```
//!
//! Overlapping bodies are only highlighted between [`DragController::begin_frame`]
//! and [`DragController::end_frame`], which the render loop calls around each
//! frame it draws. The highlighted ids are kept apart from the drag state, so
//! a drop or move between the two calls cannot leave a body tinted.

use glam::Vec2;

use crate::body::{BodyId, OVERLAP_OPACITY, SELECTED_OPACITY};
use crate::query::overlapping;
use crate::world::EditorWorld;

/// Snaps `coordinate` to the centre of its grid cell.
///
/// `None` or a non-positive step leaves the value untouched. Cells are
/// half-open `[k * step, (k + 1) * step)`, including for negative values.
pub fn snap(coordinate: f32, step: Option<f32>) -> f32 {
    match step {
        Some(step) if step > 0.0 => coordinate - coordinate.rem_euclid(step) + step / 2.0,
        _ => coordinate,
    }
}

/// Snaps both axes of a point.
pub fn snap_point(point: Vec2, step: Option<f32>) -> Vec2 {
    Vec2::new(snap(point.x, step), snap(point.y, step))
}

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The body stays where it was dropped.
    Accepted,
    /// The body overlapped others and went back to its drag-start position.
    Reverted,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        body: BodyId,
        overlaps: Vec<BodyId>,
    },
}

/// Tracks the body being dragged and what it currently overlaps.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    /// Bodies tinted by the last `begin_frame`.
    highlighted: Vec<BodyId>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body being dragged, if any.
    pub fn dragged(&self) -> Option<BodyId> {
        match &self.state {
            DragState::Dragging { body, .. } => Some(*body),
            DragState::Idle => None,
        }
    }

    /// Bodies the dragged one overlapped after the last update.
    pub fn overlaps(&self) -> &[BodyId] {
        match &self.state {
            DragState::Dragging { overlaps, .. } => overlaps,
            DragState::Idle => &[],
        }
    }

    /// Starts dragging `body`, remembering where it is now.
    ///
    /// Returns `false` (and stays idle) for unknown or boundary bodies. A
    /// drag already in progress is ended first.
    pub fn begin(&mut self, world: &mut EditorWorld, body: BodyId) -> bool {
        if self.dragged().is_some() {
            self.end(world);
        }

        let Some(position) = world.position(body) else {
            return false;
        };
        let Some(entry) = world.body_mut(body) else {
            return false;
        };
        let Some(meta) = entry.meta_mut() else {
            return false;
        };
        meta.previous_position = position;
        entry.opacity = SELECTED_OPACITY;

        tracing::debug!(body, x = position.x, y = position.y, "drag started");
        self.state = DragState::Dragging {
            body,
            overlaps: Vec::new(),
        };
        true
    }

    /// Moves the dragged body to `target` (snapped when `snap_step` is
    /// active) and refreshes the overlap set.
    ///
    /// Returns the position actually applied, or `None` when idle.
    pub fn update(
        &mut self,
        world: &mut EditorWorld,
        target: Vec2,
        snap_step: Option<f32>,
    ) -> Option<Vec2> {
        let DragState::Dragging { body, overlaps } = &mut self.state else {
            return None;
        };
        let position = snap_point(target, snap_step);

        if !world.set_position(*body, position) {
            return None;
        }
        if let Some(meta) = world.body_mut(*body).and_then(|e| e.meta_mut()) {
            meta.initial_position = position;
        }
        *overlaps = overlapping(*body, world);

        Some(position)
    }

    /// Drops the dragged body.
    ///
    /// With a non-empty overlap set the body goes back to where the drag
    /// started. Returns `None` when nothing was being dragged.
    pub fn end(&mut self, world: &mut EditorWorld) -> Option<DropOutcome> {
        let DragState::Dragging { body, overlaps } = std::mem::take(&mut self.state) else {
            return None;
        };

        let mut revert_to = None;
        if let Some(entry) = world.body_mut(body) {
            entry.opacity = 1.0;
            if !overlaps.is_empty() {
                if let Some(meta) = entry.meta_mut() {
                    meta.initial_position = meta.previous_position;
                    revert_to = Some(meta.previous_position);
                }
            }
        }

        let outcome = match revert_to {
            Some(previous) => {
                world.set_position(body, previous);
                tracing::debug!(body, overlaps = overlaps.len(), "drop rejected, reverted");
                DropOutcome::Reverted
            }
            None => DropOutcome::Accepted,
        };
        Some(outcome)
    }

    /// Highlights the bodies overlapped by the dragged one.
    pub fn begin_frame(&mut self, world: &mut EditorWorld) {
        self.end_frame(world);
        self.highlighted = self.overlaps().to_vec();
        for &id in &self.highlighted {
            if let Some(entry) = world.body_mut(id) {
                entry.opacity = OVERLAP_OPACITY;
            }
        }
    }

    /// Clears exactly the highlight set by [`DragController::begin_frame`].
    pub fn end_frame(&mut self, world: &mut EditorWorld) {
        let dragged = self.dragged();
        for id in self.highlighted.drain(..) {
            if let Some(entry) = world.body_mut(id) {
                entry.opacity = if dragged == Some(id) {
                    SELECTED_OPACITY
                } else {
                    1.0
                };
            }
        }
    }
}
