//! Queries over the editor-managed bodies of a world.
//!
//! Boundary bodies never show up here. Results follow the world's insertion
//! order; no z-order is imposed on top of it.

use glam::Vec2;

use crate::body::BodyId;
use crate::world::{BodyEntry, EditorWorld};

/// Editor-managed bodies, minus any whose id is in `exclude`.
pub fn all_editor_bodies<'a>(world: &'a EditorWorld, exclude: &[BodyId]) -> Vec<&'a BodyEntry> {
    world
        .bodies()
        .iter()
        .filter(|entry| entry.is_editor_managed() && !exclude.contains(&entry.id))
        .collect()
}

/// First editor body whose shape contains `point`.
pub fn hit_test(world: &EditorWorld, point: Vec2) -> Option<BodyId> {
    all_editor_bodies(world, &[])
        .into_iter()
        .find(|entry| {
            world
                .position(entry.id)
                .is_some_and(|center| entry.shape.contains_point(center, point))
        })
        .map(|entry| entry.id)
}

/// Other editor bodies currently overlapping `body`.
///
/// Never contains `body` itself. Empty when `body` is unknown.
pub fn overlapping(body: BodyId, world: &EditorWorld) -> Vec<BodyId> {
    let (Some(entry), Some(center)) = (world.body(body), world.position(body)) else {
        return Vec::new();
    };

    all_editor_bodies(world, &[body])
        .into_iter()
        .filter(|other| {
            world
                .position(other.id)
                .is_some_and(|other_center| {
                    entry.shape.intersects(center, &other.shape, other_center)
                })
        })
        .map(|other| other.id)
        .collect()
}
