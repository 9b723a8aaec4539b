//! The editor's view of the physics world.
//!
//! `Rapier2D` owns the bodies; this module owns everything the editor knows
//! about them, keyed by a [`BodyId`] that stays valid for the body's
//! lifetime. The id is also written to the rapier body's `user_data` so a
//! handle found through the physics side can be traced back.

use glam::Vec2;
use rapier2d::prelude::RigidBodyHandle;

use crate::body::{BodyId, BodyMeta, BodyRole, GameMode, Shape, boundary_walls, preset_body};
use crate::physics::PhysicsWorld;

/// Editor-side record for one body.
#[derive(Debug, Clone)]
pub struct BodyEntry {
    pub id: BodyId,
    pub handle: RigidBodyHandle,
    pub shape: Shape,
    pub role: BodyRole,
    /// Render opacity, 1.0 when not highlighted.
    pub opacity: f32,
}

impl BodyEntry {
    /// Metadata if this body was placed in the editor.
    pub fn meta(&self) -> Option<&BodyMeta> {
        match &self.role {
            BodyRole::Editor(meta) => Some(meta),
            BodyRole::Boundary => None,
        }
    }

    pub fn meta_mut(&mut self) -> Option<&mut BodyMeta> {
        match &mut self.role {
            BodyRole::Editor(meta) => Some(meta),
            BodyRole::Boundary => None,
        }
    }

    pub fn is_editor_managed(&self) -> bool {
        matches!(self.role, BodyRole::Editor(_))
    }
}

/// Physics world plus the editor records of every body in it.
#[derive(Debug, Default)]
pub struct EditorWorld {
    physics: PhysicsWorld,
    /// Insertion order is the query order.
    entries: Vec<BodyEntry>,
    next_id: BodyId,
}

impl EditorWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a user body; rigidity depends on `mode`.
    pub fn spawn_editor_body(&mut self, shape: Shape, position: Vec2, mode: GameMode) -> BodyId {
        let id = self.insert(shape, position, mode, BodyRole::Editor(BodyMeta::at(position)));
        tracing::debug!(id, kind = ?shape.kind(), x = position.x, y = position.y, "spawned body");
        id
    }

    /// Adds a fixed, non-selectable body.
    pub fn spawn_boundary(&mut self, shape: Shape, position: Vec2) -> BodyId {
        self.insert(shape, position, GameMode::Editor, BodyRole::Boundary)
    }

    /// Adds the four walls framing a level.
    pub fn spawn_boundaries(&mut self, level: Vec2) -> Vec<BodyId> {
        boundary_walls(level)
            .into_iter()
            .map(|(shape, center)| self.spawn_boundary(shape, center))
            .collect()
    }

    fn insert(&mut self, shape: Shape, position: Vec2, mode: GameMode, role: BodyRole) -> BodyId {
        let id = self.next_id;
        self.next_id += 1;

        let (mut rigid_body, collider) = preset_body(&shape, position, mode);
        rigid_body.user_data = u128::from(id);
        let handle = self.physics.insert(rigid_body, collider);

        self.entries.push(BodyEntry {
            id,
            handle,
            shape,
            role,
            opacity: 1.0,
        });
        id
    }

    /// Removes every body. Ids keep increasing across clears.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        for entry in self.entries.drain(..) {
            self.physics.remove_rigid_body(entry.handle);
        }
        tracing::debug!(count, "cleared world");
    }

    /// All records in insertion order.
    pub fn bodies(&self) -> &[BodyEntry] {
        &self.entries
    }

    pub fn body(&self, id: BodyId) -> Option<&BodyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut BodyEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Current centre of a body as simulated.
    pub fn position(&self, id: BodyId) -> Option<Vec2> {
        self.body(id)
            .and_then(|entry| self.physics.translation(entry.handle))
    }

    /// Moves a body. Returns `false` if the id is unknown.
    pub fn set_position(&mut self, id: BodyId, position: Vec2) -> bool {
        let Some(handle) = self.body(id).map(|e| e.handle) else {
            return false;
        };
        self.physics.set_translation(handle, position)
    }

    /// Advances the simulation one fixed step.
    pub fn step(&mut self) {
        self.physics.step();
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{ShapeKind, preset_shape};

    fn spawn(world: &mut EditorWorld, kind: ShapeKind, x: f32, y: f32) -> BodyId {
        world.spawn_editor_body(preset_shape(kind), Vec2::new(x, y), GameMode::Editor)
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut world = EditorWorld::new();
        let a = spawn(&mut world, ShapeKind::Rectangle, 10.0, 10.0);
        let b = spawn(&mut world, ShapeKind::Circle, 90.0, 10.0);
        assert_ne!(a, b);

        assert_eq!(world.position(b), Some(Vec2::new(90.0, 10.0)));

        world.clear();
        let c = spawn(&mut world, ShapeKind::Circle, 0.0, 0.0);
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn test_user_data_carries_id() {
        let mut world = EditorWorld::new();
        world.spawn_boundary(preset_shape(ShapeKind::Rectangle), Vec2::ZERO);
        let id = spawn(&mut world, ShapeKind::Circle, 0.0, 0.0);
        let handle = world.body(id).unwrap().handle;
        let rigid_body = world.physics().get_rigid_body(handle).unwrap();
        assert_eq!(rigid_body.user_data, u128::from(id));
    }

    #[test]
    fn test_boundaries_are_not_editor_managed() {
        let mut world = EditorWorld::new();
        let walls = world.spawn_boundaries(Vec2::new(800.0, 600.0));
        assert_eq!(walls.len(), 4);
        assert!(world.bodies().iter().all(|b| !b.is_editor_managed()));
        assert!(world.body(walls[0]).unwrap().meta().is_none());
    }

    #[test]
    fn test_set_position_and_clear() {
        let mut world = EditorWorld::new();
        let id = spawn(&mut world, ShapeKind::Rectangle, 1.0, 2.0);
        assert!(world.set_position(id, Vec2::new(5.0, 6.0)));
        assert_eq!(world.position(id), Some(Vec2::new(5.0, 6.0)));

        world.clear();
        assert!(world.bodies().is_empty());
        assert!(!world.set_position(id, Vec2::ZERO));
        assert_eq!(world.physics().body_count(), 0);
    }
}
