//! Sketchbox Core Library
//!
//! Level editor logic on top of `Rapier2D`: pointer-to-world transforms,
//! camera clamping and fitting, body hit-testing and overlap queries, and
//! collision-aware drag-and-drop with grid snapping.
//!
//! Everything here is synchronous and single threaded. The host forwards
//! input events to an [`EditorSession`] and renders what it reports.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod body;
pub mod config;
pub mod drag;
pub mod editor;
pub mod geometry;
pub mod physics;
pub mod query;
pub mod state;
pub mod view;
pub mod viewport;
pub mod world;

pub use body::{BodyId, BodyMeta, BodyRole, GameMode, Shape, ShapeError, ShapeKind};
pub use config::{ConfigError, EditorConfig};
pub use drag::{DragController, DropOutcome, snap, snap_point};
pub use editor::{EditorSession, PointerEvent, RenderBody};
pub use geometry::{Bounds, BoundsDelta};
pub use physics::{PHYSICS_DT, PhysicsWorld, default_gravity};
pub use query::{all_editor_bodies, hit_test, overlapping};
pub use state::{
    BodyDescriptor, FileStorage, MemoryStorage, StateStorage, StorageError, load_state, make_state,
    save_state,
};
pub use view::{CameraView, screen_to_world, translate_vector};
pub use viewport::{EdgeFlags, clamp_viewport, fit_bounds, zoom_delta};
pub use world::{BodyEntry, EditorWorld};
