//! Editor session: routes pointer, wheel and key input to the camera, the
//! drag controller and the world, and switches between editor and runtime.
//!
//! The host owns the event loop and the canvas; it forwards raw events here
//! and calls [`EditorSession::begin_frame`] / [`EditorSession::end_frame`]
//! around every frame it renders.

use glam::Vec2;

use crate::body::{BodyId, GameMode, Shape, ShapeKind, preset_shape};
use crate::config::EditorConfig;
use crate::drag::{DragController, DropOutcome, snap_point};
use crate::geometry::{Bounds, BoundsDelta};
use crate::query::hit_test;
use crate::state::{BodyDescriptor, StateStorage, load_state, make_state, save_state};
use crate::view::{CameraView, screen_to_world, translate_vector};
use crate::viewport::{clamp_viewport, fit_bounds, zoom_delta};
use crate::world::EditorWorld;

/// A pointer event as reported by the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// Pointer position relative to the page.
    pub client: Vec2,
    /// Movement since the previous event, in pixels.
    pub movement: Vec2,
    /// Whether Shift is held (enables grid snapping).
    pub shift: bool,
}

impl PointerEvent {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            client: Vec2::new(x, y),
            ..Default::default()
        }
    }

    pub fn moved_by(mut self, dx: f32, dy: f32) -> Self {
        self.movement = Vec2::new(dx, dy);
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// What the renderer needs to draw one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderBody {
    pub id: BodyId,
    pub shape: Shape,
    pub position: Vec2,
    pub opacity: f32,
    pub boundary: bool,
}

/// One editor instance.
pub struct EditorSession {
    config: EditorConfig,
    mode: GameMode,
    camera: Bounds,
    canvas_origin: Vec2,
    world: EditorWorld,
    state: Vec<BodyDescriptor>,
    drag: DragController,
    panning: bool,
    mouse: Vec2,
    storage: Box<dyn StateStorage>,
}

impl EditorSession {
    /// Creates an empty level in editor mode.
    pub fn new(config: EditorConfig, storage: Box<dyn StateStorage>) -> Self {
        let camera = Bounds::from_size(config.canvas_size());
        let mut session = Self {
            config,
            mode: GameMode::Editor,
            camera,
            canvas_origin: Vec2::ZERO,
            world: EditorWorld::new(),
            state: Vec::new(),
            drag: DragController::new(),
            panning: false,
            mouse: Vec2::ZERO,
            storage,
        };
        session.init(GameMode::Editor, Vec::new());
        session
    }

    /// Rebuilds the world from `state` in `mode` and refits the camera.
    ///
    /// Descriptors with invalid shape parameters are dropped.
    pub fn init(&mut self, mode: GameMode, state: Vec<BodyDescriptor>) {
        self.drag = DragController::new();
        self.panning = false;
        self.mode = mode;
        self.world.clear();
        self.world.spawn_boundaries(self.config.level_size());

        let mut kept = Vec::with_capacity(state.len());
        for descriptor in state {
            match Shape::from_params(descriptor.shape_kind, &descriptor.constructor_params) {
                Ok(shape) => {
                    self.world
                        .spawn_editor_body(shape, descriptor.initial_position, mode);
                    kept.push(descriptor);
                }
                Err(e) => tracing::warn!("skipping stored body: {e}"),
            }
        }
        self.state = kept;
        self.camera = fit_bounds(self.config.level_size(), self.config.canvas_size());

        tracing::info!(?mode, bodies = self.state.len(), "level initialised");
    }

    /// Where the canvas sits on the page.
    pub fn set_canvas_origin(&mut self, origin: Vec2) {
        self.canvas_origin = origin;
    }

    /// Replaces the camera bounds, e.g. after a host-side resize.
    pub fn set_camera(&mut self, bounds: Bounds) {
        self.camera = bounds;
    }

    pub fn camera_view(&self) -> CameraView {
        CameraView::new(self.camera, self.config.canvas_size())
    }

    fn to_world(&self, event: &PointerEvent) -> Vec2 {
        screen_to_world(event.client, self.canvas_origin, Some(&self.camera_view()))
    }

    fn snap_step(&self, shift: bool) -> Option<f32> {
        shift.then_some(self.config.snap_step)
    }

    /// Selects the body under the pointer, or starts panning.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        let point = self.to_world(event);
        self.mouse = point;

        let target = match self.mode {
            GameMode::Editor => hit_test(&self.world, point),
            GameMode::Runtime => None,
        };
        let selected = target.is_some_and(|body| self.drag.begin(&mut self.world, body));
        if !selected {
            self.panning = true;
        }
    }

    /// Pans the camera or moves the dragged body.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        self.mouse = self.to_world(event);

        if self.panning {
            let delta = translate_vector(-event.movement, Some(&self.camera_view()));
            self.camera = clamp_viewport(
                &BoundsDelta::translation(delta),
                &self.camera,
                self.config.level_size(),
            );
        }

        if self.mode == GameMode::Editor && self.drag.dragged().is_some() {
            let step = self.snap_step(event.shift);
            self.drag.update(&mut self.world, self.mouse, step);
            self.state = make_state(&self.world);
        }
    }

    /// Drops the dragged body and stops panning.
    pub fn pointer_up(&mut self) -> Option<DropOutcome> {
        self.panning = false;
        let outcome = self.drag.end(&mut self.world);
        if outcome.is_some() {
            self.state = make_state(&self.world);
        }
        outcome
    }

    /// Same as releasing the pointer.
    pub fn pointer_leave(&mut self) -> Option<DropOutcome> {
        self.pointer_up()
    }

    /// Zooms out for positive `delta_y`, in for negative.
    pub fn wheel(&mut self, delta_y: f32) {
        self.camera = self
            .camera
            .apply(&zoom_delta(delta_y, self.config.zoom_velocity));
    }

    /// Keyboard commands: `b`/`c` place a rectangle/circle under the pointer,
    /// `e`/`r` switch to editor/runtime mode.
    pub fn key_up(&mut self, key: &str, shift: bool) {
        match key.to_lowercase().as_str() {
            "b" => {
                self.add_body(ShapeKind::Rectangle, self.mouse, shift);
            }
            "c" => {
                self.add_body(ShapeKind::Circle, self.mouse, shift);
            }
            "e" => self.init(GameMode::Editor, self.state.clone()),
            "r" => self.init(GameMode::Runtime, self.state.clone()),
            _ => {}
        }
    }

    /// Places a preset body at `at`, snapped when `shift` is held.
    /// Does nothing at runtime.
    pub fn add_body(&mut self, kind: ShapeKind, at: Vec2, shift: bool) -> Option<BodyId> {
        if self.mode == GameMode::Runtime {
            return None;
        }
        let position = snap_point(at, self.snap_step(shift));
        let id = self
            .world
            .spawn_editor_body(preset_shape(kind), position, self.mode);
        self.state = make_state(&self.world);
        Some(id)
    }

    /// Removes every placed body, keeping the level walls.
    pub fn delete_all(&mut self) {
        if self.mode == GameMode::Runtime {
            return;
        }
        self.state.clear();
        self.init(self.mode, Vec::new());
    }

    /// Writes the current state. Only allowed in editor mode.
    pub fn save(&mut self) -> bool {
        if self.mode != GameMode::Editor {
            return false;
        }
        save_state(self.storage.as_mut(), &self.state)
    }

    /// Replaces the level with the stored state, staying in the current mode.
    pub fn reload(&mut self) {
        let state = load_state(self.storage.as_ref());
        self.init(self.mode, state);
    }

    /// Advances the simulation one step.
    pub fn tick(&mut self) {
        self.world.step();
    }

    /// Applies the per-frame overlap highlight.
    pub fn begin_frame(&mut self) {
        self.drag.begin_frame(&mut self.world);
    }

    /// Removes the per-frame overlap highlight.
    pub fn end_frame(&mut self) {
        self.drag.end_frame(&mut self.world);
    }

    /// Every body with its current position and opacity.
    pub fn render_bodies(&self) -> Vec<RenderBody> {
        self.world
            .bodies()
            .iter()
            .filter_map(|entry| {
                self.world.position(entry.id).map(|position| RenderBody {
                    id: entry.id,
                    shape: entry.shape,
                    position,
                    opacity: entry.opacity,
                    boundary: !entry.is_editor_managed(),
                })
            })
            .collect()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn camera(&self) -> Bounds {
        self.camera
    }

    pub fn state(&self) -> &[BodyDescriptor] {
        &self.state
    }

    pub fn world(&self) -> &EditorWorld {
        &self.world
    }

    /// Last pointer position in world coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    pub fn dragged(&self) -> Option<BodyId> {
        self.drag.dragged()
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }
}
