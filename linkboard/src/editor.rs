use crate::config::EditorConfig;
use crate::deletion::DeletionPolicy;
use crate::drag::{DragController, DragOutcome, DragState};
use crate::error::{ConfigError, SceneError};
use crate::input::{InputEvent, PointerTarget};
use crate::model::{EdgeId, NodeId, Rect, Vec2};
use crate::render::{Renderer, Surface};
use crate::scene::Scene;
use crate::undo::UndoStack;
use serde::Serialize;

/// Observable result of one editor action.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "effect", content = "data", rename_all = "snake_case")]
pub enum Effect {
    None,
    NodeCreated(NodeId),
    DragStarted(NodeId),
    NodeMoved(NodeId),
    DragEnded(DragOutcome),
    EdgeToggled { edge: EdgeId, active: bool },
    LabelEdited(NodeId),
    Undone,
    NothingToUndo,
}

/// Owns the live scene and everything that mutates it. One instance per
/// editing session; input is applied strictly in arrival order.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    scene: Scene,
    undo: UndoStack,
    drag: DragController,
    policy: DeletionPolicy,
    renderer: Renderer,
    press: Option<PointerTarget>,
    label_session: Option<NodeId>,
}

impl Default for Editor {
    fn default() -> Self {
        Editor::build(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Editor::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        Editor {
            scene: Scene::new(config.surface, config.edge_anchor),
            undo: UndoStack::new(config.undo_limit),
            drag: DragController::new(),
            policy: DeletionPolicy::new(config.deletion_zone, config.surface),
            renderer: Renderer::new(),
            press: None,
            label_session: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// The trash marker is only shown while a node is being dragged.
    pub fn trash_visible(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn trash_rect(&self) -> Rect {
        self.policy.zone_rect()
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), SceneError> {
        let mut surface = self.config.surface;
        surface.width = width;
        surface.height = height;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(SceneError::InvalidPosition { x: width, y: height });
        }
        self.config.surface = surface;
        self.scene.set_bounds(surface);
        self.policy = DeletionPolicy::new(self.config.deletion_zone, surface);
        Ok(())
    }

    pub fn default_label(&self) -> String {
        format!("{} {}", self.config.label_prefix, self.scene.next_node_id().0 + 1)
    }

    // Structural mutations: each takes exactly one snapshot first.
    pub fn create_node(&mut self, x: f32, y: f32, label: Option<String>) -> Result<NodeId, SceneError> {
        let p = Vec2::new(x, y);
        if !p.is_finite() || !self.scene.bounds().contains(p) {
            return Err(SceneError::InvalidPosition { x, y });
        }
        let label = label.unwrap_or_else(|| self.default_label());
        self.label_session = None;
        self.undo.snapshot(&self.scene);
        self.scene.create_node(p, label)
    }

    pub fn begin_drag(&mut self, node: NodeId, x: f32, y: f32) -> Result<(), SceneError> {
        self.drag.begin(&self.scene, &mut self.undo, node, x, y)?;
        self.label_session = None;
        Ok(())
    }

    pub fn drag_to(&mut self, x: f32, y: f32) -> Result<(), SceneError> {
        self.drag.move_to(&mut self.scene, x, y)
    }

    pub fn end_drag(&mut self, x: f32, y: f32) -> Result<DragOutcome, SceneError> {
        self.drag.end(&mut self.scene, &self.policy, x, y)
    }

    /// Edge activation is not a structural change and takes no snapshot.
    pub fn toggle_edge(&mut self, edge: EdgeId) -> Result<bool, SceneError> {
        self.scene.toggle_edge(edge)
    }

    /// Consecutive edits of the same node's label share one snapshot.
    pub fn edit_label(&mut self, node: NodeId, text: impl Into<String>) -> Result<(), SceneError> {
        if self.scene.node(node).is_none() {
            return Err(SceneError::UnknownNode(node));
        }
        if self.label_session != Some(node) {
            self.undo.snapshot(&self.scene);
            self.label_session = Some(node);
        }
        self.scene.set_node_label(node, text)
    }

    /// Restore the most recent snapshot. Returns `false` when there was
    /// nothing to undo; the scene is then left as it was.
    pub fn undo(&mut self) -> bool {
        let Some(mut restored) = self.undo.undo() else {
            log::debug!("nothing to undo");
            return false;
        };
        restored.adopt_from(&self.scene);
        self.scene = restored;
        self.drag.reset();
        self.press = None;
        self.label_session = None;
        log::debug!("undo: restored {} nodes, {} left on stack", self.scene.node_count(), self.undo.len());
        true
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<Effect, SceneError> {
        if event.is_undo_chord() {
            return Ok(if self.undo() { Effect::Undone } else { Effect::NothingToUndo });
        }
        match event {
            InputEvent::PointerDown { x, y, target } => {
                // Recorded even when the press below fails, so its release is
                // not taken for a canvas click. Scene, undo and drag state
                // stay untouched on that path.
                self.press = Some(target);
                match target {
                    PointerTarget::Node(n) => {
                        self.begin_drag(n, x, y)?;
                        Ok(Effect::DragStarted(n))
                    }
                    PointerTarget::Edge(e) => {
                        let active = self.toggle_edge(e)?;
                        Ok(Effect::EdgeToggled { edge: e, active })
                    }
                    PointerTarget::Canvas => Ok(Effect::None),
                }
            }
            InputEvent::PointerMove { x, y } => match self.drag.dragged_node() {
                Some(n) => {
                    self.drag_to(x, y)?;
                    Ok(Effect::NodeMoved(n))
                }
                None => Ok(Effect::None),
            },
            InputEvent::PointerUp { x, y } => {
                let press = self.press.take();
                if self.drag.is_dragging() {
                    return self.end_drag(x, y).map(Effect::DragEnded);
                }
                match press {
                    None | Some(PointerTarget::Canvas) => self.create_node(x, y, None).map(Effect::NodeCreated),
                    Some(_) => Ok(Effect::None),
                }
            }
            InputEvent::LabelInput { node, text } => {
                self.edit_label(node, text)?;
                Ok(Effect::LabelEdited(node))
            }
            InputEvent::KeyDown { .. } => Ok(Effect::None),
        }
    }

    /// Push pending scene changes to `surface`.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        let changes = self.scene.take_changes();
        if !changes.is_empty() {
            self.renderer.reconcile(&self.scene, &changes, surface);
        }
    }

    /// Draw the full scene regardless of pending changes, e.g. for a newly
    /// attached surface.
    pub fn render_all(&mut self, surface: &mut dyn Surface) {
        self.scene.take_changes();
        self.renderer.redraw(&self.scene, surface);
    }
}
