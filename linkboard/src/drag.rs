use crate::deletion::DeletionPolicy;
use crate::error::{DragPhase, SceneError};
use crate::model::{NodeId, Vec2};
use crate::scene::Scene;
use crate::undo::UndoStack;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        node: NodeId,
        /// node position minus pointer position at grab time
        offset: Vec2,
    },
}

/// How a finished drag left its node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragOutcome {
    Kept(NodeId),
    Deleted(NodeId),
}

/// Tracks one node drag from grab to drop.
#[derive(Clone, Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        DragController::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragged_node(&self) -> Option<NodeId> {
        match self.state {
            DragState::Dragging { node, .. } => Some(node),
            DragState::Idle => None,
        }
    }

    /// Grab `node` under the pointer. Takes one undo snapshot for the whole
    /// drag before anything moves.
    pub fn begin(&mut self, scene: &Scene, undo: &mut UndoStack, node: NodeId, x: f32, y: f32) -> Result<(), SceneError> {
        if self.is_dragging() {
            return Err(SceneError::InvalidDragState { expected: DragPhase::Idle, found: DragPhase::Dragging });
        }
        let pointer = Vec2::new(x, y);
        if !pointer.is_finite() {
            return Err(SceneError::InvalidPosition { x, y });
        }
        let current = scene.node(node).ok_or(SceneError::UnknownNode(node))?.position;
        undo.snapshot(scene);
        self.state = DragState::Dragging { node, offset: current - pointer };
        log::debug!("drag mode activated for node {}", node);
        Ok(())
    }

    pub fn move_to(&mut self, scene: &mut Scene, x: f32, y: f32) -> Result<(), SceneError> {
        let DragState::Dragging { node, offset } = self.state else {
            return Err(SceneError::InvalidDragState { expected: DragPhase::Dragging, found: DragPhase::Idle });
        };
        log::trace!("drag node {} to pointer ({}, {})", node, x, y);
        scene.update_node_position(node, Vec2::new(x, y) + offset)
    }

    /// Drop the node at the pointer. Deletes it when it lands in the trash
    /// zone. The controller returns to idle even when the drop is rejected.
    pub fn end(&mut self, scene: &mut Scene, policy: &DeletionPolicy, x: f32, y: f32) -> Result<DragOutcome, SceneError> {
        let DragState::Dragging { node, offset } = self.state else {
            return Err(SceneError::InvalidDragState { expected: DragPhase::Dragging, found: DragPhase::Idle });
        };
        self.state = DragState::Idle;
        let pointer = Vec2::new(x, y);
        if !pointer.is_finite() {
            log::debug!("drag mode deactivated: rejected drop at ({}, {})", x, y);
            return Err(SceneError::InvalidPosition { x, y });
        }
        scene.update_node_position(node, pointer + offset)?;
        let last = scene.node(node).ok_or(SceneError::UnknownNode(node))?.position;
        let outcome = if policy.should_delete(last) {
            scene.delete_node(node)?;
            DragOutcome::Deleted(node)
        } else {
            DragOutcome::Kept(node)
        };
        log::debug!("drag mode deactivated: {:?}", outcome);
        Ok(outcome)
    }

    /// Forget any in-progress drag without touching the scene.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}
