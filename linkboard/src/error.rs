use crate::model::{EdgeId, NodeId};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

impl std::fmt::Display for DragPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DragPhase::Idle => "idle",
            DragPhase::Dragging => "dragging",
        })
    }
}

/// Precondition violations raised by scene and drag operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SceneError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),
    #[error("drag controller is {found}, expected {expected}")]
    InvalidDragState { expected: DragPhase, found: DragPhase },
    #[error("position ({x}, {y}) is outside the surface")]
    InvalidPosition { x: f32, y: f32 },
}

impl SceneError {
    /// Stable machine-readable code, used by the browser bindings.
    pub fn code(&self) -> &'static str {
        match self {
            SceneError::UnknownNode(_) => "unknown_node",
            SceneError::UnknownEdge(_) => "unknown_edge",
            SceneError::InvalidDragState { .. } => "invalid_drag_state",
            SceneError::InvalidPosition { .. } => "invalid_position",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field '{field}' must be finite and positive, got {got}")]
    NonPositive { field: &'static str, got: f32 },
    #[error("config field '{field}' must be finite, got {got}")]
    NonFinite { field: &'static str, got: f32 },
    #[error("config field 'undo_limit' must be at least 1, or null for unbounded")]
    ZeroUndoLimit,
}
