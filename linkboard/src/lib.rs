//! Scene-graph core of a point-and-edge diagram editor.
//!
//! Users place labeled nodes; every new node is connected to every existing
//! one, so the edge set is always the complete graph on the node set. Nodes
//! can be dragged (edges follow), dropped in a trash zone to delete them, and
//! every structural change can be undone from a snapshot stack.

pub mod config;
pub mod deletion;
pub mod drag;
pub mod editor;
pub mod error;
pub mod input;
pub mod model;
pub mod render;
pub mod scene;
pub mod undo;
pub mod geometry {
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}

pub use config::EditorConfig;
pub use deletion::{Corner, DeletionPolicy, DeletionZone};
pub use drag::{DragController, DragOutcome, DragState};
pub use editor::{Editor, Effect};
pub use error::{ConfigError, DragPhase, SceneError};
pub use geometry::math::{angle_degrees, distance};
pub use input::{InputEvent, Modifiers, PointerTarget};
pub use model::{Edge, EdgeGeometry, EdgeId, Node, NodeId, Pick, Rect, Vec2, VisualId};
pub use render::{CommandBuffer, DrawCommand, Renderer, Surface};
pub use scene::{ChangeSet, Scene};
pub use undo::{Snapshot, UndoStack};
