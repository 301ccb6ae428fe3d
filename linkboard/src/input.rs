use crate::model::{EdgeId, NodeId, VisualId};
use serde::{Deserialize, Serialize};

/// What the pointer was over when it went down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PointerTarget {
    Canvas,
    Node(NodeId),
    Edge(EdgeId),
}

impl From<VisualId> for PointerTarget {
    fn from(v: VisualId) -> Self {
        match v {
            VisualId::Node(n) => PointerTarget::Node(n),
            VisualId::Edge(e) => PointerTarget::Edge(e),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const CTRL: Modifiers = Modifiers { ctrl: true, shift: false, alt: false, meta: false };
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, target: PointerTarget },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    KeyDown { key: String, #[serde(default)] modifiers: Modifiers },
    /// Text committed by the label editing widget of a node.
    LabelInput { node: NodeId, text: String },
}

impl InputEvent {
    pub fn is_undo_chord(&self) -> bool {
        matches!(self, InputEvent::KeyDown { key, modifiers } if modifiers.ctrl && key.eq_ignore_ascii_case("z"))
    }
}
