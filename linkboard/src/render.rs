use crate::model::{Edge, EdgeId, Node, NodeId, VisualId};
use crate::scene::{ChangeSet, Scene};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Output surface that accepts draw commands.
pub trait Surface {
    fn draw_node(&mut self, id: VisualId, x: f32, y: f32, label: &str);
    fn draw_edge(&mut self, id: VisualId, x1: f32, y1: f32, length: f32, angle: f32, active: bool);
    fn remove_visual(&mut self, id: VisualId);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    DrawNode { id: VisualId, x: f32, y: f32, label: String },
    DrawEdge { id: VisualId, x1: f32, y1: f32, length: f32, angle: f32, active: bool },
    RemoveVisual { id: VisualId },
}

/// Surface that records commands for a host to replay.
#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        CommandBuffer::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for CommandBuffer {
    fn draw_node(&mut self, id: VisualId, x: f32, y: f32, label: &str) {
        self.commands.push(DrawCommand::DrawNode { id, x, y, label: label.to_string() });
    }
    fn draw_edge(&mut self, id: VisualId, x1: f32, y1: f32, length: f32, angle: f32, active: bool) {
        self.commands.push(DrawCommand::DrawEdge { id, x1, y1, length, angle, active });
    }
    fn remove_visual(&mut self, id: VisualId) {
        self.commands.push(DrawCommand::RemoveVisual { id });
    }
}

/// Keeps a surface in step with a scene by replaying change sets.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    drawn: BTreeSet<VisualId>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer::default()
    }

    pub fn drawn(&self) -> &BTreeSet<VisualId> {
        &self.drawn
    }

    pub fn reconcile(&mut self, scene: &Scene, changes: &ChangeSet, surface: &mut dyn Surface) {
        if changes.full {
            self.redraw(scene, surface);
            return;
        }
        for id in &changes.edges_removed {
            self.remove(VisualId::Edge(*id), surface);
        }
        for id in &changes.nodes_removed {
            self.remove(VisualId::Node(*id), surface);
        }
        let nodes: BTreeSet<NodeId> = changes
            .nodes_added
            .iter()
            .chain(&changes.nodes_moved)
            .chain(&changes.nodes_relabeled)
            .copied()
            .collect();
        for id in nodes {
            if let Some(n) = scene.node(id) {
                self.node(n, surface);
            }
        }
        let edges: BTreeSet<EdgeId> = changes.edges_added.iter().chain(&changes.edges_modified).copied().collect();
        // keep scene insertion order for stacking
        for e in scene.edges().iter().filter(|e| edges.contains(&e.id)) {
            self.edge(e, surface);
        }
    }

    /// Remove every stale visual and draw the whole scene again.
    pub fn redraw(&mut self, scene: &Scene, surface: &mut dyn Surface) {
        let live: BTreeSet<VisualId> = scene
            .nodes()
            .map(|n| VisualId::Node(n.id))
            .chain(scene.edges().iter().map(|e| VisualId::Edge(e.id)))
            .collect();
        let stale: Vec<VisualId> = self.drawn.difference(&live).copied().collect();
        for id in stale {
            self.remove(id, surface);
        }
        for n in scene.nodes() {
            self.node(n, surface);
        }
        for e in scene.edges() {
            self.edge(e, surface);
        }
    }

    fn remove(&mut self, id: VisualId, surface: &mut dyn Surface) {
        if self.drawn.remove(&id) {
            surface.remove_visual(id);
        }
    }

    fn node(&mut self, n: &Node, surface: &mut dyn Surface) {
        let id = VisualId::Node(n.id);
        surface.draw_node(id, n.position.x, n.position.y, &n.label);
        self.drawn.insert(id);
    }

    fn edge(&mut self, e: &Edge, surface: &mut dyn Surface) {
        let id = VisualId::Edge(e.id);
        let g = &e.geometry;
        surface.draw_edge(id, g.start.x, g.start.y, g.length, g.angle, e.active);
        self.drawn.insert(id);
    }
}
