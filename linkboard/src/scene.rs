use crate::error::SceneError;
use crate::geometry::limits::in_coord_bounds;
use crate::geometry::math::{angle_degrees, distance, seg_distance_sq};
use crate::model::{Edge, EdgeGeometry, EdgeId, Node, NodeId, Pick, Rect, Vec2};
use std::collections::{BTreeMap, BTreeSet};

/// What changed since the render layer last drained the scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeSet {
    pub nodes_added: BTreeSet<NodeId>,
    pub nodes_moved: BTreeSet<NodeId>,
    pub nodes_relabeled: BTreeSet<NodeId>,
    pub nodes_removed: BTreeSet<NodeId>,
    pub edges_added: BTreeSet<EdgeId>,
    pub edges_modified: BTreeSet<EdgeId>,
    pub edges_removed: BTreeSet<EdgeId>,
    /// The whole scene was replaced; per-item sets are meaningless.
    pub full: bool,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        !self.full
            && self.nodes_added.is_empty()
            && self.nodes_moved.is_empty()
            && self.nodes_relabeled.is_empty()
            && self.nodes_removed.is_empty()
            && self.edges_added.is_empty()
            && self.edges_modified.is_empty()
            && self.edges_removed.is_empty()
    }

    fn node_gone(&mut self, id: NodeId) {
        self.nodes_added.remove(&id);
        self.nodes_moved.remove(&id);
        self.nodes_relabeled.remove(&id);
        self.nodes_removed.insert(id);
    }

    fn edge_gone(&mut self, id: EdgeId) {
        self.edges_added.remove(&id);
        self.edges_modified.remove(&id);
        self.edges_removed.insert(id);
    }

    fn mark_full(&mut self) {
        *self = ChangeSet { full: true, ..Default::default() };
    }
}

/// The live set of nodes and edges.
///
/// The edge set is always complete over the node set: every unordered pair of
/// present nodes has exactly one edge, and every edge's geometry matches the
/// current positions of its endpoints.
#[derive(Clone, Debug)]
pub struct Scene {
    // ordered by id, which is also creation order
    nodes: BTreeMap<NodeId, Node>,
    // insertion order
    edges: Vec<Edge>,
    next_id: u32,
    bounds: Rect,
    edge_anchor: Vec2,
    changes: ChangeSet,
}

/// Scenes compare by content: nodes (ids, labels, positions) and edges
/// (ids, orientation, active flags, geometry). Pending changes and the id
/// counter are bookkeeping and do not take part.
impl PartialEq for Scene {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new(Rect::default(), Vec2::ZERO)
    }
}

fn geometry_between(nodes: &BTreeMap<NodeId, Node>, anchor: Vec2, a: NodeId, b: NodeId) -> Option<EdgeGeometry> {
    let start = nodes.get(&a)?.position + anchor;
    let end = nodes.get(&b)?.position + anchor;
    Some(EdgeGeometry {
        start,
        end,
        length: distance(start.x, start.y, end.x, end.y),
        angle: angle_degrees(start.x, start.y, end.x, end.y),
    })
}

impl Scene {
    pub fn new(bounds: Rect, edge_anchor: Vec2) -> Self {
        Scene {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            next_id: 0,
            bounds,
            edge_anchor,
            changes: ChangeSet::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Resize the surface. Existing nodes stay where they are even if they
    /// now fall outside.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Id the next created node will receive.
    pub fn next_node_id(&self) -> NodeId {
        NodeId(self.next_id)
    }

    // Nodes
    pub fn create_node(&mut self, position: Vec2, label: impl Into<String>) -> Result<NodeId, SceneError> {
        if !position.is_finite() || !self.bounds.contains(position) {
            return Err(SceneError::InvalidPosition { x: position.x, y: position.y });
        }
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let others: Vec<NodeId> = self.nodes.keys().copied().collect();
        self.nodes.insert(id, Node { id, label: label.into(), position });
        self.changes.nodes_added.insert(id);
        for other in others {
            // both ids are distinct and present, so the pair is valid
            if let Some(eid) = EdgeId::between(id, other) {
                self.edges.push(Edge { id: eid, a: id, b: other, active: false, geometry: EdgeGeometry::default() });
                self.changes.edges_added.insert(eid);
            }
        }
        self.recompute_all();
        log::debug!("created node {} at ({}, {}); {} edges", id, position.x, position.y, self.edges.len());
        Ok(id)
    }

    /// Move a node and refresh only the edges incident to it.
    pub fn update_node_position(&mut self, id: NodeId, position: Vec2) -> Result<(), SceneError> {
        if !in_coord_bounds(position.x) || !in_coord_bounds(position.y) {
            return Err(SceneError::InvalidPosition { x: position.x, y: position.y });
        }
        let node = self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))?;
        node.position = position;
        self.changes.nodes_moved.insert(id);
        for e in self.edges.iter_mut().filter(|e| e.id.touches(id)) {
            if let Some(g) = geometry_between(&self.nodes, self.edge_anchor, e.a, e.b) {
                e.geometry = g;
                self.changes.edges_modified.insert(e.id);
            }
        }
        Ok(())
    }

    pub fn set_node_label(&mut self, id: NodeId, label: impl Into<String>) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))?;
        node.label = label.into();
        self.changes.nodes_relabeled.insert(id);
        Ok(())
    }

    /// Remove a node together with every edge it is an endpoint of.
    pub fn delete_node(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.nodes.remove(&id).ok_or(SceneError::UnknownNode(id))?;
        self.changes.node_gone(id);
        let before = self.edges.len();
        let changes = &mut self.changes;
        self.edges.retain(|e| {
            if e.id.touches(id) {
                changes.edge_gone(e.id);
                false
            } else {
                true
            }
        });
        log::debug!("deleted node {} and {} incident edges", id, before - self.edges.len());
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // Edges
    /// Flip an edge's active flag and return the new value.
    pub fn toggle_edge(&mut self, id: EdgeId) -> Result<bool, SceneError> {
        let edge = self.edges.iter_mut().find(|e| e.id == id).ok_or(SceneError::UnknownEdge(id))?;
        edge.active = !edge.active;
        self.changes.edges_modified.insert(id);
        Ok(edge.active)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_of(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.id.touches(node))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn recompute_edge_geometry(&mut self, id: EdgeId) -> Result<(), SceneError> {
        let edge = self.edges.iter_mut().find(|e| e.id == id).ok_or(SceneError::UnknownEdge(id))?;
        if let Some(g) = geometry_between(&self.nodes, self.edge_anchor, edge.a, edge.b) {
            edge.geometry = g;
            self.changes.edges_modified.insert(id);
        }
        Ok(())
    }

    pub fn recompute_all(&mut self) {
        for e in self.edges.iter_mut() {
            if let Some(g) = geometry_between(&self.nodes, self.edge_anchor, e.a, e.b) {
                e.geometry = g;
            }
        }
    }

    /// Hit-test: closest node within `tol`, otherwise closest edge segment.
    pub fn pick(&self, x: f32, y: f32, tol: f32) -> Option<Pick> {
        let tol2 = tol * tol;
        let mut best_node: Option<(NodeId, f32)> = None;
        for n in self.nodes.values() {
            let dx = n.position.x - x; let dy = n.position.y - y;
            let d2 = dx*dx + dy*dy;
            if d2 <= tol2 && best_node.map_or(true, |(_, bd)| d2 < bd) {
                best_node = Some((n.id, d2));
            }
        }
        if let Some((id, d2)) = best_node {
            return Some(Pick::Node { id, dist: d2.sqrt() });
        }
        let mut best_edge: Option<(EdgeId, f32, f32)> = None;
        for e in &self.edges {
            let g = &e.geometry;
            let (d2, t) = seg_distance_sq(x, y, g.start.x, g.start.y, g.end.x, g.end.y);
            if d2 <= tol2 && best_edge.map_or(true, |(_, bd, _)| d2 < bd) {
                best_edge = Some((e.id, d2, t));
            }
        }
        best_edge.map(|(id, d2, t)| Pick::Edge { id, t, dist: d2.sqrt() })
    }

    // Change tracking
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn take_changes(&mut self) -> ChangeSet {
        std::mem::take(&mut self.changes)
    }

    /// Prepare a restored snapshot to become the live scene: keep the id
    /// counter from `live` so ids are never reused, and flag a full redraw.
    pub(crate) fn adopt_from(&mut self, live: &Scene) {
        self.next_id = self.next_id.max(live.next_id);
        self.bounds = live.bounds;
        self.changes.mark_full();
    }

    pub(crate) fn clear_changes(&mut self) {
        self.changes = ChangeSet::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tolerance::{approx_eq, EPS_LEN};

    fn scene() -> Scene {
        Scene::new(Rect::new(0.0, 0.0, 1000.0, 1000.0), Vec2::ZERO)
    }

    #[test]
    fn create_connects_to_existing_nodes_in_creation_order() {
        let mut s = scene();
        let a = s.create_node(Vec2::new(10.0, 10.0), "a").unwrap();
        let b = s.create_node(Vec2::new(20.0, 10.0), "b").unwrap();
        let c = s.create_node(Vec2::new(20.0, 30.0), "c").unwrap();
        let ids: Vec<EdgeId> = s.edges().iter().map(|e| e.id).collect();
        assert_eq!(
            ids,
            vec![
                EdgeId::between(b, a).unwrap(),
                EdgeId::between(c, a).unwrap(),
                EdgeId::between(c, b).unwrap(),
            ]
        );
        assert!(s.edges().iter().all(|e| !e.active));
        let cb = s.edge(EdgeId::between(b, c).unwrap()).unwrap();
        assert_eq!((cb.a, cb.b), (c, b));
        assert!(approx_eq(cb.geometry.length, 20.0, EPS_LEN));
        assert!(approx_eq(cb.geometry.angle, -90.0, 1e-3));
    }

    #[test]
    fn create_outside_bounds_fails_without_side_effects() {
        let mut s = scene();
        let err = s.create_node(Vec2::new(-1.0, 5.0), "x").unwrap_err();
        assert_eq!(err, SceneError::InvalidPosition { x: -1.0, y: 5.0 });
        assert!(s.create_node(Vec2::new(f32::NAN, 5.0), "x").is_err());
        assert!(s.create_node(Vec2::new(1000.0, 5.0), "x").is_err());
        assert_eq!(s.node_count(), 0);
        assert_eq!(s.next_node_id(), NodeId(0));
        assert!(s.changes().is_empty());
    }

    #[test]
    fn moving_a_node_refreshes_only_incident_edges() {
        let mut s = scene();
        let a = s.create_node(Vec2::new(0.0, 0.0), "a").unwrap();
        let b = s.create_node(Vec2::new(100.0, 0.0), "b").unwrap();
        let c = s.create_node(Vec2::new(0.0, 100.0), "c").unwrap();
        s.take_changes();
        s.update_node_position(c, Vec2::new(100.0, 100.0)).unwrap();
        let ch = s.take_changes();
        assert_eq!(ch.nodes_moved.into_iter().collect::<Vec<_>>(), vec![c]);
        assert_eq!(ch.edges_modified.len(), 2);
        assert!(!ch.edges_modified.contains(&EdgeId::between(a, b).unwrap()));
        let bc = s.edge(EdgeId::between(b, c).unwrap()).unwrap();
        assert!(approx_eq(bc.geometry.length, 100.0, EPS_LEN));
        assert!(approx_eq(bc.geometry.angle, -90.0, 1e-3));
    }

    #[test]
    fn recompute_refreshes_stale_geometry() {
        let mut s = scene();
        let a = s.create_node(Vec2::new(0.0, 0.0), "a").unwrap();
        let b = s.create_node(Vec2::new(30.0, 40.0), "b").unwrap();
        let e = EdgeId::between(a, b).unwrap();
        s.edges.iter_mut().for_each(|edge| edge.geometry = EdgeGeometry::default());
        s.take_changes();
        s.recompute_edge_geometry(e).unwrap();
        let edge = s.edge(e).unwrap();
        let (from, to) = (s.node(edge.a).unwrap().position, s.node(edge.b).unwrap().position);
        assert_eq!((edge.geometry.start, edge.geometry.end), (from, to));
        assert!(approx_eq(edge.geometry.length, 50.0, EPS_LEN));
        assert!(approx_eq(edge.geometry.angle, angle_degrees(from.x, from.y, to.x, to.y), 1e-3));
        assert!(s.take_changes().edges_modified.contains(&e));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut s = scene();
        let ghost = NodeId(42);
        assert_eq!(s.update_node_position(ghost, Vec2::ZERO), Err(SceneError::UnknownNode(ghost)));
        assert_eq!(s.delete_node(ghost), Err(SceneError::UnknownNode(ghost)));
        assert_eq!(s.set_node_label(ghost, "x"), Err(SceneError::UnknownNode(ghost)));
        let e = EdgeId::between(NodeId(1), NodeId(2)).unwrap();
        assert_eq!(s.toggle_edge(e), Err(SceneError::UnknownEdge(e)));
        assert_eq!(s.recompute_edge_geometry(e), Err(SceneError::UnknownEdge(e)));
    }

    #[test]
    fn delete_cascades_to_incident_edges_only() {
        let mut s = scene();
        let a = s.create_node(Vec2::new(10.0, 10.0), "A").unwrap();
        let b = s.create_node(Vec2::new(50.0, 10.0), "B").unwrap();
        let c = s.create_node(Vec2::new(10.0, 50.0), "C").unwrap();
        assert_eq!(s.edge_count(), 3);
        s.delete_node(b).unwrap();
        assert_eq!(s.nodes().map(|n| n.id).collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(s.edges().iter().map(|e| e.id).collect::<Vec<_>>(), vec![EdgeId::between(a, c).unwrap()]);
        let next = s.create_node(Vec2::new(30.0, 30.0), "D").unwrap();
        assert_eq!(next, NodeId(3), "ids are never reused");
    }

    #[test]
    fn removal_in_same_batch_cancels_pending_add() {
        let mut s = scene();
        let a = s.create_node(Vec2::new(10.0, 10.0), "A").unwrap();
        let b = s.create_node(Vec2::new(50.0, 10.0), "B").unwrap();
        s.delete_node(b).unwrap();
        let ch = s.take_changes();
        assert!(ch.nodes_added.contains(&a));
        assert!(!ch.nodes_added.contains(&b));
        assert!(ch.nodes_removed.contains(&b));
        assert!(ch.edges_added.is_empty());
        assert_eq!(ch.edges_removed.len(), 1);
    }

    #[test]
    fn toggle_flips_active_without_touching_geometry() {
        let mut s = scene();
        let a = s.create_node(Vec2::new(10.0, 10.0), "A").unwrap();
        let b = s.create_node(Vec2::new(50.0, 10.0), "B").unwrap();
        let e = EdgeId::between(a, b).unwrap();
        let before = s.edge(e).unwrap().geometry;
        assert_eq!(s.toggle_edge(e), Ok(true));
        assert_eq!(s.toggle_edge(e), Ok(false));
        assert_eq!(s.edge(e).unwrap().geometry, before);
    }

    #[test]
    fn edge_anchor_offsets_endpoints_but_not_length() {
        let mut s = Scene::new(Rect::new(0.0, 0.0, 500.0, 500.0), Vec2::new(20.0, 8.0));
        let a = s.create_node(Vec2::new(0.0, 0.0), "A").unwrap();
        let b = s.create_node(Vec2::new(30.0, 40.0), "B").unwrap();
        let g = s.edge(EdgeId::between(a, b).unwrap()).unwrap().geometry;
        assert_eq!(g.start, Vec2::new(50.0, 48.0));
        assert_eq!(g.end, Vec2::new(20.0, 8.0));
        assert!(approx_eq(g.length, 50.0, EPS_LEN));
    }

    #[test]
    fn pick_prefers_nodes_then_edges() {
        let mut s = scene();
        let a = s.create_node(Vec2::new(100.0, 100.0), "A").unwrap();
        let b = s.create_node(Vec2::new(200.0, 100.0), "B").unwrap();
        assert!(matches!(s.pick(102.0, 98.0, 10.0), Some(Pick::Node { id, .. }) if id == a));
        match s.pick(150.0, 103.0, 5.0) {
            Some(Pick::Edge { id, t, dist }) => {
                assert_eq!(id, EdgeId::between(a, b).unwrap());
                assert!(approx_eq(t, 0.5, 1e-3));
                assert!(approx_eq(dist, 3.0, 1e-3));
            }
            other => panic!("expected edge pick, got {:?}", other),
        }
        assert_eq!(s.pick(150.0, 300.0, 5.0), None);
    }
}
