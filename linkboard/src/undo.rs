use crate::scene::Scene;

/// Immutable copy of a scene taken before a structural mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot(Scene);

impl Snapshot {
    pub fn capture(scene: &Scene) -> Self {
        let mut copy = scene.clone();
        copy.clear_changes();
        Snapshot(copy)
    }

    pub fn scene(&self) -> &Scene {
        &self.0
    }

    pub fn into_scene(self) -> Scene {
        self.0
    }
}

/// Most-recent-last stack of snapshots, optionally capped in depth.
#[derive(Clone, Debug, Default)]
pub struct UndoStack {
    snapshots: Vec<Snapshot>,
    limit: Option<usize>,
}

impl UndoStack {
    pub fn new(limit: Option<usize>) -> Self {
        UndoStack { snapshots: Vec::new(), limit }
    }

    pub fn snapshot(&mut self, scene: &Scene) {
        self.snapshots.push(Snapshot::capture(scene));
        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let overflow = self.snapshots.len() - limit;
                self.snapshots.drain(0..overflow);
                log::warn!("undo stack over {} entries, dropped {} oldest", limit, overflow);
            }
        }
    }

    /// Pop the most recent snapshot. `None` means there is nothing to undo
    /// and the caller keeps its current scene.
    pub fn undo(&mut self) -> Option<Scene> {
        self.snapshots.pop().map(Snapshot::into_scene)
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rect, Vec2};

    fn scene_with(n: usize) -> Scene {
        let mut s = Scene::new(Rect::new(0.0, 0.0, 1000.0, 1000.0), Vec2::ZERO);
        for i in 0..n {
            s.create_node(Vec2::new(10.0 + i as f32 * 20.0, 300.0), format!("n{}", i)).unwrap();
        }
        s
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut live = scene_with(3);
        let mut stack = UndoStack::new(None);
        stack.snapshot(&live);
        let first = live.nodes().next().unwrap().id;
        live.update_node_position(first, Vec2::new(500.0, 500.0)).unwrap();
        live.set_node_label(first, "changed").unwrap();
        let saved = stack.peek().unwrap().scene().node(first).unwrap();
        assert_eq!(saved.position, Vec2::new(10.0, 300.0));
        assert_eq!(saved.label, "n0");
    }

    #[test]
    fn undo_pops_most_recent_first() {
        let mut live = scene_with(1);
        let mut stack = UndoStack::new(None);
        stack.snapshot(&live);
        live.create_node(Vec2::new(700.0, 700.0), "b").unwrap();
        stack.snapshot(&live);
        assert_eq!(stack.undo().unwrap().node_count(), 2);
        assert_eq!(stack.undo().unwrap().node_count(), 1);
        assert!(stack.undo().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn captured_snapshot_has_no_pending_changes() {
        let live = scene_with(2);
        assert!(!live.changes().is_empty());
        let snap = Snapshot::capture(&live);
        assert!(snap.scene().changes().is_empty());
    }

    #[test]
    fn depth_cap_drops_oldest() {
        let mut stack = UndoStack::new(Some(3));
        for n in 0..5 {
            stack.snapshot(&scene_with(n));
        }
        assert_eq!(stack.len(), 3);
        let counts: Vec<usize> = std::iter::from_fn(|| stack.undo()).map(|s| s.node_count()).collect();
        assert_eq!(counts, vec![4, 3, 2]);
    }
}
