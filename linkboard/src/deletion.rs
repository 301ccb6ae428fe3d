use crate::model::{Rect, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Square trash region anchored at a corner of the surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletionZone {
    pub corner: Corner,
    pub size: f32,
}

impl Default for DeletionZone {
    fn default() -> Self {
        DeletionZone { corner: Corner::TopLeft, size: 100.0 }
    }
}

/// Decides whether a dropped node lands in the trash.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeletionPolicy {
    zone: DeletionZone,
    surface: Rect,
}

impl DeletionPolicy {
    pub fn new(zone: DeletionZone, surface: Rect) -> Self {
        DeletionPolicy { zone, surface }
    }

    pub fn zone(&self) -> DeletionZone {
        self.zone
    }

    /// The zone as a rectangle on the surface, for drawing the trash marker.
    pub fn zone_rect(&self) -> Rect {
        let s = self.zone.size;
        let r = &self.surface;
        let (x, y) = match self.zone.corner {
            Corner::TopLeft => (r.x, r.y),
            Corner::TopRight => (r.right() - s, r.y),
            Corner::BottomLeft => (r.x, r.bottom() - s),
            Corner::BottomRight => (r.right() - s, r.bottom() - s),
        };
        Rect::new(x, y, s, s)
    }

    // The zone is open toward the outside of the surface: a node dragged past
    // the anchoring edges still counts as inside.
    pub fn should_delete(&self, p: Vec2) -> bool {
        let s = self.zone.size;
        let r = &self.surface;
        let in_x = match self.zone.corner {
            Corner::TopLeft | Corner::BottomLeft => p.x < r.x + s,
            Corner::TopRight | Corner::BottomRight => p.x > r.right() - s,
        };
        let in_y = match self.zone.corner {
            Corner::TopLeft | Corner::TopRight => p.y < r.y + s,
            Corner::BottomLeft | Corner::BottomRight => p.y > r.bottom() - s,
        };
        in_x && in_y
    }
}
