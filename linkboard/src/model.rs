use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x + o.x, self.y + o.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x - o.x, self.y - o.y)
    }
}

/// Axis-aligned rectangle in surface coordinates. Contains its left/top edge
/// and excludes its right/bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::new(0.0, 0.0, 1280.0, 720.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an undirected edge: the endpoint pair in canonical order.
///
/// Deserializes from either an endpoint pair (in any order) or the edge's
/// visual id text (`"edge-0-1"`); self-pairs are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "EdgeIdRepr")]
pub struct EdgeId {
    lo: NodeId,
    hi: NodeId,
}

impl EdgeId {
    /// Edge identity for the pair `{a, b}`; `None` for a self-pair.
    pub fn between(a: NodeId, b: NodeId) -> Option<EdgeId> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(EdgeId { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(EdgeId { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn lo(&self) -> NodeId {
        self.lo
    }

    pub fn hi(&self) -> NodeId {
        self.hi
    }

    pub fn touches(&self, n: NodeId) -> bool {
        self.lo == n || self.hi == n
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EdgeIdRepr {
    Pair { lo: NodeId, hi: NodeId },
    Text(String),
}

impl TryFrom<EdgeIdRepr> for EdgeId {
    type Error = ParseVisualIdError;

    fn try_from(r: EdgeIdRepr) -> Result<Self, Self::Error> {
        match r {
            EdgeIdRepr::Pair { lo, hi } => {
                EdgeId::between(lo, hi).ok_or_else(|| ParseVisualIdError(format!("edge-{}-{}", lo, hi)))
            }
            EdgeIdRepr::Text(s) => match s.parse::<VisualId>()? {
                VisualId::Edge(e) => Ok(e),
                VisualId::Node(_) => Err(ParseVisualIdError(s)),
            },
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub position: Vec2,
}

/// Derived edge geometry. Always recomputed from the endpoint positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeGeometry {
    pub start: Vec2,
    pub end: Vec2,
    pub length: f32,
    pub angle: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    // `a` is the node whose creation spawned the edge; geometry runs a -> b
    pub a: NodeId,
    pub b: NodeId,
    pub active: bool,
    pub geometry: EdgeGeometry,
}

/// Identity of a rendered element, as known to the output surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VisualId {
    Node(NodeId),
    Edge(EdgeId),
}

impl fmt::Display for VisualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisualId::Node(n) => write!(f, "node-{}", n),
            VisualId::Edge(e) => write!(f, "edge-{}", e),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid visual id '{0}'")]
pub struct ParseVisualIdError(pub String);

impl FromStr for VisualId {
    type Err = ParseVisualIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseVisualIdError(s.to_string());
        if let Some(rest) = s.strip_prefix("node-") {
            return rest.parse().map(|n| VisualId::Node(NodeId(n))).map_err(|_| bad());
        }
        if let Some(rest) = s.strip_prefix("edge-") {
            let (a, b) = rest.split_once('-').ok_or_else(bad)?;
            let a = a.parse().map_err(|_| bad())?;
            let b = b.parse().map_err(|_| bad())?;
            return EdgeId::between(NodeId(a), NodeId(b)).map(VisualId::Edge).ok_or_else(bad);
        }
        Err(bad())
    }
}

impl Serialize for VisualId {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VisualId {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Pick {
    Node { id: NodeId, dist: f32 },
    Edge { id: EdgeId, t: f32, dist: f32 },
}
