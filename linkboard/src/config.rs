use crate::deletion::DeletionZone;
use crate::error::ConfigError;
use crate::geometry::limits::in_size_bounds;
use crate::model::{Rect, Vec2};
use serde::{Deserialize, Serialize};

pub const DEFAULT_UNDO_LIMIT: usize = 200;

/// Editor tunables. Every field has a default, so a partial document is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Visible canvas rect; nodes can only be created inside it.
    pub surface: Rect,
    pub deletion_zone: DeletionZone,
    /// Max snapshots kept; `None` keeps everything.
    pub undo_limit: Option<usize>,
    pub label_prefix: String,
    /// Offset from a node's position to the point its edges attach to.
    pub edge_anchor: Vec2,
    pub pick_tolerance: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            surface: Rect::default(),
            deletion_zone: DeletionZone::default(),
            undo_limit: Some(DEFAULT_UNDO_LIMIT),
            label_prefix: "Point".to_string(),
            edge_anchor: Vec2::ZERO,
            pick_tolerance: 6.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: EditorConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("surface.width", self.surface.width),
            ("surface.height", self.surface.height),
            ("deletion_zone.size", self.deletion_zone.size),
        ];
        for (field, got) in positive {
            if !in_size_bounds(got) {
                return Err(ConfigError::NonPositive { field, got });
            }
        }
        let finite = [
            ("surface.x", self.surface.x),
            ("surface.y", self.surface.y),
            ("edge_anchor.x", self.edge_anchor.x),
            ("edge_anchor.y", self.edge_anchor.y),
        ];
        for (field, got) in finite {
            if !got.is_finite() {
                return Err(ConfigError::NonFinite { field, got });
            }
        }
        if self.undo_limit == Some(0) {
            return Err(ConfigError::ZeroUndoLimit);
        }
        if !self.pick_tolerance.is_finite() || self.pick_tolerance < 0.0 {
            return Err(ConfigError::NonFinite { field: "pick_tolerance", got: self.pick_tolerance });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deletion::Corner;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EditorConfig::from_json_str(r#"{"deletion_zone": {"size": 64}}"#).unwrap();
        assert_eq!(cfg.deletion_zone.size, 64.0);
        assert_eq!(cfg.deletion_zone.corner, Corner::TopLeft);
        assert_eq!(cfg.undo_limit, Some(DEFAULT_UNDO_LIMIT));
        assert_eq!(cfg.label_prefix, "Point");
    }

    #[test]
    fn null_undo_limit_means_unbounded() {
        let cfg = EditorConfig::from_json_str(r#"{"undo_limit": null}"#).unwrap();
        assert_eq!(cfg.undo_limit, None);
    }

    #[test]
    fn zero_undo_limit_is_rejected() {
        let err = EditorConfig::from_json_str(r#"{"undo_limit": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroUndoLimit));
        let cfg = EditorConfig { undo_limit: Some(0), ..EditorConfig::default() };
        assert!(crate::Editor::new(cfg).is_err());
        assert!(EditorConfig::from_json_str(r#"{"undo_limit": 1}"#).is_ok());
    }

    #[test]
    fn rejects_bad_sizes_and_bad_json() {
        let err = EditorConfig::from_json_str(r#"{"surface": {"x":0,"y":0,"width":0,"height":10}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "surface.width", .. }));
        let err = EditorConfig::from_json_str(r#"{"deletion_zone": {"size": -5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "deletion_zone.size", .. }));
        assert!(matches!(EditorConfig::from_json_str("{"), Err(ConfigError::Parse(_))));
    }
}
