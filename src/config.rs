//! View configuration. Defaults match the hosted page; a JSON object stored
//! under [`STORAGE_KEY`] in localStorage overrides individual fields.

use serde::{Deserialize, Serialize};

use crate::error::ViewError;
use crate::state::{SpriteRole, ZoomLimits};

pub const STORAGE_KEY: &str = "snake_view_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub apple: String,
    pub golden_apple: String,
    pub head: String,
    pub tail: String,
    pub body_straight: String,
    pub corner_up_left: String,
    pub corner_left_down: String,
    pub corner_down_right: String,
    pub corner_right_up: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            apple: "/apple.png".into(),
            golden_apple: "/golden_apple.png".into(),
            head: "/snake_head.svg".into(),
            tail: "/snake_tail.svg".into(),
            body_straight: "/snake_body_straight.svg".into(),
            corner_up_left: "/body_corner_up_left.svg".into(),
            corner_left_down: "/body_corner_left_down.svg".into(),
            corner_down_right: "/body_corner_down_right.svg".into(),
            corner_right_up: "/body_corner_right_up.svg".into(),
        }
    }
}

impl AssetPaths {
    pub fn path(&self, role: SpriteRole) -> &str {
        match role {
            SpriteRole::Apple => &self.apple,
            SpriteRole::GoldenApple => &self.golden_apple,
            SpriteRole::Head => &self.head,
            SpriteRole::Tail => &self.tail,
            SpriteRole::BodyStraight => &self.body_straight,
            SpriteRole::CornerUpLeft => &self.corner_up_left,
            SpriteRole::CornerLeftDown => &self.corner_left_down,
            SpriteRole::CornerDownRight => &self.corner_down_right,
            SpriteRole::CornerRightUp => &self.corner_right_up,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub initial_cell_size: f64,
    /// Ratio applied per wheel tick; must be > 1.
    pub wheel_zoom_factor: f64,
    /// Labels every `max(1, floor(label_reference_size / cell_size))` grid lines.
    pub label_reference_size: f64,
    pub apple_scale: f64,
    pub min_cell_size: f64,
    /// `None` leaves zoom-in unbounded.
    pub max_cell_size: Option<f64>,
    pub feed_url: String,
    pub explorer_url: String,
    pub assets: AssetPaths,
    pub debug_log: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            initial_cell_size: 40.0,
            wheel_zoom_factor: 1.05,
            label_reference_size: 40.0,
            apple_scale: 0.8,
            min_cell_size: 0.0,
            max_cell_size: None,
            feed_url: String::new(),
            explorer_url: "https://solscan.io/tx/".into(),
            assets: AssetPaths::default(),
            debug_log: false,
        }
    }
}

impl ViewConfig {
    /// Parses a (possibly partial) JSON override and validates it.
    pub fn from_json(raw: &str) -> Result<Self, ViewError> {
        let cfg: ViewConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ViewError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.initial_cell_size) {
            return Err(ViewError::Config("initial_cell_size must be > 0".into()));
        }
        if !(self.wheel_zoom_factor.is_finite() && self.wheel_zoom_factor > 1.0) {
            return Err(ViewError::Config("wheel_zoom_factor must be > 1".into()));
        }
        if !positive(self.label_reference_size) {
            return Err(ViewError::Config("label_reference_size must be > 0".into()));
        }
        if !positive(self.apple_scale) {
            return Err(ViewError::Config("apple_scale must be > 0".into()));
        }
        if !(self.min_cell_size.is_finite() && self.min_cell_size >= 0.0) {
            return Err(ViewError::Config("min_cell_size must be >= 0".into()));
        }
        if let Some(max) = self.max_cell_size {
            if !positive(max) || max < self.min_cell_size {
                return Err(ViewError::Config(
                    "max_cell_size must be > 0 and >= min_cell_size".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min: self.min_cell_size,
            max: self.max_cell_size.unwrap_or(f64::INFINITY),
        }
    }

    /// Reads the localStorage override, falling back to defaults on any problem.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => match Self::from_json(&raw) {
                Ok(cfg) => cfg,
                Err(err) => {
                    gloo::console::warn!(format!("{STORAGE_KEY}: {err}; using defaults"));
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ViewConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.zoom_limits().max, f64::INFINITY);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = ViewConfig::from_json(r#"{"feed_url":"wss://example.test/snake","assets":{"apple":"/a.png"}}"#)
            .unwrap();
        assert_eq!(cfg.feed_url, "wss://example.test/snake");
        assert_eq!(cfg.assets.apple, "/a.png");
        assert_eq!(cfg.assets.head, "/snake_head.svg");
        assert_eq!(cfg.wheel_zoom_factor, 1.05);
    }

    #[test]
    fn rejects_shrinking_wheel_factor() {
        assert!(matches!(
            ViewConfig::from_json(r#"{"wheel_zoom_factor":0.9}"#),
            Err(ViewError::Config(_))
        ));
        assert!(ViewConfig::from_json(r#"{"max_cell_size":5.0,"min_cell_size":10.0}"#).is_err());
        assert!(ViewConfig::from_json("not json").is_err());
    }

    #[test]
    fn asset_path_per_role() {
        let paths = AssetPaths::default();
        assert_eq!(paths.path(SpriteRole::CornerRightUp), "/body_corner_right_up.svg");
        assert_eq!(paths.path(SpriteRole::GoldenApple), "/golden_apple.png");
    }
}
