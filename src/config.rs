//! Application configuration and the start-up context.
//!
//! [`AppConfig::default`] reproduces the sizes, offsets and names of the
//! classic tool; the binary overrides a few of them from the command line.

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub window_title: String,
    pub window_size: Vec2,
    /// Initial visible scene area, used until the first frame reports the real one.
    pub scene_size: Vec2,
    pub entity_size: Vec2,
    pub default_entity_name: String,
    /// New attributes are named `{prefix}{n}`.
    pub attribute_prefix: String,
    pub attribute_radius: f32,
    /// Offset from the owner's top-left to a new attribute's center.
    pub attribute_offset: Vec2,
    /// Offset from an attribute's center to its label's top-left.
    pub attribute_label_offset: Vec2,
    pub entity_font_size: f32,
    pub attribute_font_size: f32,
    pub dark_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "ER Sketch".to_string(),
            window_size: Vec2::new(1000.0, 700.0),
            scene_size: Vec2::new(800.0, 600.0),
            entity_size: Vec2::new(120.0, 60.0),
            default_entity_name: "New Entity".to_string(),
            attribute_prefix: "attribute".to_string(),
            attribute_radius: 10.0,
            attribute_offset: Vec2::new(60.0, 100.0),
            attribute_label_offset: Vec2::new(12.0, -8.0),
            entity_font_size: 10.0,
            attribute_font_size: 8.0,
            dark_mode: false,
        }
    }
}

impl AppConfig {
    pub fn scene_rect(&self) -> Rect {
        Rect::from_min_size(Point::ORIGIN, self.scene_size)
    }

    /// Check every size the canvas divides or lays out by.
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("window width", self.window_size.x),
            ("window height", self.window_size.y),
            ("scene width", self.scene_size.x),
            ("scene height", self.scene_size.y),
            ("entity width", self.entity_size.x),
            ("entity height", self.entity_size.y),
            ("attribute radius", self.attribute_radius),
            ("entity font size", self.entity_font_size),
            ("attribute font size", self.attribute_font_size),
        ];
        for (what, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidDimension { what, value });
            }
        }
        Ok(())
    }
}

/// Everything constructed once at start-up and handed to the window and canvas.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }
}
