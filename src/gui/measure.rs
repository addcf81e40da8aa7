#![cfg(feature = "egui")]

use eframe::egui::{Color32, FontId, Painter};

use crate::geometry::Measurer;

/// Convert a typographic point size to egui's logical pixels.
pub fn font_px(points: f32) -> FontId {
    FontId::proportional(points * 4.0 / 3.0)
}

/// Measures label text with the fonts egui will draw it with.
pub struct PainterMeasurer<'a> {
    painter: &'a Painter,
    font: FontId,
}

impl<'a> PainterMeasurer<'a> {
    pub fn new(painter: &'a Painter, font: FontId) -> Self {
        Self { painter, font }
    }
}

impl Measurer for PainterMeasurer<'_> {
    fn measure(&self, text: &str) -> (f32, f32) {
        let galley = self
            .painter
            .layout_no_wrap(text.to_string(), self.font.clone(), Color32::BLACK);
        let size = galley.size();
        (size.x, size.y)
    }
}
