//! Egui front-end for the sketcher (feature = "egui").
//!
//! The window hosts two command buttons above the canvas. Rendering and
//! pointer handling live in [`ui`]; all state changes go through
//! [`crate::canvas::Canvas`].

#![cfg(feature = "egui")]

mod measure;
mod ui;
mod window;

pub use measure::{PainterMeasurer, font_px};
pub use ui::{CanvasCommand, CanvasView, DragMode, canvas_ui};
pub use window::{MainWindow, run};
