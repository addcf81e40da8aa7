//! Entity-relationship diagram sketcher.
//!
//! The scene core (`model`, `canvas`, `selection`, `rename`) is toolkit
//! independent and can be driven directly, which is how the tests use it.
//! The native window lives in [`gui`] behind the default `egui` feature.

pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod model;
pub mod rename;
pub mod selection;

#[cfg(feature = "egui")]
pub mod gui;

pub use canvas::Canvas;
pub use config::{AppConfig, AppContext};
pub use error::{Error, Result};
