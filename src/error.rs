//! Error types for application start-up.
//!
//! Scene operations never fail; missing selections or unknown ids are silent
//! no-ops. Only configuration, logging and window creation can go wrong.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid {what}: {value} (must be finite and positive)")]
    InvalidDimension { what: &'static str, value: f32 },

    #[error("Logging error: {message}")]
    Logging { message: String },

    #[error("GUI error: {message}")]
    Gui { message: String },
}

impl Error {
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    pub fn gui(message: impl Into<String>) -> Self {
        Self::Gui {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
