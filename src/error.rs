//! Error types
//!
//! Each concern gets its own enum so callers can match on what actually
//! went wrong instead of string-sniffing.

use thiserror::Error;

/// Errors raised by the shape engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("Cannot encompass an empty set of bounds")]
    EmptyBounds,

    #[error("Cannot build a line through coincident points ({x}, {y})")]
    DegenerateLine { x: f64, y: f64 },

    #[error("No generator at index {0}")]
    UnknownGenerator(usize),

    #[error("Unknown control: {0}")]
    UnknownControl(String),

    #[error("Control '{control}' expects a {expected} value")]
    InvalidControlValue {
        control: String,
        expected: &'static str,
    },
}

/// Errors that can occur while writing a rendered grid to disk
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Nothing has been rendered yet")]
    NothingRendered,

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Errors from loading or saving persisted settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}
