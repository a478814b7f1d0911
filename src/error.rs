use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when building a canvas
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Width or height was zero
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Errors raised while loading or validating a [`crate::config::PaletteConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),

    /// A value parsed fine but cannot drive the palette
    #[error("Invalid config value: {0}")]
    Invalid(String),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Errors raised when exporting the canvas to an image sink
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create export directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The sink refused the image for a reason of its own
    #[error("Export rejected: {0}")]
    Rejected(String),
}
