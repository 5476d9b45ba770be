//! Error types
//!
//! Crate-wide error enum shared by loading, rendering and emitting.

use std::path::PathBuf;

use thiserror::Error;

use crate::render::MarkupError;

/// Label generation error types
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input must be a recipe object or a list of recipe objects")]
    InvalidInput,

    #[error("Template error: {0}")]
    Template(#[from] upon::Error),

    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Raster error: {0}")]
    Raster(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for label operations
pub type LabelResult<T> = Result<T, LabelError>;
