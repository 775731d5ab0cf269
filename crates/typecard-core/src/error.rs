//! Error types for typecard

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TypecardError>;

/// Main error type for typecard
#[derive(Debug, Error)]
pub enum TypecardError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Rendering failed: {0}")]
    Rendering(#[from] RenderError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font resolution and loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Unsupported font '{family}'. Supported fonts: {}", supported.join(", "))]
    UnsupportedFont {
        family: String,
        supported: Vec<String>,
    },

    #[error("Font file for '{family}' not found: {}", path.display())]
    FileMissing { family: String, path: PathBuf },

    #[error("Invalid font data in {}", path.display())]
    InvalidData { path: PathBuf },
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Path building failed")]
    PathBuildingFailed,
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Inbound parameter errors
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid value for '{name}': {value:?}")]
    InvalidParameter { name: String, value: String },

    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
}
