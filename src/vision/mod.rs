//! Vision/OCR Layer
//!
//! Extracts text from images for scoring. The OCR engine itself is an
//! external program; this layer validates the input image, optionally
//! prepares an enhanced copy, and runs the engine on it.

pub mod preprocess;
pub mod tesseract;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use preprocess::{check_image, prepare_image};
pub use tesseract::TesseractEngine;

/// Errors raised while turning an image into text
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("unsupported or unreadable image {}: {reason}", path.display())]
    UnsupportedImage { path: PathBuf, reason: String },

    #[error("failed to write preprocessed image {}: {reason}", path.display())]
    Preprocess { path: PathBuf, reason: String },

    #[error("OCR engine '{}' could not be started: {source}", binary.display())]
    EngineUnavailable {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("OCR engine exited with {status}: {stderr}")]
    EngineFailed { status: String, stderr: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An OCR backend mapping an image file to the text it contains
pub trait OcrEngine {
    /// Short engine identifier used in logs
    fn name(&self) -> &'static str;

    /// Run recognition on the image at `image`
    fn extract_text(&self, image: &Path) -> Result<String, OcrError>;
}
