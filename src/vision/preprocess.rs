//! Image checks and preprocessing filters applied before OCR
//!
//! Upscaling and grayscale conversion help Tesseract on small or colored
//! scans. The enhanced copy is written to disk because the engine reads
//! images from a path.

use image::{imageops::FilterType, DynamicImage, ImageFormat, ImageReader};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::OcrError;
use crate::config::OcrPreprocessing;

/// Largest upscale factor applied to an image
pub const MAX_SCALE: u32 = 4;

/// Confirm `path` is an image the decoder understands, returning its size
pub fn check_image(path: &Path) -> Result<(u32, u32), OcrError> {
    if !path.is_file() {
        return Err(OcrError::ImageNotFound(path.to_path_buf()));
    }

    let reader = ImageReader::open(path)?.with_guessed_format()?;
    if reader.format().is_none() {
        return Err(OcrError::UnsupportedImage {
            path: path.to_path_buf(),
            reason: "unrecognized image format".to_string(),
        });
    }

    reader
        .into_dimensions()
        .map_err(|e| OcrError::UnsupportedImage {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Return the path the OCR engine should read for `path`.
///
/// With preprocessing disabled this is the original image (after a decode
/// check). Otherwise an upscaled and/or grayscale PNG named after `name` is
/// written into `work_dir` and its path returned.
pub fn prepare_image(
    path: &Path,
    settings: &OcrPreprocessing,
    work_dir: &Path,
    name: &str,
) -> Result<PathBuf, OcrError> {
    let (width, height) = check_image(path)?;

    if !settings.enabled {
        debug!("OCR preprocessing disabled for {:?}", path);
        return Ok(path.to_path_buf());
    }

    let scale = settings.scale.clamp(1, MAX_SCALE);
    debug!(
        "OCR preprocessing {:?} ({}x{}): grayscale={}, scale={}",
        path, width, height, settings.grayscale, scale
    );

    let mut img = image::open(path).map_err(|e| OcrError::UnsupportedImage {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if scale > 1 {
        img = img.resize_exact(width * scale, height * scale, FilterType::Triangle);
    }
    if settings.grayscale {
        img = DynamicImage::ImageLuma8(img.to_luma8());
    }

    std::fs::create_dir_all(work_dir)?;
    let output = work_dir.join(format!("{}.png", file_stem_for(name)));
    img.save_with_format(&output, ImageFormat::Png)
        .map_err(|e| OcrError::Preprocess {
            path: output.clone(),
            reason: e.to_string(),
        })?;

    Ok(output)
}

/// Make a work item name safe to use as a file name
fn file_stem_for(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "image".to_string()
    } else {
        stem
    }
}
