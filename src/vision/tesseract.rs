//! Tesseract command-line backend
//!
//! Runs `tesseract <image> stdout -l <languages>` and captures stdout.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use super::{OcrEngine, OcrError};
use crate::config::OcrSettings;

/// Tesseract engine driven through its CLI
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
    languages: String,
    tessdata_dir: Option<PathBuf>,
}

impl TesseractEngine {
    /// Create an engine from OCR settings
    pub fn new(settings: &OcrSettings) -> Self {
        Self {
            binary: settings.binary.clone(),
            languages: settings.languages.clone(),
            tessdata_dir: settings.tessdata_dir.clone(),
        }
    }

    /// Get the configured language string (e.g. "eng+fra")
    pub fn languages(&self) -> &str {
        &self.languages
    }

    /// Command-line arguments for recognizing `image`
    pub fn args(&self, image: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            image.as_os_str().to_owned(),
            "stdout".into(),
            "-l".into(),
            self.languages.clone().into(),
        ];
        if let Some(dir) = &self.tessdata_dir {
            args.push("--tessdata-dir".into());
            args.push(dir.as_os_str().to_owned());
        }
        args
    }

    /// Query the engine version, confirming the binary can be run
    pub fn version(&self) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|source| OcrError::EngineUnavailable {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // Older releases print the banner on stderr
        let banner = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        let version = String::from_utf8_lossy(&banner)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        info!("OCR engine available: {}", version);
        Ok(version)
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn extract_text(&self, image: &Path) -> Result<String, OcrError> {
        debug!("Running {:?} on {:?} ({})", self.binary, image, self.languages);

        let output = Command::new(&self.binary)
            .args(self.args(image))
            .output()
            .map_err(|source| OcrError::EngineUnavailable {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("Tesseract returned {} bytes for {:?}", text.len(), image);
        Ok(text)
    }
}
