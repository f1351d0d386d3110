//! Application Configuration
//!
//! OCR engine settings and the list of work items, stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// OCR engine settings
    pub ocr: OcrSettings,
    /// Output settings
    pub output: OutputSettings,
    /// Images to recognize and the references to score them against
    pub items: Vec<WorkItem>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ocr: OcrSettings::default(),
            output: OutputSettings::default(),
            items: default_items(),
        }
    }
}

impl AppConfig {
    /// Directory OCR results are written to, resolved against `base_dir`
    pub fn results_dir(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.output.results_dir)
    }
}

/// OCR engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Tesseract executable name or path
    pub binary: PathBuf,
    /// Tesseract language string, e.g. "eng+fra"
    pub languages: String,
    /// Override for the tessdata directory
    pub tessdata_dir: Option<PathBuf>,
    /// Image preprocessing applied before recognition
    pub preprocessing: OcrPreprocessing,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            languages: "eng+fra".to_string(),
            tessdata_dir: None,
            preprocessing: OcrPreprocessing::default(),
        }
    }
}

/// Image preprocessing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrPreprocessing {
    /// Whether preprocessing is applied at all
    pub enabled: bool,
    /// Convert to grayscale
    pub grayscale: bool,
    /// Integer upscale factor (1 = none, clamped to 4)
    pub scale: u32,
}

impl Default for OcrPreprocessing {
    fn default() -> Self {
        Self {
            enabled: false,
            grayscale: true,
            scale: 2,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for OCR result files, relative to the base directory
    pub results_dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("result_ocr"),
        }
    }
}

/// One image to recognize and the reference translation to score it against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Display name used in logs and reports
    pub name: String,
    /// Image to run OCR on
    pub image: PathBuf,
    /// Reference translation text file
    pub reference: PathBuf,
    /// File the OCR text is saved to, relative to the results directory
    pub result: PathBuf,
}

impl WorkItem {
    pub fn new(name: &str, image: &str, reference: &str, result: &str) -> Self {
        Self {
            name: name.to_string(),
            image: PathBuf::from(image),
            reference: PathBuf::from(reference),
            result: PathBuf::from(result),
        }
    }

    /// Resolve relative paths: image and reference against `base_dir`,
    /// result against `results_dir`. Absolute paths are kept as-is.
    pub fn resolve(&self, base_dir: &Path, results_dir: &Path) -> WorkItem {
        WorkItem {
            name: self.name.clone(),
            image: base_dir.join(&self.image),
            reference: base_dir.join(&self.reference),
            result: results_dir.join(&self.result),
        }
    }
}

/// The three sample images shipped with the project
fn default_items() -> Vec<WorkItem> {
    vec![
        WorkItem::new(
            "meme",
            "OCR_Items/test_image.jpeg",
            "OCR_Items/test_image.txt",
            "result_test_image.txt",
        ),
        WorkItem::new(
            "OCR 1",
            "OCR_Items/test_OCR_1.jpg",
            "OCR_Items/test_OCR_trad_1.txt",
            "result_test_OCR_1.txt",
        ),
        WorkItem::new(
            "OCR 2",
            "OCR_Items/test_OCR_2.jpg",
            "OCR_Items/test_OCR_trad_2.txt",
            "result_test_OCR_2.txt",
        ),
    ]
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {:?}", path))?;
    let config: AppConfig =
        toml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
