//! Application Coordinator
//!
//! Runs each work item through OCR, result saving and scoring. Items are
//! isolated: a failure is logged and reported for that item and the run
//! moves on to the next one.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{AppConfig, WorkItem};
use crate::scoring::{self, Comparison};
use crate::storage::{self, StorageError};
use crate::vision::{self, OcrEngine, OcrError};

/// Subdirectory of the results directory holding preprocessed images
const PREPROCESSED_DIR: &str = ".preprocessed";

/// Why a work item produced no score
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Outcome of one work item
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub name: String,
    pub image: PathBuf,
    pub result: PathBuf,
    /// TF-IDF score, absent when the item failed
    pub tfidf_score: Option<f64>,
    /// Cosine similarity percentage, absent when the item failed
    pub cosine_percent: Option<f64>,
    pub error: Option<String>,
}

impl ItemReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a full run, in work item order
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub items: Vec<ItemReport>,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn new(items: Vec<ItemReport>) -> Self {
        let succeeded = items.iter().filter(|i| i.is_success()).count();
        let failed = items.len() - succeeded;
        Self {
            items,
            succeeded,
            failed,
        }
    }
}

/// Main application coordinator
pub struct OcrFidelityApp {
    engine: Box<dyn OcrEngine>,
    config: AppConfig,
    base_dir: PathBuf,
}

impl OcrFidelityApp {
    /// Create a coordinator resolving relative paths against `base_dir`
    pub fn new(engine: Box<dyn OcrEngine>, config: AppConfig, base_dir: PathBuf) -> Self {
        Self {
            engine,
            config,
            base_dir,
        }
    }

    /// Directory OCR results are written to
    pub fn results_dir(&self) -> PathBuf {
        self.config.results_dir(&self.base_dir)
    }

    /// Run every configured work item
    pub fn run_all(&self) -> RunReport {
        info!(
            "Processing {} work item(s) with {}",
            self.config.items.len(),
            self.engine.name()
        );

        let items = self
            .config
            .items
            .iter()
            .map(|item| self.run_item(item))
            .collect();

        let report = RunReport::new(items);
        info!(
            "Run complete: {} succeeded, {} failed",
            report.succeeded, report.failed
        );
        report
    }

    /// Run a single work item, converting any failure into the report
    pub fn run_item(&self, item: &WorkItem) -> ItemReport {
        let results_dir = self.results_dir();
        let resolved = item.resolve(&self.base_dir, &results_dir);

        let (tfidf_score, cosine_percent, error) = match self.process(&resolved, &results_dir) {
            Ok(comparison) => {
                info!(
                    "[{}] TF-IDF score {} (cosine {}%)",
                    resolved.name, comparison.tfidf, comparison.cosine_percent
                );
                (Some(comparison.tfidf), Some(comparison.cosine_percent), None)
            }
            Err(e) => {
                error!("[{}] skipped: {}", resolved.name, e);
                (None, None, Some(e.to_string()))
            }
        };

        ItemReport {
            name: resolved.name,
            image: resolved.image,
            result: resolved.result,
            tfidf_score,
            cosine_percent,
            error,
        }
    }

    fn process(&self, item: &WorkItem, results_dir: &Path) -> Result<Comparison, ItemError> {
        let image = vision::prepare_image(
            &item.image,
            &self.config.ocr.preprocessing,
            &results_dir.join(PREPROCESSED_DIR),
            &item.name,
        )?;

        let text = self.engine.extract_text(&image)?;
        if text.trim().is_empty() {
            warn!("[{}] OCR returned no text for {:?}", item.name, item.image);
        }

        storage::save_text(&item.result, &text)?;
        info!("[{}] Extracted text saved to {:?}", item.name, item.result);

        let reference = storage::read_text(&item.reference)?;
        Ok(scoring::compare(&reference, &text))
    }
}

/// Score two text files against each other without running OCR
pub fn score_files(reference: &Path, candidate: &Path) -> Result<Comparison, StorageError> {
    let reference_text = storage::read_text(reference)?;
    let candidate_text = storage::read_text(candidate)?;
    Ok(scoring::compare(&reference_text, &candidate_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OcrPreprocessing;
    use image::{Rgb, RgbImage};
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Returns canned text per image file name, failing for unknown images
    struct FakeOcr {
        outputs: HashMap<String, String>,
    }

    impl FakeOcr {
        fn new(outputs: &[(&str, &str)]) -> Self {
            Self {
                outputs: outputs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }
        }
    }

    impl OcrEngine for FakeOcr {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn extract_text(&self, image: &Path) -> Result<String, OcrError> {
            let key = image
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            self.outputs
                .get(key)
                .cloned()
                .ok_or_else(|| OcrError::EngineFailed {
                    status: "exit status: 1".to_string(),
                    stderr: format!("cannot read {key}"),
                })
        }
    }

    fn write_image(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]))
            .save(path)
            .unwrap();
    }

    fn setup(dir: &Path, items: Vec<WorkItem>) -> AppConfig {
        let mut config = AppConfig::default();
        config.items = items;
        write_image(&dir.join("items/cat.png"));
        write_image(&dir.join("items/dog.png"));
        write_image(&dir.join("items/blurry.png"));
        std::fs::write(dir.join("items/cat.txt"), "The cat sat").unwrap();
        std::fs::write(dir.join("items/dog.txt"), "the dog sat").unwrap();
        std::fs::write(dir.join("items/blurry.txt"), "unreadable").unwrap();
        config
    }

    #[test]
    fn test_run_item_scores_and_saves() {
        let dir = TempDir::new().unwrap();
        let item = WorkItem::new("cat", "items/cat.png", "items/cat.txt", "cat_ocr.txt");
        let config = setup(dir.path(), vec![item.clone()]);
        let engine = FakeOcr::new(&[("cat", "the dog sat\n")]);

        let app = OcrFidelityApp::new(Box::new(engine), config, dir.path().to_path_buf());
        let report = app.run_item(&item);

        assert!(report.is_success());
        assert_eq!(report.tfidf_score, Some(1.39));
        assert_eq!(report.cosine_percent, Some(67.0));

        let saved = dir.path().join("result_ocr/cat_ocr.txt");
        assert_eq!(report.result, saved);
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "the dog sat\n");
    }

    #[test]
    fn test_failed_item_does_not_stop_run() {
        let dir = TempDir::new().unwrap();
        let config = setup(
            dir.path(),
            vec![
                WorkItem::new("blurry", "items/blurry.png", "items/blurry.txt", "blurry.txt"),
                WorkItem::new("missing", "items/missing.png", "items/cat.txt", "missing.txt"),
                WorkItem::new("dog", "items/dog.png", "items/dog.txt", "dog.txt"),
            ],
        );
        let engine = FakeOcr::new(&[("dog", "the dog sat")]);

        let app = OcrFidelityApp::new(Box::new(engine), config, dir.path().to_path_buf());
        let report = app.run_all();

        assert_eq!(report.items.len(), 3);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 2);

        let blurry = &report.items[0];
        assert_eq!(blurry.tfidf_score, None);
        assert!(blurry.error.as_deref().unwrap().contains("OCR failed"));
        assert!(!dir.path().join("result_ocr/blurry.txt").exists());

        let missing = &report.items[1];
        assert!(missing.error.as_deref().unwrap().contains("image not found"));

        let dog = &report.items[2];
        assert_eq!(dog.tfidf_score, Some(0.0));
        assert_eq!(dog.cosine_percent, Some(100.0));
    }

    #[test]
    fn test_missing_reference_is_not_scored() {
        let dir = TempDir::new().unwrap();
        let item = WorkItem::new("cat", "items/cat.png", "items/no_reference.txt", "cat.txt");
        let config = setup(dir.path(), vec![item.clone()]);
        let engine = FakeOcr::new(&[("cat", "the cat sat")]);

        let app = OcrFidelityApp::new(Box::new(engine), config, dir.path().to_path_buf());
        let report = app.run_item(&item);

        assert_eq!(report.tfidf_score, None);
        assert!(report.error.as_deref().unwrap().contains("no_reference.txt"));
        // OCR output is still saved before the reference is read
        assert!(dir.path().join("result_ocr/cat.txt").exists());
    }

    #[test]
    fn test_preprocessed_copy_is_sent_to_engine() {
        let dir = TempDir::new().unwrap();
        let item = WorkItem::new("cat", "items/cat.png", "items/cat.txt", "cat.txt");
        let mut config = setup(dir.path(), vec![item.clone()]);
        config.ocr.preprocessing = OcrPreprocessing {
            enabled: true,
            grayscale: true,
            scale: 2,
        };
        let engine = FakeOcr::new(&[("cat", "the cat sat")]);

        let app = OcrFidelityApp::new(Box::new(engine), config, dir.path().to_path_buf());
        let report = app.run_item(&item);

        assert_eq!(report.tfidf_score, Some(0.0));
        assert!(dir.path().join("result_ocr/.preprocessed/cat.png").exists());
    }

    #[test]
    fn test_score_files() {
        let dir = TempDir::new().unwrap();
        let reference = dir.path().join("reference.txt");
        let candidate = dir.path().join("candidate.txt");
        std::fs::write(&reference, "the cat sat").unwrap();
        std::fs::write(&candidate, "the dog sat").unwrap();

        let comparison = score_files(&reference, &candidate).unwrap();
        assert_eq!(comparison.tfidf, 1.39);

        let err = score_files(&reference, &dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
    }

    #[test]
    fn test_report_serializes() {
        let report = RunReport::new(vec![ItemReport {
            name: "meme".to_string(),
            image: PathBuf::from("img.jpeg"),
            result: PathBuf::from("out.txt"),
            tfidf_score: Some(1.39),
            cosine_percent: Some(67.0),
            error: None,
        }]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["succeeded"], 1);
        assert_eq!(json["items"][0]["tfidf_score"], 1.39);
        assert!(json["items"][0]["error"].is_null());
    }
}
