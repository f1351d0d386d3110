//! ocr-fidelity - OCR extraction and translation similarity scoring
//!
//! The [`scoring`] module is the pure TF-IDF comparison of two texts. The
//! remaining modules wrap it: [`vision`] runs the OCR engine, [`storage`]
//! reads and writes text files, [`config`] describes the work items, and
//! [`app`] ties them together with per-item error isolation.

pub mod app;
pub mod config;
pub mod scoring;
pub mod storage;
pub mod vision;

pub use scoring::{compare, tfidf_score, Comparison};
