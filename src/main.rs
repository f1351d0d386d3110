//! ocr-fidelity - OCR extraction and translation similarity scoring
//!
//! Runs Tesseract on a set of images, saves the extracted text, and scores
//! each result against a reference translation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ocr_fidelity::app::{self, OcrFidelityApp, RunReport};
use ocr_fidelity::config::{self, AppConfig};
use ocr_fidelity::storage;
use ocr_fidelity::vision::TesseractEngine;

/// ocr-fidelity - OCR extraction and similarity scoring
#[derive(Parser, Debug)]
#[command(name = "ocr-fidelity")]
#[command(about = "Run OCR on images and score the text against reference translations")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run OCR on every configured item and score the results
    Run {
        /// Configuration file (defaults to the user config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory relative item paths are resolved against
        #[arg(short, long, default_value = ".")]
        base_dir: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score two existing text files without running OCR
    Score {
        /// Reference translation
        reference: PathBuf,

        /// Text to compare against the reference
        candidate: PathBuf,

        /// Print the scores as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration to a file
    InitConfig {
        /// Output path (defaults to the user config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Run {
            config,
            base_dir,
            json,
        } => run(config.as_deref(), base_dir, json),
        Command::Score {
            reference,
            candidate,
            json,
        } => score(&reference, &candidate, json),
        Command::InitConfig { output } => init_config(output),
    }
}

/// Run the full OCR and scoring pipeline
fn run(config_path: Option<&Path>, base_dir: PathBuf, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let config = config::load_config(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => load_or_default_config(),
    };

    let engine = TesseractEngine::new(&config.ocr);
    engine
        .version()
        .context("OCR engine unavailable, no items were processed")?;
    info!("OCR languages: {}", engine.languages());

    let app = OcrFidelityApp::new(Box::new(engine), config, base_dir);
    let report = app.run_all();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Score two text files
fn score(reference: &Path, candidate: &Path, json: bool) -> Result<()> {
    let comparison = app::score_files(reference, candidate)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!(
            "TF-IDF score: {} (cosine {}%)",
            comparison.tfidf, comparison.cosine_percent
        );
    }

    Ok(())
}

/// Write the default configuration
fn init_config(output: Option<PathBuf>) -> Result<()> {
    let path = match output {
        Some(path) => path,
        None => storage::get_config_dir()?.join("config.toml"),
    };

    config::save_config(&AppConfig::default(), &path)
        .with_context(|| format!("Failed to write config {:?}", path))?;
    println!("Default configuration written to {}", path.display());

    Ok(())
}

/// Load configuration from the user config directory or use defaults
fn load_or_default_config() -> AppConfig {
    if let Ok(config_dir) = storage::get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            match config::load_config(&config_path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", config_path);
                    return config;
                }
                Err(e) => tracing::warn!("Ignoring {:?}: {:#}", config_path, e),
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

fn print_report(report: &RunReport) {
    for item in &report.items {
        match (item.tfidf_score, item.cosine_percent, &item.error) {
            (Some(tfidf), Some(cosine), _) => println!(
                "Similarity between reference and OCR result ({}): {} (cosine {}%)",
                item.name, tfidf, cosine
            ),
            (_, _, error) => println!(
                "Similarity between reference and OCR result ({}): FAILED: {}",
                item.name,
                error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
