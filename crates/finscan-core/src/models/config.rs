//! Configuration structures for the analysis pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{FinscanError, Result};

/// Main configuration for the finscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinscanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Image preprocessing configuration.
    pub preprocessing: PreprocessConfig,

    /// Sentiment scoring configuration.
    pub sentiment: SentimentConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Explicit path to the tesseract executable. When unset the platform
    /// search list is tried, then `PATH`.
    pub tesseract_path: Option<PathBuf>,

    /// Tesseract language code.
    pub language: String,

    /// Tesseract OCR engine mode (`--oem`).
    pub engine_mode: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            language: "eng".to_string(),
            engine_mode: 3,
        }
    }
}

/// Image preprocessing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Run the preprocessing chain at all.
    pub enabled: bool,

    /// Gaussian blur standard deviation.
    pub blur_sigma: f32,

    /// Radius of the morphological closing kernel.
    pub close_radius: u8,

    /// Radius of the median filter.
    pub median_radius: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blur_sigma: 1.0,
            close_radius: 1,
            median_radius: 1,
        }
    }
}

/// Sentiment scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Texts longer than this many characters are scored in chunks of this
    /// size by the model-backed scorer.
    pub chunk_size: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self { chunk_size: 512 }
    }
}

/// Output configuration used by callers that persist records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory results are written to.
    pub directory: PathBuf,

    /// Write the full record as JSON.
    pub write_json: bool,

    /// Write the flattened record as CSV.
    pub write_csv: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("results"),
            write_json: true,
            write_csv: true,
        }
    }
}

impl FinscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FinscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| FinscanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
