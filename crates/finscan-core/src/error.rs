//! Error types for the finscan-core library.

use thiserror::Error;

/// Error type for library operations outside the per-document pipeline.
///
/// Per-document failures never surface as errors; they are reported in the
/// returned record.
#[derive(Error, Debug)]
pub enum FinscanError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while resolving the document image.
#[derive(Error, Debug)]
pub enum InputError {
    /// Neither a path nor a byte buffer was supplied.
    #[error("No image provided")]
    Missing,

    /// Both a path and a byte buffer were supplied.
    #[error("Provide either an image path or image bytes, not both")]
    Ambiguous,

    /// The path does not exist on disk.
    #[error("Image path {0} does not exist")]
    NotFound(String),

    /// The file exists but is not a decodable image.
    #[error("Failed to load image from {path}: {reason}")]
    Load { path: String, reason: String },

    /// The in-memory buffer is not a decodable image.
    #[error("Failed to process image bytes: {0}")]
    Decode(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR engine could not be started.
    #[error("failed to launch OCR engine: {0}")]
    Launch(String),

    /// The OCR engine ran but reported a failure.
    #[error("OCR engine failed: {0}")]
    Engine(String),

    /// The image could not be handed to the engine.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Every page-segmentation configuration failed.
    #[error("no OCR configuration produced output")]
    NoOutput,
}

/// Errors related to image preprocessing.
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// The image has a zero dimension.
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },

    /// An image routine panicked.
    #[error("stage `{stage}` aborted: {reason}")]
    Stage { stage: &'static str, reason: String },
}

/// Errors related to the sentiment model capability.
#[derive(Error, Debug)]
pub enum SentimentError {
    /// The model could not be initialized.
    #[error("sentiment model unavailable: {0}")]
    Unavailable(String),

    /// The model failed to score the given text.
    #[error("sentiment inference failed: {0}")]
    Inference(String),
}

/// Result type for the finscan library.
pub type Result<T> = std::result::Result<T, FinscanError>;
