//! OCR pipeline: preprocessing, backends and the multi-pass engine.

mod backend;
mod engine;
mod preprocessing;
mod tesseract;

pub use backend::{OcrBackend, PageSegMode};
pub use engine::{ImageSource, OcrEngine};
pub use preprocessing::ImagePreprocessor;
pub use tesseract::{TesseractCli, default_search_paths, locate_binary};
