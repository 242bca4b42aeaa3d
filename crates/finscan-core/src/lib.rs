//! Core library for financial document analysis.
//!
//! This crate provides:
//! - Image preprocessing for OCR (grayscale, blur, Otsu binarization, cleanup)
//! - Multi-pass Tesseract OCR with longest-transcription selection
//! - Keyword document classification (invoice, quote, receipt, bill/statement)
//! - Regex entity and financial field extraction
//! - Model-backed or rule-based sentiment and urgency scoring
//! - Aggregation into serializable per-document records

pub mod error;
pub mod extraction;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod sentiment;

pub use error::{FinscanError, Result};
pub use extraction::{DocumentClassifier, EntityExtractor, FinancialExtractor, TextExtractor};
pub use models::config::FinscanConfig;
pub use models::document::{
    DocumentRecord, DocumentType, EntityBundle, FieldBundle, Sentiment, SentimentLabel,
    SummaryRow, Transcription, Urgency,
};
pub use ocr::{ImageSource, OcrBackend, OcrEngine, PageSegMode, TesseractCli};
pub use pipeline::{DocumentAnalyzer, ResultAggregator};
pub use sentiment::{SentimentModel, SentimentScorer};
