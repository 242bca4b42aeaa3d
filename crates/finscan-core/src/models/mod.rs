//! Data models and configuration.

pub mod config;
pub mod document;

pub use config::{FinscanConfig, OcrConfig, OutputConfig, PreprocessConfig, SentimentConfig};
pub use document::{
    DocumentMetadata, DocumentRecord, DocumentType, EntityBundle, FieldBundle, Sentiment,
    SentimentLabel, SentimentMethod, SummaryRow, TextSection, Transcription, Urgency,
};
