//! Data models for analyzed documents.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Heuristic type of a financial document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    Invoice,
    Quote,
    Receipt,
    /// Bills and account statements.
    #[serde(rename = "Bill/Statement")]
    BillStatement,
    #[default]
    Unknown,
}

impl DocumentType {
    /// Display name as it appears in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::Quote => "Quote",
            Self::Receipt => "Receipt",
            Self::BillStatement => "Bill/Statement",
            Self::Unknown => "Unknown",
        }
    }

    /// Name usable as a file name component (`/` replaced by `_`).
    pub fn file_stem(&self) -> String {
        self.as_str().replace('/', "_")
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text produced by OCR for one document image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// Selected transcription.
    pub text: String,

    /// Every successful configuration's output, keyed `config_<n>`.
    pub alternates: BTreeMap<String, String>,

    /// Whether any configuration produced output.
    pub success: bool,

    /// Failure description when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Transcription {
    /// A failed transcription carrying the given error.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            alternates: BTreeMap::new(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Financial-specific substrings matched in a transcription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBundle {
    pub totals: BTreeSet<String>,
    pub taxes: BTreeSet<String>,
    pub dates: BTreeSet<String>,
    pub ids: BTreeSet<String>,
}

/// General entity-like substrings matched in a transcription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBundle {
    pub dates: BTreeSet<String>,
    pub organizations: BTreeSet<String>,
    pub persons: BTreeSet<String>,
    pub money: BTreeSet<String>,
    pub quantities: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    pub products: BTreeSet<String>,
}

/// Sentiment polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "POSITIVE"),
            Self::Negative => write!(f, "NEGATIVE"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Time-pressure flag, independent of polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Urgency {
    Low,
    High,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Which scorer produced a sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentMethod {
    Model,
    Rules,
}

/// Sentiment of a transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Confidence in the label (0.0 - 1.0).
    pub score: f32,
    pub urgency: Urgency,
    pub positive_keywords: usize,
    pub negative_keywords: usize,
    pub urgent_keywords: usize,
    pub method: SentimentMethod,
}

impl Sentiment {
    /// Neutral sentiment with no keyword evidence.
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.5,
            urgency: Urgency::Low,
            positive_keywords: 0,
            negative_keywords: 0,
            urgent_keywords: 0,
            method: SentimentMethod::Rules,
        }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Record metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub processing_time: DateTime<Local>,
    pub document_type: DocumentType,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Raw and per-configuration text of a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextSection {
    /// Selected transcription.
    pub raw_text: String,
    /// Per-configuration transcriptions, for auditing the selection.
    pub detailed_text: BTreeMap<String, String>,
}

/// Aggregate result for one processed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub metadata: DocumentMetadata,
    pub text: TextSection,
    pub entities: EntityBundle,
    pub financial_data: FieldBundle,
    pub sentiment: Sentiment,
}

impl DocumentRecord {
    /// A record for a document the pipeline could not read.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            metadata: DocumentMetadata {
                processing_time: Local::now(),
                document_type: DocumentType::Unknown,
                success: false,
                error: Some(error.into()),
            },
            text: TextSection::default(),
            entities: EntityBundle::default(),
            financial_data: FieldBundle::default(),
            sentiment: Sentiment::neutral(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.metadata.success
    }

    pub fn error(&self) -> Option<&str> {
        self.metadata.error.as_deref()
    }
}

/// One row of a batch summary report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub document_type: String,
    pub processing_time: String,
    pub total_amount: String,
    pub tax_amount: String,
    pub date: String,
    pub sentiment: String,
    pub urgency: String,
}

impl SummaryRow {
    pub fn from_record(record: &DocumentRecord) -> Self {
        let first = |set: &BTreeSet<String>| set.iter().next().cloned().unwrap_or_default();

        Self {
            document_type: record.metadata.document_type.to_string(),
            processing_time: record.metadata.processing_time.to_rfc3339(),
            total_amount: first(&record.financial_data.totals),
            tax_amount: first(&record.financial_data.taxes),
            date: first(&record.financial_data.dates),
            sentiment: record.sentiment.label.to_string(),
            urgency: record.sentiment.urgency.to_string(),
        }
    }
}
