//! End-to-end document analysis.
//!
//! [`DocumentAnalyzer`] runs OCR, then the classifier, both extractors and
//! the sentiment scorer over the selected transcription, and hands the
//! results to a [`ResultAggregator`].

mod aggregator;

pub use aggregator::ResultAggregator;

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::extraction::{DocumentClassifier, EntityExtractor, FinancialExtractor, TextExtractor};
use crate::models::config::FinscanConfig;
use crate::models::document::{DocumentRecord, SummaryRow};
use crate::ocr::{ImageSource, OcrBackend, OcrEngine, TesseractCli};
use crate::sentiment::SentimentScorer;

/// Document analysis pipeline bound to one OCR backend.
pub struct DocumentAnalyzer<B: OcrBackend> {
    ocr: OcrEngine<B>,
    classifier: DocumentClassifier,
    entities: EntityExtractor,
    financial: FinancialExtractor,
    sentiment: SentimentScorer,
    aggregator: ResultAggregator,
}

impl DocumentAnalyzer<TesseractCli> {
    /// Tesseract-backed analyzer with rule-based sentiment.
    pub fn from_config(config: &FinscanConfig) -> Self {
        Self::new(OcrEngine::tesseract(&config.ocr, &config.preprocessing))
    }
}

impl<B: OcrBackend> DocumentAnalyzer<B> {
    pub fn new(ocr: OcrEngine<B>) -> Self {
        Self {
            ocr,
            classifier: DocumentClassifier::new(),
            entities: EntityExtractor::new(),
            financial: FinancialExtractor::new(),
            sentiment: SentimentScorer::rule_based(),
            aggregator: ResultAggregator::new(),
        }
    }

    /// Replace the sentiment scorer.
    pub fn with_sentiment(mut self, sentiment: SentimentScorer) -> Self {
        self.sentiment = sentiment;
        self
    }

    pub fn sentiment(&self) -> &SentimentScorer {
        &self.sentiment
    }

    pub fn aggregator(&self) -> &ResultAggregator {
        &self.aggregator
    }

    pub fn history(&self) -> &[DocumentRecord] {
        self.aggregator.history()
    }

    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.aggregator.summary_rows()
    }

    /// Analyze from an optional path and optional bytes; exactly one must be
    /// given.
    pub fn analyze_parts(&mut self, path: Option<&Path>, bytes: Option<&[u8]>) -> DocumentRecord {
        match ImageSource::from_parts(path, bytes) {
            Ok(source) => self.analyze(&source),
            Err(e) => {
                warn!("Rejected input: {}", e);
                DocumentRecord::failed(e.to_string())
            }
        }
    }

    /// Analyze one document image.
    ///
    /// Failures come back as a record with `success == false`; such records
    /// are not added to the history.
    pub fn analyze(&mut self, source: &ImageSource) -> DocumentRecord {
        let start = Instant::now();

        info!("Extracting text from image...");
        let transcription = self.ocr.extract(source);
        if !transcription.success {
            let error = transcription
                .error
                .unwrap_or_else(|| "OCR produced no transcription".to_string());
            warn!("Text extraction failed: {}", error);
            return DocumentRecord::failed(error);
        }

        let text = transcription.text.as_str();

        info!("Classifying document...");
        let document_type = self.classifier.classify(text);

        info!("Extracting entities...");
        let entities = self.entities.extract(text);

        info!("Extracting financial data...");
        let financial_data = self.financial.extract(text);

        info!("Analyzing sentiment...");
        let sentiment = self.sentiment.score(text);

        let record = self.aggregator.aggregate(
            transcription,
            document_type,
            entities,
            financial_data,
            sentiment,
        );

        info!(
            "Analyzed {} document in {}ms",
            record.metadata.document_type,
            start.elapsed().as_millis()
        );

        record
    }
}
