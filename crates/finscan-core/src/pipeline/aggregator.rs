//! Assembles per-document records and keeps the run history.

use chrono::Local;

use crate::models::document::{
    DocumentMetadata, DocumentRecord, DocumentType, EntityBundle, FieldBundle, Sentiment,
    SummaryRow, TextSection, Transcription,
};

/// Append-only history of successfully analyzed documents.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    history: Vec<DocumentRecord>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record stamped with the current local time and append it.
    pub fn aggregate(
        &mut self,
        transcription: Transcription,
        document_type: DocumentType,
        entities: EntityBundle,
        financial_data: FieldBundle,
        sentiment: Sentiment,
    ) -> DocumentRecord {
        let record = DocumentRecord {
            metadata: DocumentMetadata {
                processing_time: Local::now(),
                document_type,
                success: true,
                error: None,
            },
            text: TextSection {
                raw_text: transcription.text,
                detailed_text: transcription.alternates,
            },
            entities,
            financial_data,
            sentiment,
        };

        self.history.push(record.clone());
        record
    }

    pub fn history(&self) -> &[DocumentRecord] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// One summary row per history record, in insertion order.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.history.iter().map(SummaryRow::from_record).collect()
    }
}
