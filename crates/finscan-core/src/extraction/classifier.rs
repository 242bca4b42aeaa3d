//! Keyword-based document type classification.

use crate::models::document::DocumentType;

use super::TextExtractor;

const INVOICE_KEYWORDS: &[&str] = &[
    "invoice",
    "inv#",
    "inv no",
    "invoice no",
    "bill to",
    "ship to",
    "invoice date",
];

const QUOTE_KEYWORDS: &[&str] = &["quote", "quotation", "estimate", "proposal", "quote no"];

const RECEIPT_KEYWORDS: &[&str] = &[
    "receipt",
    "payment received",
    "thank you for your business",
    "paid on",
];

const BILL_KEYWORDS: &[&str] = &[
    "bill",
    "statement",
    "amount due",
    "due date",
    "account summary",
];

/// Categories in priority order. Invoices share vocabulary with bills, so
/// invoice keywords are tested first.
const PRIORITY: [(DocumentType, &[&str]); 4] = [
    (DocumentType::Invoice, INVOICE_KEYWORDS),
    (DocumentType::Quote, QUOTE_KEYWORDS),
    (DocumentType::Receipt, RECEIPT_KEYWORDS),
    (DocumentType::BillStatement, BILL_KEYWORDS),
];

/// Classifies a transcription by keyword presence.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentClassifier;

impl DocumentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> DocumentType {
        let lower = text.to_lowercase();

        PRIORITY
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(doc_type, _)| *doc_type)
            .unwrap_or(DocumentType::Unknown)
    }
}

impl TextExtractor for DocumentClassifier {
    type Output = DocumentType;

    fn extract(&self, text: &str) -> DocumentType {
        self.classify(text)
    }
}
