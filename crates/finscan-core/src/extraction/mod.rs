//! Text analysis: document classification and pattern-based field extraction.

mod classifier;
mod entities;
mod financial;
pub mod patterns;

pub use classifier::DocumentClassifier;
pub use entities::EntityExtractor;
pub use financial::FinancialExtractor;

/// A pure analysis over transcription text.
pub trait TextExtractor {
    /// The value produced from the text.
    type Output;

    fn extract(&self, text: &str) -> Self::Output;
}
