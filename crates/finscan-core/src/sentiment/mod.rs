//! Financial sentiment and urgency scoring.
//!
//! A [`SentimentScorer`] is fixed at construction: model-backed when a
//! [`SentimentModel`] loads and passes its warm-up check, rule-based
//! otherwise. It never switches variant afterwards.

mod model;
mod rules;

pub use model::{ChunkTally, ModelBackedScorer, ModelVerdict, SentimentModel, chunk_text};
pub use rules::{KeywordCounts, RuleBasedScorer};

use tracing::{info, warn};

use crate::error::SentimentError;
use crate::models::config::SentimentConfig;
use crate::models::document::{Sentiment, SentimentMethod};

pub enum SentimentScorer {
    ModelBacked(ModelBackedScorer),
    RuleBased(RuleBasedScorer),
}

impl SentimentScorer {
    /// Choose the variant. A missing model or a failed warm-up selects the
    /// rule-based scorer and logs one warning.
    pub fn new(model: Option<Box<dyn SentimentModel>>, chunk_size: usize) -> Self {
        match model {
            Some(model) => match model.warm_up() {
                Ok(()) => {
                    info!("Using model-backed sentiment scoring");
                    Self::ModelBacked(ModelBackedScorer::new(model, chunk_size))
                }
                Err(e) => {
                    warn!("Sentiment model unavailable, using rule-based scoring: {}", e);
                    Self::RuleBased(RuleBasedScorer::new())
                }
            },
            None => {
                info!("No sentiment model configured, using rule-based scoring");
                Self::RuleBased(RuleBasedScorer::new())
            }
        }
    }

    /// Build from a fallible model loader.
    pub fn from_loader<F>(loader: F, config: &SentimentConfig) -> Self
    where
        F: FnOnce() -> Result<Box<dyn SentimentModel>, SentimentError>,
    {
        match loader() {
            Ok(model) => Self::new(Some(model), config.chunk_size),
            Err(e) => {
                warn!("Failed to load sentiment model, using rule-based scoring: {}", e);
                Self::RuleBased(RuleBasedScorer::new())
            }
        }
    }

    pub fn rule_based() -> Self {
        Self::RuleBased(RuleBasedScorer::new())
    }

    pub fn method(&self) -> SentimentMethod {
        match self {
            Self::ModelBacked(_) => SentimentMethod::Model,
            Self::RuleBased(_) => SentimentMethod::Rules,
        }
    }

    pub fn score(&self, text: &str) -> Sentiment {
        match self {
            Self::ModelBacked(scorer) => scorer.score(text),
            Self::RuleBased(scorer) => scorer.score(text),
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::rule_based()
    }
}

impl std::fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModelBacked(s) => f
                .debug_struct("ModelBacked")
                .field("chunk_size", &s.chunk_size())
                .finish(),
            Self::RuleBased(_) => f.write_str("RuleBased"),
        }
    }
}
