//! Model-backed sentiment scoring with chunked majority voting.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SentimentError;
use crate::models::document::{Sentiment, SentimentLabel, SentimentMethod};

use super::rules::KeywordCounts;

/// Label and confidence returned by a sentiment model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelVerdict {
    pub label: SentimentLabel,
    pub score: f32,
}

/// External sentiment model capability.
pub trait SentimentModel: Send + Sync {
    /// Initialization check. A failure here disables the model for the run.
    fn warm_up(&self) -> Result<(), SentimentError> {
        Ok(())
    }

    /// Score one piece of text.
    fn classify(&self, text: &str) -> Result<ModelVerdict, SentimentError>;
}

/// Per-chunk vote tally for long texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkTally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Chunks the model failed on, excluded from the vote.
    pub failed: usize,
}

impl ChunkTally {
    /// Chunks that contributed a vote.
    pub fn scored(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Majority between positive and negative votes; ties go negative.
    pub fn verdict(&self) -> ModelVerdict {
        let scored = self.scored();
        if scored == 0 {
            return ModelVerdict {
                label: SentimentLabel::Neutral,
                score: 0.5,
            };
        }

        if self.positive > self.negative {
            ModelVerdict {
                label: SentimentLabel::Positive,
                score: self.positive as f32 / scored as f32,
            }
        } else {
            ModelVerdict {
                label: SentimentLabel::Negative,
                score: self.negative as f32 / scored as f32,
            }
        }
    }
}

/// Split text into chunks of `size` characters; only the last may be shorter.
pub fn chunk_text(text: &str, size: usize) -> Vec<String> {
    let size = size.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(size).map(|c| c.iter().collect()).collect()
}

/// Scorer delegating polarity to a [`SentimentModel`].
pub struct ModelBackedScorer {
    model: Box<dyn SentimentModel>,
    chunk_size: usize,
}

impl ModelBackedScorer {
    pub fn new(model: Box<dyn SentimentModel>, chunk_size: usize) -> Self {
        Self {
            model,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Vote over the chunks of a long text.
    pub fn tally(&self, text: &str) -> ChunkTally {
        let mut tally = ChunkTally::default();

        for (i, chunk) in chunk_text(text, self.chunk_size).iter().enumerate() {
            match self.model.classify(chunk) {
                Ok(verdict) => match verdict.label {
                    SentimentLabel::Positive => tally.positive += 1,
                    SentimentLabel::Negative => tally.negative += 1,
                    SentimentLabel::Neutral => tally.neutral += 1,
                },
                Err(e) => {
                    debug!("Sentiment model failed on chunk {}: {}", i, e);
                    tally.failed += 1;
                }
            }
        }

        tally
    }

    pub fn score(&self, text: &str) -> Sentiment {
        let verdict = if text.chars().count() > self.chunk_size {
            let tally = self.tally(text);
            debug!(
                "Chunk votes: {} positive, {} negative, {} neutral, {} failed",
                tally.positive, tally.negative, tally.neutral, tally.failed
            );
            tally.verdict()
        } else {
            self.model.classify(text).unwrap_or_else(|e| {
                warn!("Sentiment model failed: {}", e);
                ModelVerdict {
                    label: SentimentLabel::Neutral,
                    score: 0.5,
                }
            })
        };

        KeywordCounts::count(text).into_sentiment(
            verdict.label,
            verdict.score.clamp(0.0, 1.0),
            SentimentMethod::Model,
        )
    }
}
