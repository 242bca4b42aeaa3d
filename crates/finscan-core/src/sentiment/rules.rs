//! Keyword-based financial sentiment.

use crate::models::document::{Sentiment, SentimentLabel, SentimentMethod, Urgency};

const POSITIVE_KEYWORDS: &[&str] = &[
    "discount",
    "save",
    "profit",
    "gain",
    "growth",
    "positive",
    "benefit",
    "advantage",
    "success",
    "approve",
    "accept",
    "thank you",
    "appreciate",
    "valued customer",
    "special offer",
    "congratulations",
    "opportunity",
    "pleasure",
    "happy",
    "satisfied",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "due",
    "overdue",
    "penalty",
    "late",
    "charge",
    "fee",
    "negative",
    "loss",
    "decline",
    "reject",
    "deny",
    "outstanding",
    "past due",
    "collection",
    "termination",
    "cancellation",
    "warning",
    "problem",
    "issue",
    "error",
    "sorry",
    "apologize",
];

const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "immediate",
    "asap",
    "important",
    "attention required",
    "final notice",
    "action required",
];

/// Number of keywords from each list present in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordCounts {
    pub positive: usize,
    pub negative: usize,
    pub urgent: usize,
}

impl KeywordCounts {
    /// Count how many keywords of each list occur (case-insensitive
    /// substring). Each keyword counts at most once.
    pub fn count(text: &str) -> Self {
        let lower = text.to_lowercase();
        let present = |keywords: &[&str]| keywords.iter().filter(|k| lower.contains(*k)).count();

        Self {
            positive: present(POSITIVE_KEYWORDS),
            negative: present(NEGATIVE_KEYWORDS),
            urgent: present(URGENT_KEYWORDS),
        }
    }

    pub fn urgency(&self) -> Urgency {
        if self.urgent > 0 { Urgency::High } else { Urgency::Low }
    }

    /// Attach label and score to these counts.
    pub fn into_sentiment(self, label: SentimentLabel, score: f32, method: SentimentMethod) -> Sentiment {
        Sentiment {
            label,
            score,
            urgency: self.urgency(),
            positive_keywords: self.positive,
            negative_keywords: self.negative,
            urgent_keywords: self.urgent,
            method,
        }
    }
}

/// Rule-based sentiment scorer. Needs nothing beyond the text.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedScorer;

impl RuleBasedScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, text: &str) -> Sentiment {
        let counts = KeywordCounts::count(text);
        let smoothed = (counts.positive + counts.negative + 1) as f32;

        let (label, score) = if counts.positive > counts.negative {
            (SentimentLabel::Positive, counts.positive as f32 / smoothed)
        } else if counts.negative > counts.positive {
            (SentimentLabel::Negative, counts.negative as f32 / smoothed)
        } else {
            (SentimentLabel::Neutral, 0.5)
        };

        counts.into_sentiment(label, score, SentimentMethod::Rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn score(text: &str) -> Sentiment {
        RuleBasedScorer::new().score(text)
    }

    #[test]
    fn test_thank_you_is_positive() {
        let s = score("Thank you for your payment. We appreciate your business.");
        assert_eq!(s.label, SentimentLabel::Positive);
        assert_eq!(s.urgency, Urgency::Low);
        assert_eq!(s.urgent_keywords, 0);
        assert_eq!(s.positive_keywords, 2);
        assert_eq!(s.negative_keywords, 0);
        assert!((s.score - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(s.method, SentimentMethod::Rules);
    }

    #[test]
    fn test_final_notice_is_urgent_and_negative() {
        let s = score("FINAL NOTICE: payment overdue, late fee applies");
        assert_eq!(s.urgency, Urgency::High);
        assert_eq!(s.label, SentimentLabel::Negative);
        // due, overdue, late, fee
        assert_eq!(s.negative_keywords, 4);
        assert_eq!(s.urgent_keywords, 1);
        assert!((s.score - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_balanced_is_neutral_half() {
        // one positive (discount), one negative (fee)
        let s = score("A discount and a fee");
        assert_eq!(s.positive_keywords, 1);
        assert_eq!(s.negative_keywords, 1);
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.score, 0.5);
    }

    #[test]
    fn test_no_keywords_is_neutral() {
        let s = score("Lorem ipsum");
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.score, 0.5);
        assert_eq!(s.urgency, Urgency::Low);
    }

    #[test]
    fn test_keyword_counted_once() {
        let once = KeywordCounts::count("fee");
        let many = KeywordCounts::count("fee fee fee FEE");
        assert_eq!(once, many);
    }

    #[test]
    fn test_label_follows_counts() {
        for text in [
            "profit and growth but a penalty",
            "late, overdue, and a problem, but thank you",
            "urgent",
            "save save",
        ] {
            let s = score(text);
            let expected = if s.positive_keywords > s.negative_keywords {
                SentimentLabel::Positive
            } else if s.negative_keywords > s.positive_keywords {
                SentimentLabel::Negative
            } else {
                SentimentLabel::Neutral
            };
            assert_eq!(s.label, expected, "text: {text}");
            assert!((0.0..=1.0).contains(&s.score));
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Important: outstanding balance, please pay ASAP";
        assert_eq!(score(text), score(text));
    }
}
