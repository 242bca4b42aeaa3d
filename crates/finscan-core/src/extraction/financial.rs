//! Financial field extraction (totals, taxes, dates, identifiers).

use std::collections::BTreeSet;

use crate::models::document::FieldBundle;

use super::TextExtractor;
use super::patterns::{FINANCIAL_RULES, FinancialCategory, find_all};

/// Regex-based financial field extractor.
///
/// Matches are literal substrings; amounts are not parsed and totals are not
/// checked against line items.
#[derive(Debug, Default, Clone, Copy)]
pub struct FinancialExtractor;

impl FinancialExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for FinancialExtractor {
    type Output = FieldBundle;

    fn extract(&self, text: &str) -> FieldBundle {
        let mut bundle = FieldBundle::default();

        for (category, regex) in FINANCIAL_RULES.iter() {
            let set: &mut BTreeSet<String> = match category {
                FinancialCategory::Total => &mut bundle.totals,
                FinancialCategory::Tax => &mut bundle.taxes,
                FinancialCategory::Date => &mut bundle.dates,
                FinancialCategory::Id => &mut bundle.ids,
            };
            set.extend(find_all(regex, text).map(str::to_string));
        }

        bundle
    }
}
