//! Entity extraction (dates, parties, money, quantities, places, products).

use std::collections::BTreeSet;

use crate::models::document::EntityBundle;

use super::TextExtractor;
use super::patterns::{ENTITY_RULES, EntityCategory, find_all};

/// Regex-based entity extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for EntityExtractor {
    type Output = EntityBundle;

    fn extract(&self, text: &str) -> EntityBundle {
        let mut bundle = EntityBundle::default();

        for (category, regex) in ENTITY_RULES.iter() {
            let set: &mut BTreeSet<String> = match category {
                EntityCategory::Date => &mut bundle.dates,
                EntityCategory::Money => &mut bundle.money,
                EntityCategory::Organization => &mut bundle.organizations,
                EntityCategory::Person => &mut bundle.persons,
                EntityCategory::Quantity => &mut bundle.quantities,
                EntityCategory::Location => &mut bundle.locations,
                EntityCategory::Product => &mut bundle.products,
            };
            set.extend(find_all(regex, text).map(str::to_string));
        }

        bundle
    }
}
