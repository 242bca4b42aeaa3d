//! Regex pattern libraries for entity and financial field extraction.
//!
//! Every pattern is compiled case-insensitive. Patterns with a capture group
//! contribute group 1; patterns without one contribute the whole match.

use lazy_static::lazy_static;
use regex::Regex;

/// Entity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Date,
    Money,
    Organization,
    Person,
    Quantity,
    Location,
    Product,
}

/// Financial field categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinancialCategory {
    Total,
    Tax,
    Date,
    Id,
}

/// Date shapes shared by both pattern libraries.
const DATE_SHAPES: [&str; 4] = [
    r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b",
    r"\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]* \d{1,2},? \d{4}\b",
    r"\b\d{1,2} (?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]* \d{4}\b",
    r"\b\d{4}-\d{2}-\d{2}\b",
];

const MONEY_SHAPES: [&str; 2] = [r"\$\d+\.?\d*", r"\d+\.?\d*\s*(?:USD|EUR|GBP|INR)"];

const ORGANIZATION_SHAPES: [&str; 7] = [
    r"(?:inc|llc|corp|corporation|limited|ltd|company|co)\.?\s+([A-Z][a-zA-Z0-9\s&]+)",
    r"([A-Z][a-zA-Z0-9\s&]+)\s+(?:inc|llc|corp|corporation|limited|ltd|company|co)\.?",
    r"payee:\s*([^\n]+)",
    r"pay to:\s*([^\n]+)",
    r"from:\s*([^\n]+)",
    r"vendor:\s*([^\n]+)",
    r"client:\s*([^\n]+)",
];

const PERSON_SHAPES: [&str; 4] = [
    r"attention:\s*([^\n]+)",
    r"attn:\s*([^\n]+)",
    r"contact:\s*([^\n]+)",
    r"dear\s+([A-Z][a-z]+\s+[A-Z][a-z]+)",
];

const QUANTITY_SHAPES: [&str; 2] = [
    r"\b(?:qty|quantity)\s*[:#]?\s*(\d+(?:\.\d+)?)",
    r"\b(\d+(?:\.\d+)?\s*(?:pcs|units|items|hours|hrs|kg|lbs))\b",
];

const LOCATION_SHAPES: [&str; 4] = [
    r"address:\s*([^\n]+)",
    r"ship to:\s*([^\n]+)",
    r"bill to:\s*([^\n]+)",
    r"location:\s*([^\n]+)",
];

const PRODUCT_SHAPES: [&str; 3] = [
    r"item:\s*([^\n]+)",
    r"product:\s*([^\n]+)",
    r"description:\s*([^\n]+)",
];

const TOTAL_SHAPES: [&str; 8] = [
    r"total.*?(\$\d+\.?\d*)",
    r"amount.*?(\$\d+\.?\d*)",
    r"balance.*?(\$\d+\.?\d*)",
    r"due.*?(\$\d+\.?\d*)",
    r"grand total.*?(\$\d+\.?\d*)",
    r"subtotal.*?(\$\d+\.?\d*)",
    r"total.*?(\d+\.?\d*)\s*(?:USD|EUR|GBP|INR)",
    r"amount.*?(\d+\.?\d*)\s*(?:USD|EUR|GBP|INR)",
];

const TAX_SHAPES: [&str; 5] = [
    r"tax.*?(\$\d+\.?\d*)",
    r"gst.*?(\$\d+\.?\d*)",
    r"vat.*?(\$\d+\.?\d*)",
    r"tax amount.*?(\$\d+\.?\d*)",
    r"tax.*?(\d+\.?\d*)\s*(?:USD|EUR|GBP|INR)",
];

const ID_SHAPES: [&str; 6] = [
    r"invoice no\.?\s*[:#]?\s*([A-Z0-9-]+)",
    r"invoice #\s*([A-Z0-9-]+)",
    r"order no\.?\s*[:#]?\s*([A-Z0-9-]+)",
    r"order #\s*([A-Z0-9-]+)",
    r"id\s*[:#]?\s*([A-Z0-9-]+)",
    r"reference no\.?\s*[:#]?\s*([A-Z0-9-]+)",
];

lazy_static! {
    /// Ordered entity rules.
    pub static ref ENTITY_RULES: Vec<(EntityCategory, Regex)> = {
        let mut rules = Vec::new();
        push_rules(&mut rules, EntityCategory::Date, &DATE_SHAPES);
        push_rules(&mut rules, EntityCategory::Money, &MONEY_SHAPES);
        push_rules(&mut rules, EntityCategory::Organization, &ORGANIZATION_SHAPES);
        push_rules(&mut rules, EntityCategory::Person, &PERSON_SHAPES);
        push_rules(&mut rules, EntityCategory::Quantity, &QUANTITY_SHAPES);
        push_rules(&mut rules, EntityCategory::Location, &LOCATION_SHAPES);
        push_rules(&mut rules, EntityCategory::Product, &PRODUCT_SHAPES);
        rules
    };

    /// Ordered financial field rules.
    pub static ref FINANCIAL_RULES: Vec<(FinancialCategory, Regex)> = {
        let mut rules = Vec::new();
        push_rules(&mut rules, FinancialCategory::Total, &TOTAL_SHAPES);
        push_rules(&mut rules, FinancialCategory::Tax, &TAX_SHAPES);
        push_rules(&mut rules, FinancialCategory::Date, &DATE_SHAPES);
        push_rules(&mut rules, FinancialCategory::Id, &ID_SHAPES);
        rules
    };
}

fn push_rules<C: Copy>(rules: &mut Vec<(C, Regex)>, category: C, shapes: &[&str]) {
    for shape in shapes {
        let regex = Regex::new(&format!("(?i){}", shape)).unwrap();
        rules.push((category, regex));
    }
}

/// All non-overlapping matches of `regex` in `text`, yielding group 1 when
/// the pattern has a group and the whole match otherwise.
pub fn find_all<'t>(regex: &'t Regex, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
    let grouped = regex.captures_len() > 1;
    regex.captures_iter(text).map(move |caps| {
        let m = if grouped { caps.get(1) } else { caps.get(0) };
        m.map_or("", |m| m.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule<C: PartialEq + Copy>(rules: &[(C, Regex)], category: C, nth: usize) -> &Regex {
        &rules.iter().filter(|(c, _)| *c == category).nth(nth).unwrap().1
    }

    #[test]
    fn test_rule_counts() {
        let count = |c| ENTITY_RULES.iter().filter(|(cat, _)| *cat == c).count();
        assert_eq!(count(EntityCategory::Date), 4);
        assert_eq!(count(EntityCategory::Money), 2);
        assert_eq!(count(EntityCategory::Organization), 7);
        assert_eq!(count(EntityCategory::Person), 4);

        let count = |c| FINANCIAL_RULES.iter().filter(|(cat, _)| *cat == c).count();
        assert_eq!(count(FinancialCategory::Total), 8);
        assert_eq!(count(FinancialCategory::Tax), 5);
        assert_eq!(count(FinancialCategory::Date), 4);
        assert_eq!(count(FinancialCategory::Id), 6);
    }

    #[test]
    fn test_find_all_whole_match_without_group() {
        let money = rule(&ENTITY_RULES, EntityCategory::Money, 1);
        let found: Vec<&str> = find_all(money, "Pay 100 USD or 85.50 EUR").collect();
        assert_eq!(found, vec!["100 USD", "85.50 EUR"]);
    }

    #[test]
    fn test_find_all_group_one() {
        let total = rule(&FINANCIAL_RULES, FinancialCategory::Total, 0);
        let found: Vec<&str> = find_all(total, "Total: $45.00 then $50.00").collect();
        assert_eq!(found, vec!["$45.00"]);
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let total = rule(&FINANCIAL_RULES, FinancialCategory::Total, 0);
        assert!(total.is_match("TOTAL $1"));
        let month = rule(&ENTITY_RULES, EntityCategory::Date, 1);
        assert!(month.is_match("JANUARY 5, 2024"));
    }

    #[test]
    fn test_lazy_total_takes_first_amount_per_line() {
        let total = rule(&FINANCIAL_RULES, FinancialCategory::Total, 0);
        let text = "Total $10.00 $20.00\nTotal $30.00";
        let found: Vec<&str> = find_all(total, text).collect();
        assert_eq!(found, vec!["$10.00", "$30.00"]);
    }
}
