//! Event-type categorization.
//!
//! # Responsibility
//! - Map text content to one closed event category via ordered keyword
//!   rules.
//!
//! # Invariants
//! - Milestone-month phrasing is checked before the chain: with a secondary
//!   subject signal it yields `family-event`, otherwise `birth`.
//! - The chain evaluates in declaration order; an earlier rule wins even if
//!   a later rule's keyword is also present.

use crate::classify::relevance::is_secondary_related;
use crate::model::event::EventKind;
use crate::rules::{contains_any, RuleSet};

/// Categorizes one normalized record.
pub fn categorize(rules: &RuleSet, text: &str, tags: &[String]) -> EventKind {
    let text_lower = text.to_lowercase();

    if contains_any(&text_lower, &rules.milestone_month_keywords) {
        if is_secondary_related(rules, text, tags) {
            return EventKind::FamilyEvent;
        }
        return EventKind::Birth;
    }

    for rule in &rules.category_chain {
        if contains_any(&text_lower, &rule.keywords) {
            return rule.kind;
        }
    }

    EventKind::Other
}
