//! Significance scoring for media-less records.
//!
//! # Responsibility
//! - Decide whether a relevance-passing record is important enough to keep
//!   when it carries no attached media.
//!
//! # Invariants
//! - Membership test is case-insensitive substring over the fixed
//!   life-milestone table, both spelling variants included.
//! - Records with media never reach this gate.

use crate::rules::{contains_any, RuleSet};

/// True iff the text names any life-milestone keyword.
pub fn is_significant(rules: &RuleSet, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    contains_any(&text.to_lowercase(), &rules.significance_keywords)
}

#[cfg(test)]
mod tests {
    use super::is_significant;
    use crate::rules::RuleSet;

    #[test]
    fn milestone_keywords_are_significant_in_both_spellings() {
        let rules = RuleSet::default();
        assert!(is_significant(&rules, "Kỷ niệm 5 năm ngày cưới"));
        assert!(is_significant(&rules, "ky niem 5 nam ngay cuoi"));
        assert!(is_significant(&rules, "Happy Birthday! Chúc mừng sinh nhật"));
    }

    #[test]
    fn ordinary_text_is_not_significant() {
        let rules = RuleSet::default();
        assert!(!is_significant(&rules, "Hôm nay trời đẹp quá"));
        assert!(!is_significant(&rules, ""));
    }
}
