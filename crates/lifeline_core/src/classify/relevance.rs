//! Relevance classification gates.
//!
//! # Responsibility
//! - Flag spam/advertisement records.
//! - Detect primary-subject and secondary-subject relatedness.
//! - Detect unrelated-third-party mentions with primary co-occurrence
//!   override.
//!
//! # Invariants
//! - A spam flag short-circuits every downstream gate.
//! - Tag alias matches take precedence over text patterns (tags are the
//!   most reliable signal in the export).
//! - Accented and unaccented spellings are independent table entries; no
//!   transliteration happens at match time.

use crate::rules::{contains_any, RuleSet};

/// Gate outcome for one normalized record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relevance {
    pub spam: bool,
    pub primary_related: bool,
    pub secondary_related: bool,
    pub excluded_person: bool,
}

impl Relevance {
    /// Caller decision policy: keep only non-spam records that concern a
    /// designated subject and no excluded third party.
    pub fn keeps_record(&self) -> bool {
        !self.spam && (self.primary_related || self.secondary_related) && !self.excluded_person
    }
}

/// Runs every relevance gate over one normalized record.
pub fn classify(rules: &RuleSet, text: &str, tags: &[String]) -> Relevance {
    let spam = is_spam(rules, text);
    if spam {
        return Relevance {
            spam: true,
            ..Relevance::default()
        };
    }

    Relevance {
        spam: false,
        primary_related: is_primary_related(rules, text, tags),
        secondary_related: is_secondary_related(rules, text, tags),
        excluded_person: mentions_excluded_person(rules, text),
    }
}

/// Spam/advertisement detection.
///
/// Any exclusion keyword flags spam; a URL-like token combined with a
/// call-to-action keyword also flags spam.
pub fn is_spam(rules: &RuleSet, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let text_lower = text.to_lowercase();

    if contains_any(&text_lower, &rules.spam_keywords) {
        return true;
    }

    contains_any(&text_lower, &rules.link_markers)
        && contains_any(&text_lower, &rules.call_to_action_keywords)
}

/// Primary-subject relatedness: tag alias substring, or any pattern from the
/// direct-name, birthday-congratulation or togetherness groups.
pub fn is_primary_related(rules: &RuleSet, text: &str, tags: &[String]) -> bool {
    if text.is_empty() {
        return false;
    }

    if tags
        .iter()
        .any(|tag| rules.primary_aliases.iter().any(|alias| tag.contains(alias)))
    {
        return true;
    }

    let text_lower = text.to_lowercase();
    rules
        .primary_name_patterns
        .iter()
        .chain(&rules.primary_birthday_patterns)
        .chain(&rules.primary_together_patterns)
        .any(|pattern| pattern.is_match(&text_lower))
}

/// Secondary-subject relatedness: tag alias substring, or fixed-name
/// word-boundary / relational-term patterns.
pub fn is_secondary_related(rules: &RuleSet, text: &str, tags: &[String]) -> bool {
    if text.is_empty() {
        return false;
    }

    if tags
        .iter()
        .any(|tag| rules.secondary_aliases.iter().any(|alias| tag.contains(alias)))
    {
        return true;
    }

    let text_lower = text.to_lowercase();
    rules
        .secondary_patterns
        .iter()
        .any(|pattern| pattern.is_match(&text_lower))
}

/// Excluded-person detection: a third-party relational term excludes the
/// record unless the primary subject is mentioned alongside it.
pub fn mentions_excluded_person(rules: &RuleSet, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let text_lower = text.to_lowercase();

    if !contains_any(&text_lower, &rules.excluded_person_keywords) {
        return false;
    }

    // Co-occurrence with the primary subject overrides the exclusion.
    !contains_any(&text_lower, &rules.primary_aliases)
}

#[cfg(test)]
mod tests {
    use super::{classify, is_spam, mentions_excluded_person, Relevance};
    use crate::rules::RuleSet;

    #[test]
    fn spam_short_circuits_even_with_primary_alias() {
        let rules = RuleSet::default();
        let outcome = classify(&rules, "Voucher giảm giá cho vợ yêu", &[]);
        assert!(outcome.spam);
        assert!(!outcome.primary_related);
        assert!(!outcome.keeps_record());
    }

    #[test]
    fn link_plus_call_to_action_flags_spam() {
        let rules = RuleSet::default();
        assert!(is_spam(&rules, "xem ngay http://x.vn để trúng thưởng"));
        assert!(!is_spam(&rules, "một bài viết có http://x.vn thôi"));
    }

    #[test]
    fn primary_related_via_tag_alias_substring() {
        let rules = RuleSet::default();
        let outcome = classify(&rules, "Một ngày đẹp trời", &["nương nương".to_string()]);
        assert!(outcome.primary_related);
        assert!(outcome.keeps_record());
    }

    #[test]
    fn primary_related_via_together_pattern() {
        let rules = RuleSet::default();
        let outcome = classify(&rules, "Hôm nay đi chơi với vợ cả ngày", &[]);
        assert!(outcome.primary_related);
    }

    #[test]
    fn secondary_related_via_word_boundary_name() {
        let rules = RuleSet::default();
        let outcome = classify(&rules, "Bé Bee cười suốt buổi sáng", &[]);
        assert!(outcome.secondary_related);
        // "beer" must not match the \bbee\b pattern.
        let miss = classify(&rules, "uống beer với đồng nghiệp", &[]);
        assert!(!miss.secondary_related);
    }

    #[test]
    fn excluded_person_is_overridden_by_primary_mention() {
        let rules = RuleSet::default();
        assert!(mentions_excluded_person(&rules, "đi chơi với em trai"));
        assert!(!mentions_excluded_person(
            &rules,
            "đi chơi với em trai và vợ yêu"
        ));
    }

    #[test]
    fn decision_policy_discards_unrelated_and_excluded_records() {
        let unrelated = Relevance::default();
        assert!(!unrelated.keeps_record());

        let excluded = Relevance {
            primary_related: true,
            excluded_person: true,
            ..Relevance::default()
        };
        assert!(!excluded.keeps_record());
    }
}
