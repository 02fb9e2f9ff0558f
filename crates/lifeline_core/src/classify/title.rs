//! Title synthesis.
//!
//! # Responsibility
//! - Derive a short human-readable title from record text, with
//!   category-specific canned phrasing and sentence-scan fallbacks.
//!
//! # Invariants
//! - Output never exceeds [`TITLE_MAX_CHARS`] characters; truncation past 97
//!   characters carries a `...` marker.
//! - Canned secondary-subject titles name the specific child when the text
//!   identifies one, else use the generic template.
//! - All length arithmetic counts characters, not bytes.

use crate::rules::{contains_any, RuleSet};
use once_cell::sync::Lazy;
use regex::Regex;

/// Hard cap for stored titles.
pub const TITLE_MAX_CHARS: usize = 100;

/// Characters of text considered as the initial title head.
const TITLE_HEAD_CHARS: usize = 200;

/// Titles shorter than this are regenerated.
const RESCUE_MIN_CHARS: usize = 10;

/// Cut applied to sentence-scan rescue titles.
const SENTENCE_CUT_CHARS: usize = 80;

/// Minimum sentence length accepted by the primary-subject scan.
const PRIMARY_SENTENCE_MIN_CHARS: usize = 15;

/// Minimum sentence length accepted by the secondary-subject scan.
const SECONDARY_SENTENCE_MIN_CHARS: usize = 10;

static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?\n]").expect("valid sentence split regex"));

/// Synthesizes the event title for one relevance-passing record.
///
/// `display_date` is the DD/MM/YYYY form used by the synthetic last-resort
/// template.
pub fn synthesize_title(
    rules: &RuleSet,
    text: &str,
    secondary_related: bool,
    display_date: &str,
) -> String {
    let text_lower = text.to_lowercase();

    let mut title: String = text.chars().take(TITLE_HEAD_CHARS).collect();
    for pattern in &rules.boilerplate_patterns {
        title = pattern.replace_all(&title, "").into_owned();
    }

    if secondary_related {
        if contains_any(&text_lower, &rules.milestone_month_keywords) {
            title = canned_secondary_title(
                rules,
                &text_lower,
                &rules.milestone_named_title,
                &rules.milestone_generic_title,
            );
        } else if contains_any(&text_lower, &rules.birthday_keywords) {
            title = canned_secondary_title(
                rules,
                &text_lower,
                &rules.birthday_named_title,
                &rules.birthday_generic_title,
            );
        }
    } else if contains_any(&text_lower, &rules.primary_birthday_keywords) {
        title = rules.primary_birthday_title.clone();
    }

    let mut title = title.trim().to_string();

    if needs_rescue(rules, &title) {
        title = rescue_title(rules, text, &text_lower, secondary_related);
    }

    if title.chars().count() < RESCUE_MIN_CHARS {
        let fallback = if secondary_related {
            &rules.fallback_secondary_title
        } else {
            &rules.fallback_primary_title
        };
        title = format!("{fallback} - {display_date}");
    }

    cap_title(&title)
}

fn needs_rescue(rules: &RuleSet, title: &str) -> bool {
    if title.chars().count() < RESCUE_MIN_CHARS {
        return true;
    }
    let lowered = title.to_lowercase();
    rules
        .placeholder_titles
        .iter()
        .any(|placeholder| lowered == *placeholder)
}

/// Regenerates a too-short or placeholder title from the full text.
fn rescue_title(rules: &RuleSet, text: &str, text_lower: &str, secondary_related: bool) -> String {
    if secondary_related {
        if contains_any(text_lower, &rules.milestone_month_keywords) {
            return canned_secondary_title(
                rules,
                text_lower,
                &rules.milestone_named_title,
                &rules.milestone_generic_title,
            );
        }
        if contains_any(text_lower, &rules.birthday_keywords) {
            return canned_secondary_title(
                rules,
                text_lower,
                &rules.birthday_named_title,
                &rules.birthday_generic_title,
            );
        }
        return scan_sentences(
            text,
            SECONDARY_SENTENCE_MIN_CHARS,
            |sentence_lower| contains_any(sentence_lower, &rules.secondary_aliases),
        )
        .unwrap_or_default();
    }

    for canned in &rules.canned_primary_titles {
        if canned
            .required
            .iter()
            .all(|kw| text_lower.contains(kw.as_str()))
        {
            return canned.title.clone();
        }
    }

    scan_sentences(text, PRIMARY_SENTENCE_MIN_CHARS, |sentence_lower| {
        contains_any(sentence_lower, &rules.primary_aliases)
    })
    .unwrap_or_default()
}

/// Scans sentence-like segments for the first one exceeding `min_chars` that
/// satisfies `mentions`, cut to [`SENTENCE_CUT_CHARS`].
fn scan_sentences(
    text: &str,
    min_chars: usize,
    mentions: impl Fn(&str) -> bool,
) -> Option<String> {
    SENTENCE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .find(|sentence| sentence.chars().count() > min_chars && mentions(&sentence.to_lowercase()))
        .map(|sentence| sentence.chars().take(SENTENCE_CUT_CHARS).collect())
}

fn canned_secondary_title(
    rules: &RuleSet,
    text_lower: &str,
    named_template: &str,
    generic: &str,
) -> String {
    match rules.identify_secondary_subject(text_lower) {
        Some(subject) => named_template
            .replace("{label}", &subject.label)
            .replace("{name}", &subject.display_name),
        None => generic.to_string(),
    }
}

fn cap_title(title: &str) -> String {
    if title.chars().count() > TITLE_MAX_CHARS {
        let head: String = title.chars().take(TITLE_MAX_CHARS - 3).collect();
        return format!("{head}...");
    }
    title.to_string()
}

#[cfg(test)]
mod tests {
    use super::{synthesize_title, TITLE_MAX_CHARS};
    use crate::rules::RuleSet;

    #[test]
    fn primary_birthday_text_collapses_to_canned_title() {
        let rules = RuleSet::default();
        let title = synthesize_title(
            &rules,
            "Chúc mừng sinh nhật vợ yêu của anh!",
            false,
            "14/03/2021",
        );
        assert_eq!(title, "Chúc mừng sinh nhật vợ yêu");
    }

    #[test]
    fn milestone_month_names_the_identified_child() {
        let rules = RuleSet::default();
        let title = synthesize_title(&rules, "Đầy tháng bé Bee nhà mình", true, "01/06/2022");
        assert_eq!(title, "Đầy tháng con trai (Bee)");

        let generic = synthesize_title(&rules, "Hôm nay đầy tháng con rồi", true, "01/06/2022");
        assert_eq!(generic, "Đầy tháng con");
    }

    #[test]
    fn secondary_birthday_uses_birthday_template() {
        let rules = RuleSet::default();
        let title = synthesize_title(&rules, "Sinh nhật 2 tuổi của Sam", true, "05/08/2023");
        assert_eq!(title, "Sinh nhật con gái (Sam)");
    }

    #[test]
    fn boilerplate_actor_phrases_are_stripped() {
        let rules = RuleSet::default();
        let title = synthesize_title(
            &rules,
            "đã thêm 3 ảnh Kỷ niệm chuyến đi chơi với vợ ở Đà Lạt",
            false,
            "20/07/2019",
        );
        assert_eq!(title, "Kỷ niệm chuyến đi chơi với vợ ở Đà Lạt");
    }

    #[test]
    fn leading_actor_name_is_stripped_with_the_share_phrase() {
        let rules = RuleSet::default();
        let title = synthesize_title(
            &rules,
            "Tuấn Nguyên đã chia sẻ một bài viết. Kỷ niệm ngày cưới cùng vợ yêu",
            false,
            "20/07/2019",
        );
        assert_eq!(title, "Kỷ niệm ngày cưới cùng vợ yêu");
    }

    #[test]
    fn emptied_head_is_rescued_via_sentence_scan() {
        let rules = RuleSet::default();
        // Boilerplate stripping consumes the whole head; the scan over the
        // full text then picks the sentence naming the primary subject.
        let text = "đã đăng một khoảnh khắc đáng nhớ bên nương nương ở quê nhà.";
        let title = synthesize_title(&rules, text, false, "10/10/2020");
        assert_eq!(
            title,
            "đã đăng một khoảnh khắc đáng nhớ bên nương nương ở quê nhà"
        );
    }

    #[test]
    fn placeholder_title_without_usable_sentence_gets_fallback() {
        let rules = RuleSet::default();
        let title = synthesize_title(&rules, "Check in", false, "10/10/2020");
        assert_eq!(title, "Sự kiện với vợ - 10/10/2020");
    }

    #[test]
    fn short_title_without_subject_sentence_gets_synthetic_fallback() {
        let rules = RuleSet::default();
        let title = synthesize_title(&rules, "ok", false, "02/02/2019");
        assert_eq!(title, "Sự kiện với vợ - 02/02/2019");

        let secondary = synthesize_title(&rules, "ok", true, "02/02/2019");
        assert_eq!(secondary, "Sự kiện về con - 02/02/2019");
    }

    #[test]
    fn long_titles_are_capped_with_truncation_marker() {
        let rules = RuleSet::default();
        let text = format!("Cùng với nương nương {}", "đi dạo quanh hồ ".repeat(20));
        let title = synthesize_title(&rules, &text, false, "01/01/2021");
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
        assert!(title.ends_with("..."));
    }
}
