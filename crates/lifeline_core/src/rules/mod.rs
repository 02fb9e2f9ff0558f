//! Hand-authored classification rule tables.
//!
//! # Responsibility
//! - Hold every keyword list, regex group and title template used by the
//!   classification pipeline as explicit, substitutable data.
//! - Ship a default rule set carrying the curated Vietnamese/English
//!   vocabulary, with accented and unaccented spellings as independent
//!   entries.
//!
//! # Invariants
//! - Rule tables are plain data; evaluation order lives in `classify`.
//! - `category_chain` is evaluated in declaration order, first match wins.
//! - Keyword matching is case-insensitive substring membership; callers pass
//!   pre-lowercased text.

use crate::model::event::EventKind;
use regex::Regex;

/// One identifiable secondary subject (a child) with title metadata.
#[derive(Debug, Clone)]
pub struct SecondarySubject {
    /// Lowercased match token looked up in text.
    pub name: String,
    /// Capitalized form used inside synthesized titles.
    pub display_name: String,
    /// Relational label ("con trai" / "con gái") used inside titles.
    pub label: String,
}

/// Ordered categorization rule: first keyword hit yields `kind`.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub kind: EventKind,
    pub keywords: Vec<String>,
}

/// Canned title rule: applies when every `required` keyword is present.
#[derive(Debug, Clone)]
pub struct CannedTitle {
    pub required: Vec<String>,
    pub title: String,
}

/// Full rule configuration consumed by the classification pipeline.
///
/// Constructed once per run and passed by reference; tests substitute
/// reduced tables to exercise single rules in isolation.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Primary-subject alias substrings (tag and text matching).
    pub primary_aliases: Vec<String>,
    /// Direct-name mention patterns for the primary subject.
    pub primary_name_patterns: Vec<Regex>,
    /// Birthday-congratulation phrasing patterns.
    pub primary_birthday_patterns: Vec<Regex>,
    /// Togetherness phrasing patterns ("with", "together with").
    pub primary_together_patterns: Vec<Regex>,
    /// Secondary-subject alias substrings (tag matching).
    pub secondary_aliases: Vec<String>,
    /// Word-boundary name and relational-term patterns for text matching.
    pub secondary_patterns: Vec<Regex>,
    /// Identifiable secondary subjects for canned titles.
    pub secondary_subjects: Vec<SecondarySubject>,
    /// Promotional/marketing vocabulary; any hit flags spam.
    pub spam_keywords: Vec<String>,
    /// URL-like tokens; combined with a call-to-action hit they flag spam.
    pub link_markers: Vec<String>,
    /// Call-to-action subset evaluated only next to a link marker.
    pub call_to_action_keywords: Vec<String>,
    /// Third-party relational terms excluding a record unless the primary
    /// subject co-occurs.
    pub excluded_person_keywords: Vec<String>,
    /// Life-milestone vocabulary for the significance gate.
    pub significance_keywords: Vec<String>,
    /// Milestone-month phrasing, checked before the category chain.
    pub milestone_month_keywords: Vec<String>,
    /// Birthday phrasing used by title synthesis.
    pub birthday_keywords: Vec<String>,
    /// Ordered category rules, evaluated after the milestone-month check.
    pub category_chain: Vec<CategoryRule>,
    /// Boilerplate phrase patterns stripped from title heads.
    pub boilerplate_patterns: Vec<Regex>,
    /// Meaningless placeholder titles forcing regeneration.
    pub placeholder_titles: Vec<String>,
    /// Birthday-congratulation keywords triggering the primary canned title.
    pub primary_birthday_keywords: Vec<String>,
    /// Canned title for primary-subject birthday congratulations.
    pub primary_birthday_title: String,
    /// Ordered canned titles for primary-subject rescue synthesis.
    pub canned_primary_titles: Vec<CannedTitle>,
    /// Template for an identified secondary subject's milestone month.
    /// Supports `{label}` and `{name}` substitution.
    pub milestone_named_title: String,
    pub milestone_generic_title: String,
    /// Template for an identified secondary subject's birthday.
    pub birthday_named_title: String,
    pub birthday_generic_title: String,
    /// Synthetic last-resort titles, suffixed with the formatted date.
    pub fallback_primary_title: String,
    pub fallback_secondary_title: String,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn patterns(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|src| Regex::new(src).expect("valid rule pattern"))
        .collect()
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            primary_aliases: strings(&[
                "nương nương",
                "nuong nuong",
                "nuongnuong",
                "vợ yêu",
                "vo yeu",
                "em yêu",
                "em yeu",
            ]),
            primary_name_patterns: patterns(&[
                r"vợ\s+yêu",
                r"vo\s+yeu",
                r"em\s+yêu",
                r"em\s+yeu",
                r"nương\s+nương",
                r"nuong\s+nuong",
                r"cùng\s+với\s+nương",
                r"cung\s+voi\s+nuong",
                r"với\s+nương",
                r"voi\s+nuong",
                r"vợ\s+@",
                r"vo\s+@",
            ]),
            primary_birthday_patterns: patterns(&[
                r"chúc\s+mừng\s+sinh\s+nhật\s+vợ",
                r"chuc\s+mung\s+sinh\s+nhat\s+vo",
                r"happy\s+birthday\s+.*vợ",
                r"happy\s+birthday\s+.*vo",
                r"sinh\s+nhật\s+vợ",
                r"sinh\s+nhat\s+vo",
            ]),
            primary_together_patterns: patterns(&[
                r"cùng\s+vợ",
                r"cung\s+vo",
                r"với\s+vợ",
                r"voi\s+vo",
                r"ăn\s+tối\s+cùng\s+vợ",
                r"an\s+toi\s+cung\s+vo",
                r"đi\s+chơi\s+với\s+vợ",
                r"di\s+choi\s+voi\s+vo",
            ]),
            secondary_aliases: strings(&[
                "bee", "sam", "con trai", "con gái", "con gai", "son", "daughter",
            ]),
            secondary_patterns: patterns(&[
                r"\bbee\b",
                r"\bsam\b",
                r"con\s+trai",
                r"con\s+gái",
                r"con\s+gai",
                r"ku\s+bee",
                r"ku\s+sam",
                r"bé\s+bee",
                r"bé\s+sam",
            ]),
            secondary_subjects: vec![
                SecondarySubject {
                    name: "bee".to_string(),
                    display_name: "Bee".to_string(),
                    label: "con trai".to_string(),
                },
                SecondarySubject {
                    name: "sam".to_string(),
                    display_name: "Sam".to_string(),
                    label: "con gái".to_string(),
                },
            ],
            spam_keywords: strings(&[
                "vnreview",
                "lenovo",
                "vibe",
                "vob",
                "lvs",
                "lvx",
                "đăng ký",
                "dang ky",
                "mã số",
                "ma so",
                "kết quả trúng thưởng",
                "ket qua trung thuong",
                "nhận quà",
                "nhan qua",
                "chương trình",
                "chuong trinh",
                "voucher",
                "nhommua",
                "affiliate",
                "đề xuất",
                "de xuat",
            ]),
            link_markers: strings(&["http", "www."]),
            call_to_action_keywords: strings(&[
                "đăng ký",
                "mã số",
                "trúng thưởng",
                "nhận quà",
            ]),
            excluded_person_keywords: strings(&[
                "em trai",
                "em gái",
                "em gai",
                "anh trai",
                "chị gái",
                "chi gai",
                "brother",
                "sister",
                "bạn bè",
                "ban be",
                "friend",
            ]),
            significance_keywords: strings(&[
                "cưới",
                "cuoi",
                "wedding",
                "kết hôn",
                "ket hon",
                "đính hôn",
                "dinh hon",
                "engagement",
                "sinh",
                "birth",
                "mang thai",
                "pregnancy",
                "kỷ niệm",
                "ky niem",
                "anniversary",
                "du lịch",
                "du lich",
                "travel",
                "trip",
                "chúc mừng sinh nhật",
                "happy birthday",
                "đầy tháng",
                "day thang",
                "tròn 1 tháng",
                "tron 1 thang",
                "full month",
                "tạm biệt",
                "tam biet",
                "goodbye",
                "ăn tối",
                "an toi",
                "dinner",
                "check in",
                "checkin",
            ]),
            milestone_month_keywords: strings(&[
                "đầy tháng",
                "day thang",
                "tròn 1 tháng",
                "tron 1 thang",
                "full month",
            ]),
            birthday_keywords: strings(&["sinh nhật", "sinh nhat", "birthday"]),
            category_chain: vec![
                CategoryRule {
                    kind: EventKind::Wedding,
                    keywords: strings(&["cưới", "cuoi", "wedding", "kết hôn", "ket hon"]),
                },
                CategoryRule {
                    kind: EventKind::Engagement,
                    keywords: strings(&["đính hôn", "dinh hon", "engagement"]),
                },
                CategoryRule {
                    kind: EventKind::Birth,
                    keywords: strings(&["sinh", "birth"]),
                },
                CategoryRule {
                    kind: EventKind::Pregnancy,
                    keywords: strings(&["mang thai", "pregnancy"]),
                },
                CategoryRule {
                    kind: EventKind::Travel,
                    keywords: strings(&["du lịch", "du lich", "travel", "trip", "đi chơi"]),
                },
                CategoryRule {
                    kind: EventKind::Anniversary,
                    keywords: strings(&["kỷ niệm", "ky niem", "anniversary"]),
                },
                CategoryRule {
                    kind: EventKind::Birth,
                    keywords: strings(&["chúc mừng sinh nhật", "happy birthday", "sinh nhật"]),
                },
                CategoryRule {
                    kind: EventKind::ConfessLove,
                    keywords: strings(&[
                        "nhận lời yêu",
                        "nhan loi yeu",
                        "chấp nhận yêu",
                        "chap nhan yeu",
                        "đồng ý yêu",
                        "dong y yeu",
                    ]),
                },
                CategoryRule {
                    kind: EventKind::Dating,
                    keywords: strings(&["ăn tối", "an toi", "dinner", "check in"]),
                },
                CategoryRule {
                    kind: EventKind::Dating,
                    keywords: strings(&["hẹn hò", "hen ho", "dating"]),
                },
                CategoryRule {
                    kind: EventKind::FirstMeet,
                    keywords: strings(&["gặp", "gap", "meet", "lần đầu"]),
                },
            ],
            boilerplate_patterns: patterns(&[
                // Anchored variants also strip the actor-name prefix.
                r"(?i)^[^.!?\n]*đã\s+thêm[^.!?\n]*ảnh",
                r"(?i)^[^.!?\n]*đã\s+(?:chia\s+sẻ|đăng)[^.!?\n]*\.",
                r"(?i)đã\s+thêm[^.!?\n]*ảnh",
                r"(?i)đã\s+chia\s+sẻ.*?\.",
                r"(?i)đã\s+đăng.*?\.",
                r"(?i)đang.*?\.",
            ]),
            placeholder_titles: strings(&["checkin", "check in", "sự kiện"]),
            primary_birthday_keywords: strings(&["chúc mừng sinh nhật", "happy birthday"]),
            primary_birthday_title: "Chúc mừng sinh nhật vợ yêu".to_string(),
            canned_primary_titles: vec![
                CannedTitle {
                    required: strings(&["chúc mừng sinh nhật"]),
                    title: "Chúc mừng sinh nhật vợ yêu".to_string(),
                },
                CannedTitle {
                    required: strings(&["happy birthday"]),
                    title: "Chúc mừng sinh nhật vợ yêu".to_string(),
                },
                CannedTitle {
                    required: strings(&["cùng", "vợ"]),
                    title: "Cùng vợ đi chơi".to_string(),
                },
                CannedTitle {
                    required: strings(&["ăn tối"]),
                    title: "Ăn tối cùng vợ".to_string(),
                },
                CannedTitle {
                    required: strings(&["du lịch"]),
                    title: "Du lịch cùng vợ".to_string(),
                },
                CannedTitle {
                    required: strings(&["travel"]),
                    title: "Du lịch cùng vợ".to_string(),
                },
                CannedTitle {
                    required: strings(&["kỷ niệm"]),
                    title: "Kỷ niệm với vợ".to_string(),
                },
                CannedTitle {
                    required: strings(&["anniversary"]),
                    title: "Kỷ niệm với vợ".to_string(),
                },
            ],
            milestone_named_title: "Đầy tháng {label} ({name})".to_string(),
            milestone_generic_title: "Đầy tháng con".to_string(),
            birthday_named_title: "Sinh nhật {label} ({name})".to_string(),
            birthday_generic_title: "Sinh nhật con".to_string(),
            fallback_primary_title: "Sự kiện với vợ".to_string(),
            fallback_secondary_title: "Sự kiện về con".to_string(),
        }
    }
}

impl RuleSet {
    /// Returns the first configured secondary subject named in `text_lower`.
    pub fn identify_secondary_subject(&self, text_lower: &str) -> Option<&SecondarySubject> {
        self.secondary_subjects
            .iter()
            .find(|subject| text_lower.contains(subject.name.as_str()))
    }
}

/// Case-insensitive substring membership against a keyword table.
///
/// `text_lower` must already be lowercased; keywords are stored lowercased.
pub fn contains_any(text_lower: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| text_lower.contains(kw.as_str()))
}

#[cfg(test)]
mod tests {
    use super::{contains_any, RuleSet};
    use crate::model::event::EventKind;

    #[test]
    fn default_rule_set_compiles_all_patterns() {
        let rules = RuleSet::default();
        assert!(!rules.primary_name_patterns.is_empty());
        assert!(!rules.secondary_patterns.is_empty());
        assert!(!rules.boilerplate_patterns.is_empty());
    }

    #[test]
    fn category_chain_starts_with_wedding_and_ends_with_first_meet() {
        let rules = RuleSet::default();
        assert_eq!(rules.category_chain.first().unwrap().kind, EventKind::Wedding);
        assert_eq!(rules.category_chain.last().unwrap().kind, EventKind::FirstMeet);
    }

    #[test]
    fn contains_any_is_substring_membership() {
        let rules = RuleSet::default();
        assert!(contains_any("nhận quà ngay hôm nay", &rules.spam_keywords));
        assert!(!contains_any("một ngày bình thường", &rules.spam_keywords));
    }

    #[test]
    fn identify_secondary_subject_finds_first_named_child() {
        let rules = RuleSet::default();
        let subject = rules.identify_secondary_subject("đầy tháng bé bee").unwrap();
        assert_eq!(subject.display_name, "Bee");
        assert!(rules.identify_secondary_subject("không có tên").is_none());
    }
}
