//! Merge/dedup engine.
//!
//! # Responsibility
//! - Reject candidates already present in the store, by exact id or by
//!   composite date+title key.
//! - Produce the concatenated collection sorted ascending by ISO date.
//!
//! # Invariants
//! - Membership keys are computed against the pre-import snapshot only;
//!   existing events never cross-deduplicate within one run.
//! - The sort key `dateParsed.date` is lexicographic == chronological.

use crate::model::event::{EventId, TimelineEvent};
use std::collections::HashSet;

/// Filters `candidates` down to events absent from `existing`.
///
/// A candidate is rejected when its id matches an existing id, or when its
/// composite key (see [`TimelineEvent::dedup_key`]) matches an existing key.
pub fn filter_new_events(
    existing: &[TimelineEvent],
    candidates: Vec<TimelineEvent>,
) -> Vec<TimelineEvent> {
    let existing_ids: HashSet<EventId> = existing.iter().map(|event| event.id).collect();
    let existing_keys: HashSet<String> = existing.iter().map(TimelineEvent::dedup_key).collect();

    candidates
        .into_iter()
        .filter(|candidate| {
            !existing_ids.contains(&candidate.id)
                && !existing_keys.contains(&candidate.dedup_key())
        })
        .collect()
}

/// Appends surviving candidates after the existing events and sorts the
/// whole collection ascending by `dateParsed.date`.
pub fn merge_events(
    existing: Vec<TimelineEvent>,
    new_events: Vec<TimelineEvent>,
) -> Vec<TimelineEvent> {
    let mut merged = existing;
    merged.extend(new_events);
    merged.sort_by(|a, b| a.date_parsed.date.cmp(&b.date_parsed.date));
    merged
}

#[cfg(test)]
mod tests {
    use super::{filter_new_events, merge_events};
    use crate::model::event::{EventKind, ParsedDate, TimelineEvent};
    use chrono::{TimeZone, Utc};

    fn event(id: i64, year: i32, title: &str) -> TimelineEvent {
        let dt = Utc.with_ymd_and_hms(year, 6, 1, 12, 0, 0).unwrap();
        TimelineEvent {
            id,
            date: format!("01/06/{year}"),
            date_parsed: ParsedDate::from_datetime(&dt),
            kind: EventKind::Other,
            title: title.to_string(),
            description: String::new(),
            location: String::new(),
            witnesses: String::new(),
            documents: String::new(),
            images: Vec::new(),
        }
    }

    #[test]
    fn candidate_with_matching_id_is_rejected() {
        let existing = vec![event(10, 2020, "an old day")];
        let survivors = filter_new_events(&existing, vec![event(10, 2021, "different title")]);
        assert!(survivors.is_empty());
    }

    #[test]
    fn candidate_with_matching_composite_key_is_rejected() {
        let existing = vec![event(10, 2020, "Cùng Vợ Đi Chơi")];
        // Same date and title modulo case; different id.
        let survivors = filter_new_events(&existing, vec![event(11, 2020, "cùng vợ đi chơi")]);
        assert!(survivors.is_empty());
    }

    #[test]
    fn distinct_candidates_survive() {
        let existing = vec![event(10, 2020, "first")];
        let survivors = filter_new_events(&existing, vec![event(11, 2021, "second")]);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].id, 11);
    }

    #[test]
    fn merge_sorts_ascending_by_iso_date() {
        let merged = merge_events(
            vec![event(3, 2022, "c"), event(1, 2018, "a")],
            vec![event(2, 2020, "b")],
        );
        let years: Vec<i32> = merged.iter().map(|e| e.date_parsed.year).collect();
        assert_eq!(years, vec![2018, 2020, 2022]);
    }

    #[test]
    fn merge_is_idempotent_for_the_same_candidate_set() {
        let existing = vec![event(1, 2018, "a")];
        let candidates = vec![event(2, 2020, "b")];

        let first = merge_events(existing, filter_new_events(&[event(1, 2018, "a")], candidates.clone()));
        let second_new = filter_new_events(&first, candidates);
        assert!(second_new.is_empty());
    }
}
