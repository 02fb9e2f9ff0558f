//! Timeline record assembly.
//!
//! # Responsibility
//! - Combine normalizer, categorizer and title outputs into the persisted
//!   event shape.
//!
//! # Invariants
//! - `id` is the source timestamp scaled to milliseconds plus the run
//!   ordinal modulo 1000, so records sharing a source second stay distinct.
//! - Media references are capped at [`MAX_IMAGES_PER_EVENT`] and assigned
//!   `id = event id + index`.
//! - Stored titles are capped at [`TITLE_MAX_CHARS`] characters.

use crate::classify::TITLE_MAX_CHARS;
use crate::model::event::{
    format_display_date, EventKind, ImageRef, ParsedDate, TimelineEvent, MAX_IMAGES_PER_EVENT,
};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

/// Builds one timeline event from a record that survived all gates.
///
/// `ordinal` is the record's running index within the import run; it
/// disambiguates ids for records sharing the same source second.
pub fn build_event(
    dt: &DateTime<Utc>,
    timestamp_secs: i64,
    ordinal: usize,
    kind: EventKind,
    title: String,
    description: String,
    media_paths: &[PathBuf],
) -> TimelineEvent {
    let id = timestamp_secs * 1000 + (ordinal % 1000) as i64;

    let images = media_paths
        .iter()
        .take(MAX_IMAGES_PER_EVENT)
        .enumerate()
        .map(|(index, path)| ImageRef {
            id: id + index as i64,
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_string_lossy().into_owned(),
            media_type: DEFAULT_MEDIA_TYPE.to_string(),
        })
        .collect();

    TimelineEvent {
        id,
        date: format_display_date(dt),
        date_parsed: ParsedDate::from_datetime(dt),
        kind,
        title: title.chars().take(TITLE_MAX_CHARS).collect(),
        description,
        location: String::new(),
        witnesses: String::new(),
        documents: String::new(),
        images,
    }
}

#[cfg(test)]
mod tests {
    use super::build_event;
    use crate::model::event::EventKind;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    #[test]
    fn id_scales_timestamp_and_adds_run_ordinal() {
        let dt = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
        let event = build_event(
            &dt,
            1_600_000_000,
            7,
            EventKind::Other,
            "title long enough".to_string(),
            String::new(),
            &[],
        );
        assert_eq!(event.id, 1_600_000_000_007);
    }

    #[test]
    fn images_are_capped_at_ten_with_offset_ids() {
        let dt = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
        let paths: Vec<PathBuf> = (0..15).map(|i| PathBuf::from(format!("/m/{i}.jpg"))).collect();
        let event = build_event(
            &dt,
            1_600_000_000,
            0,
            EventKind::Travel,
            "title".to_string(),
            String::new(),
            &paths,
        );
        assert_eq!(event.images.len(), 10);
        assert_eq!(event.images[0].id, event.id);
        assert_eq!(event.images[9].id, event.id + 9);
        assert_eq!(event.images[3].name, "3.jpg");
    }

    #[test]
    fn curated_fields_start_empty() {
        let dt = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
        let event = build_event(
            &dt,
            1_600_000_000,
            0,
            EventKind::Other,
            "t".to_string(),
            "body".to_string(),
            &[],
        );
        assert_eq!(event.location, "");
        assert_eq!(event.witnesses, "");
        assert_eq!(event.documents, "");
        assert_eq!(event.description, "body");
    }
}
