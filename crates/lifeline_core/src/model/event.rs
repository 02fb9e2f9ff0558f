//! Timeline event domain model.
//!
//! # Responsibility
//! - Define the persisted event record, its date breakdown and media refs.
//! - Provide the composite membership key used by the merge engine.
//!
//! # Invariants
//! - `id` is stable once assigned; the import pipeline never rewrites it.
//! - `date_parsed.date` is an ISO-8601 UTC string, so lexicographic order
//!   equals chronological order.
//! - `images` holds at most [`MAX_IMAGES_PER_EVENT`] entries at creation.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Integer identifier derived from the source timestamp (milliseconds scale).
pub type EventId = i64;

/// Maximum media references attached to one event at creation time.
pub const MAX_IMAGES_PER_EVENT: usize = 10;

/// Number of title characters participating in the composite dedup key.
pub const DEDUP_TITLE_CHARS: usize = 50;

/// Display format tag stored in `dateParsed.format`.
pub const DISPLAY_DATE_FORMAT: &str = "DD/MM/YYYY";

/// Closed category enumeration for timeline events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Wedding,
    Engagement,
    Birth,
    Pregnancy,
    Travel,
    Anniversary,
    ConfessLove,
    Dating,
    FirstMeet,
    FamilyEvent,
    Other,
}

impl EventKind {
    /// Stable string form matching the persisted schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wedding => "wedding",
            Self::Engagement => "engagement",
            Self::Birth => "birth",
            Self::Pregnancy => "pregnancy",
            Self::Travel => "travel",
            Self::Anniversary => "anniversary",
            Self::ConfessLove => "confess-love",
            Self::Dating => "dating",
            Self::FirstMeet => "first-meet",
            Self::FamilyEvent => "family-event",
            Self::Other => "other",
        }
    }
}

/// Structured breakdown of the display date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDate {
    /// Same value as the event's display `date`.
    pub original: String,
    /// ISO-8601 UTC timestamp string; the store's sort key.
    pub date: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Literal tag naming the display format.
    pub format: String,
}

impl ParsedDate {
    /// Builds the breakdown from a UTC timestamp.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        Self {
            original: format_display_date(dt),
            date: format_iso_date(dt),
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            format: DISPLAY_DATE_FORMAT.to_string(),
        }
    }
}

/// One media reference attached to an event.
///
/// `path` starts as the absolute source path and is rewritten to a
/// root-relative location once the media relocator runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: EventId,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

/// Canonical persisted timeline record.
///
/// `location`, `witnesses` and `documents` are curated by hand elsewhere;
/// the import pipeline leaves them empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: EventId,
    /// Display string in DD/MM/YYYY form.
    pub date: String,
    pub date_parsed: ParsedDate,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub witnesses: String,
    #[serde(default)]
    pub documents: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

impl TimelineEvent {
    /// Composite membership key: lowercased display date plus the first
    /// [`DEDUP_TITLE_CHARS`] characters of the title.
    ///
    /// Acts as a fuzzy duplicate detector alongside exact id match, so
    /// re-imports of the same source post collide even when ids drift.
    pub fn dedup_key(&self) -> String {
        let head: String = self.title.chars().take(DEDUP_TITLE_CHARS).collect();
        format!("{}-{}", self.date, head).to_lowercase()
    }
}

/// Formats a timestamp as the DD/MM/YYYY display string.
pub fn format_display_date(dt: &DateTime<Utc>) -> String {
    dt.format("%d/%m/%Y").to_string()
}

/// Formats a timestamp as the ISO-8601 UTC sort key.
pub fn format_iso_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
