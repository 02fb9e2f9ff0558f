//! Import run orchestration.
//!
//! # Responsibility
//! - Drive one batch run: scan export files, gate each record, dedup
//!   against the store snapshot, relocate media, save the merged store.
//! - Report per-file and aggregate outcomes for console progress.
//!
//! # Invariants
//! - Malformed files contribute zero events and never abort the run.
//! - Records without a parseable timestamp, or dated before the cutoff
//!   year, are silently skipped.
//! - Media relocation failures drop single image references only.

use crate::classify::{categorize, classify, is_significant, synthesize_title};
use crate::export::{
    discover_post_files, extract_media_paths, extract_timestamp, read_posts_file,
    NormalizedContent,
};
use crate::import::builder::build_event;
use crate::media::relocate_event_images;
use crate::model::event::{format_display_date, TimelineEvent};
use crate::rules::RuleSet;
use crate::store::{filter_new_events, merge_events, StoreError, TimelineStore};
use chrono::{Datelike, TimeZone, Utc};
use log::{error, info};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Records dated before this year are discarded regardless of content.
pub const DEFAULT_CUTOFF_YEAR: i32 = 2015;

/// Relative location of the store file under the data directory.
const STORE_SUBPATH: &[&str] = &["data", "timeline.json"];

/// One run's filesystem layout and tunables.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Root of the bulk export to scan.
    pub export_dir: PathBuf,
    /// Destination root holding `data/timeline.json` and `public/images/`.
    pub data_dir: PathBuf,
    /// Inclusive lower bound on event years.
    pub cutoff_year: i32,
}

impl ImportConfig {
    pub fn new(export_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
            data_dir: data_dir.into(),
            cutoff_year: DEFAULT_CUTOFF_YEAR,
        }
    }

    /// Path of the persisted store file.
    pub fn store_path(&self) -> PathBuf {
        STORE_SUBPATH
            .iter()
            .fold(self.data_dir.clone(), |dir, part| dir.join(part))
    }
}

/// Import-run error; only the final store write can fail a run.
#[derive(Debug)]
pub enum ImportError {
    Store(StoreError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ImportError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Per-file scan outcome, used for console progress.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub posts: usize,
    pub kept: usize,
    /// Set when the file could not be read or parsed.
    pub error: Option<String>,
}

/// Aggregate outcome of one import run.
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub files: Vec<FileOutcome>,
    /// New events merged into the store this run, in scan order.
    pub added: Vec<TimelineEvent>,
    pub duplicates_skipped: usize,
    pub copied_images: usize,
    pub existing_events: usize,
    pub total_events: usize,
}

/// Single-run batch importer.
pub struct ImportService {
    rules: RuleSet,
    config: ImportConfig,
}

impl ImportService {
    pub fn new(rules: RuleSet, config: ImportConfig) -> Self {
        Self { rules, config }
    }

    pub fn with_default_rules(config: ImportConfig) -> Self {
        Self::new(RuleSet::default(), config)
    }

    /// Runs the whole pipeline once: scan → gates → dedup → relocate → save.
    pub fn run(&self) -> Result<ImportOutcome, ImportError> {
        let store = TimelineStore::new(self.config.store_path());
        let existing = store.load_or_default();
        info!(
            "event=run_start module=import status=ok export_dir={} existing_events={}",
            self.config.export_dir.display(),
            existing.timeline_events.len()
        );

        let (files, candidates) = self.collect_candidates();
        let candidate_count = candidates.len();
        let mut new_events = filter_new_events(&existing.timeline_events, candidates);
        let duplicates_skipped = candidate_count - new_events.len();

        let mut copied_images = 0;
        for event in &mut new_events {
            copied_images += relocate_event_images(event, &self.config.data_dir);
        }

        let existing_events = existing.timeline_events.len();
        let added = new_events.clone();
        let merged = merge_events(existing.timeline_events, new_events);
        let total_events = merged.len();
        store.save_events(merged)?;

        info!(
            "event=run_complete module=import status=ok new_events={} duplicates={} copied_images={} total={}",
            added.len(),
            duplicates_skipped,
            copied_images,
            total_events
        );

        Ok(ImportOutcome {
            files,
            added,
            duplicates_skipped,
            copied_images,
            existing_events,
            total_events,
        })
    }

    /// Scans every export file, applying the gate sequence to each record.
    fn collect_candidates(&self) -> (Vec<FileOutcome>, Vec<TimelineEvent>) {
        let mut files = Vec::new();
        let mut candidates: Vec<TimelineEvent> = Vec::new();

        for path in discover_post_files(&self.config.export_dir) {
            let posts = match read_posts_file(&path) {
                Ok(posts) => posts,
                Err(err) => {
                    error!("event=file_failed module=import status=error error={err}");
                    files.push(FileOutcome {
                        path,
                        posts: 0,
                        kept: 0,
                        error: Some(err.to_string()),
                    });
                    continue;
                }
            };

            let mut kept = 0;
            for post in &posts {
                if let Some(event) = self.evaluate_post(post, candidates.len()) {
                    info!(
                        "event=record_kept module=import status=ok date={} type={} title={}",
                        event.date,
                        event.kind.as_str(),
                        event.title
                    );
                    kept += 1;
                    candidates.push(event);
                }
            }

            files.push(FileOutcome {
                path,
                posts: posts.len(),
                kept,
                error: None,
            });
        }

        (files, candidates)
    }

    /// Applies the full gate sequence to one raw record.
    ///
    /// Gate order: timestamp/cutoff, spam, subject relatedness, excluded
    /// person, then the significance gate for media-less records.
    fn evaluate_post(&self, post: &Value, ordinal: usize) -> Option<TimelineEvent> {
        let timestamp = extract_timestamp(post)?;
        let dt = Utc.timestamp_opt(timestamp, 0).single()?;
        if dt.year() < self.config.cutoff_year {
            return None;
        }

        let content = NormalizedContent::from_post(post);
        let relevance = classify(&self.rules, &content.text, &content.tags);
        if !relevance.keeps_record() {
            return None;
        }

        let media_paths = extract_media_paths(post, &self.config.export_dir);
        if media_paths.is_empty() && !is_significant(&self.rules, &content.text) {
            // Keep only records anchored by an unambiguous primary tag or a
            // secondary-subject signal.
            let has_primary_tag = content.tags.iter().any(|tag| {
                self.rules
                    .primary_aliases
                    .iter()
                    .any(|alias| tag.contains(alias))
            });
            if !has_primary_tag && !relevance.secondary_related {
                return None;
            }
        }

        let kind = categorize(&self.rules, &content.text, &content.tags);
        let display_date = format_display_date(&dt);
        let title = synthesize_title(
            &self.rules,
            &content.text,
            relevance.secondary_related,
            &display_date,
        );

        Some(build_event(
            &dt,
            timestamp,
            ordinal,
            kind,
            title,
            content.text,
            &media_paths,
        ))
    }
}
