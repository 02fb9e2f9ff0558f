//! JSON-file timeline store.
//!
//! # Responsibility
//! - Read the persisted store document, tolerating absence and corruption.
//! - Write the whole document durably (temp file + rename).
//!
//! # Invariants
//! - An absent store file reads as an empty document.
//! - A corrupt store file reads as an empty document after logging; the
//!   accepted tradeoff is that previously-seen events may re-import as new.
//! - `lastSaved` is stamped at write time; `version` is a fixed literal.

use crate::model::event::{format_iso_date, TimelineEvent};
use chrono::Utc;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Fixed schema version literal carried by every saved document.
pub const STORE_VERSION: &str = "1.0";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store persistence error (write path only; reads degrade to empty).
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "store io failure at `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "cannot serialize store document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

/// Top-level persisted container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDocument {
    #[serde(default)]
    pub timeline_events: Vec<TimelineEvent>,
    #[serde(default)]
    pub last_saved: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    STORE_VERSION.to_string()
}

impl Default for TimelineDocument {
    fn default() -> Self {
        Self {
            timeline_events: Vec::new(),
            last_saved: None,
            version: default_version(),
        }
    }
}

/// File-backed store for the timeline document.
pub struct TimelineStore {
    path: PathBuf,
}

impl TimelineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, degrading to an empty one on absence or parse
    /// failure (both logged; the latter as an error).
    pub fn load_or_default(&self) -> TimelineDocument {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "event=store_absent module=store status=ok path={}",
                    self.path.display()
                );
                return TimelineDocument::default();
            }
            Err(err) => {
                error!(
                    "event=store_read_failed module=store status=error path={} error={err}",
                    self.path.display()
                );
                return TimelineDocument::default();
            }
        };

        match serde_json::from_str::<TimelineDocument>(&raw) {
            Ok(document) => document,
            Err(err) => {
                error!(
                    "event=store_parse_failed module=store status=error path={} error={err}",
                    self.path.display()
                );
                TimelineDocument::default()
            }
        }
    }

    /// Stamps `lastSaved` with the current time and writes the document.
    pub fn save_events(&self, events: Vec<TimelineEvent>) -> StoreResult<TimelineDocument> {
        let document = TimelineDocument {
            timeline_events: events,
            last_saved: Some(format_iso_date(&Utc::now())),
            version: default_version(),
        };
        self.write(&document)?;
        Ok(document)
    }

    /// Writes the document as-is: pretty JSON to a temp file in the same
    /// directory, then an atomic rename over the destination.
    pub fn write(&self, document: &TimelineDocument) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let payload = serde_json::to_string_pretty(document).map_err(StoreError::Serialize)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, payload).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(
            "event=store_saved module=store status=ok path={} events={}",
            self.path.display(),
            document.timeline_events.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{TimelineDocument, TimelineStore, STORE_VERSION};

    #[test]
    fn default_document_is_empty_with_fixed_version() {
        let document = TimelineDocument::default();
        assert!(document.timeline_events.is_empty());
        assert_eq!(document.last_saved, None);
        assert_eq!(document.version, STORE_VERSION);
    }

    #[test]
    fn missing_fields_deserialize_with_defaults() {
        let document: TimelineDocument = serde_json::from_str("{}").unwrap();
        assert!(document.timeline_events.is_empty());
        assert_eq!(document.version, STORE_VERSION);
    }

    #[test]
    fn absent_file_loads_as_empty_document() {
        let store = TimelineStore::new("/nonexistent/dir/timeline.json");
        let document = store.load_or_default();
        assert!(document.timeline_events.is_empty());
    }
}
