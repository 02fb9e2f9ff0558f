//! Core domain logic for Lifeline: extracting personal life events from a
//! bulk social-media export and merging them into a deduplicated,
//! chronologically ordered timeline store.
//! This crate is the single source of truth for classification invariants.

pub mod classify;
pub mod export;
pub mod import;
pub mod logging;
pub mod media;
pub mod model;
pub mod rules;
pub mod store;

pub use classify::{categorize, classify, is_significant, synthesize_title, Relevance};
pub use import::{ImportConfig, ImportError, ImportOutcome, ImportService, DEFAULT_CUTOFF_YEAR};
pub use logging::{default_log_level, init_logging};
pub use model::event::{EventKind, ImageRef, ParsedDate, TimelineEvent};
pub use rules::RuleSet;
pub use store::{StoreError, TimelineDocument, TimelineStore, STORE_VERSION};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
