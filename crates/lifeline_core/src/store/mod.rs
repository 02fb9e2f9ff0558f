//! Persisted timeline store and merge engine.
//!
//! # Responsibility
//! - Load and save the JSON store document.
//! - Filter incoming candidates against the pre-import snapshot and produce
//!   the unioned, date-sorted collection.
//!
//! # Invariants
//! - Existing events are never mutated or removed by an import run.
//! - Saves replace the whole document via write-to-temp-then-rename.
//! - The store assumes a single writer per run; no lock is taken.

pub mod merge;
pub mod timeline_store;

pub use merge::{filter_new_events, merge_events};
pub use timeline_store::{StoreError, StoreResult, TimelineDocument, TimelineStore, STORE_VERSION};
