//! Batch import pipeline.
//!
//! # Responsibility
//! - Assemble normalized records that survive every classification gate
//!   into persisted timeline events.
//! - Orchestrate one whole run: scan, classify, dedup, relocate, save.
//!
//! # Invariants
//! - Strictly sequential, single pass; the store is read once at run start
//!   and written once at run end.
//! - Per-file and per-record failures are contained; only a failed store
//!   write aborts the run.

pub mod builder;
pub mod service;

pub use builder::build_event;
pub use service::{
    FileOutcome, ImportConfig, ImportError, ImportOutcome, ImportService, DEFAULT_CUTOFF_YEAR,
};
