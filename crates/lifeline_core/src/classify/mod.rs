//! Heuristic text-classification pipeline.
//!
//! # Responsibility
//! - Decide relevance (spam, subject relatedness, excluded third parties).
//! - Score significance for media-less records.
//! - Map text content to one event category via ordered rules.
//! - Synthesize short human-readable titles.
//!
//! # Invariants
//! - All matching is a fixed, hand-authored rule set from [`crate::rules`];
//!   nothing here is trainable or probabilistic.
//! - Rule chains evaluate in declaration order; first match wins.

pub mod category;
pub mod relevance;
pub mod significance;
pub mod title;

pub use category::categorize;
pub use relevance::{classify, Relevance};
pub use significance::is_significant;
pub use title::{synthesize_title, TITLE_MAX_CHARS};
