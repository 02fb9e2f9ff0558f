//! Raw export ingestion boundary.
//!
//! # Responsibility
//! - Read bulk-export JSON files in their several on-disk shapes.
//! - Normalize one raw record into a flat text blob plus a tag set.
//! - Repair the export's known text-encoding mis-decoding.
//!
//! # Invariants
//! - The export's JSON shape is an input contract, not domain logic; records
//!   stay `serde_json::Value` until the import service consumes them.
//! - Per-file read/parse failures are reported to the caller and never abort
//!   a whole run.

pub mod normalize;
pub mod reader;

pub use normalize::{
    extract_media_paths, extract_tags, extract_text, extract_timestamp, repair_mojibake,
    NormalizedContent,
};
pub use reader::{discover_post_files, read_posts_file, ExportError, ExportResult};
