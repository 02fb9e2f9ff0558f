//! Raw record normalization.
//!
//! # Responsibility
//! - Extract the flat text blob, tag set, timestamp and media references
//!   consumed by the classification pipeline.
//! - Repair UTF-8 text that the export mis-decoded as Latin-1.
//!
//! # Invariants
//! - Text fragment order is preserved (title, post bodies, media captions).
//! - Tags are lowercased; their order is irrelevant for matching.
//! - Repair failures pass the input through unchanged, never abort.

use serde_json::Value;
use std::path::{Path, PathBuf};

/// Flat view of one raw record, consumed immediately by classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedContent {
    /// Concatenated, order-preserving extraction of all text fragments.
    pub text: String,
    /// Lowercased tag names.
    pub tags: Vec<String>,
}

impl NormalizedContent {
    /// Extracts text and tags from one raw post value.
    pub fn from_post(post: &Value) -> Self {
        Self {
            text: extract_text(post),
            tags: extract_tags(post),
        }
    }
}

/// Repairs the export's known mojibake: UTF-8 bytes mis-decoded as Latin-1.
///
/// Every char must fit one byte for the round-trip to apply; otherwise, or
/// when the recovered bytes are not valid UTF-8, the input passes through
/// unchanged.
pub fn repair_mojibake(text: &str) -> String {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let code = ch as u32;
        if code > 0xFF {
            return text.to_string();
        }
        bytes.push(code as u8);
    }
    String::from_utf8(bytes).unwrap_or_else(|_| text.to_string())
}

/// Extracts the record's epoch-seconds timestamp, if present and integral.
pub fn extract_timestamp(post: &Value) -> Option<i64> {
    post.get("timestamp").and_then(Value::as_i64)
}

/// Concatenates every text fragment of one raw post.
///
/// Fragments, in order: `title`, each `data[].post`, each attachment media
/// description. Non-object items inside the arrays are skipped.
pub fn extract_text(post: &Value) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(title) = post.get("title").and_then(Value::as_str) {
        parts.push(repair_mojibake(title));
    }

    if let Some(items) = post.get("data").and_then(Value::as_array) {
        for item in items {
            if let Some(body) = item.get("post").and_then(Value::as_str) {
                parts.push(repair_mojibake(body));
            }
        }
    }

    for media in attachment_media(post) {
        if let Some(description) = media.get("description").and_then(Value::as_str) {
            parts.push(repair_mojibake(description));
        }
    }

    parts.join(" ")
}

/// Extracts lowercased tag names from `tags[].name`.
pub fn extract_tags(post: &Value) -> Vec<String> {
    let Some(tags) = post.get("tags").and_then(Value::as_array) else {
        return Vec::new();
    };

    tags.iter()
        .filter_map(|tag| tag.get("name").and_then(Value::as_str))
        .map(|name| repair_mojibake(name).to_lowercase())
        .collect()
}

/// Resolves attachment media URIs against the export root, keeping only
/// paths that exist on disk.
pub fn extract_media_paths(post: &Value, base_dir: &Path) -> Vec<PathBuf> {
    attachment_media(post)
        .filter_map(|media| media.get("uri").and_then(Value::as_str))
        .map(|uri| base_dir.join(uri))
        .filter(|path| path.exists())
        .collect()
}

fn attachment_media<'v>(post: &'v Value) -> impl Iterator<Item = &'v Value> {
    post.get("attachments")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|attachment| attachment.get("data").and_then(Value::as_array))
        .flatten()
        .filter_map(|item| item.get("media"))
}
