//! Export file discovery and multi-shape JSON reading.
//!
//! # Responsibility
//! - Locate the fixed post files plus every album JSON under an export root.
//! - Parse one file into a list of raw post values, whatever its top-level
//!   shape (array, `posts`/`data` wrapper object, or single record).
//!
//! # Invariants
//! - Discovery never fails; missing directories yield an empty list.
//! - Read/parse errors are returned per file so the caller can contain them.

use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Fixed post files scanned under the export's posts directory.
const POST_FILES: &[&str] = &[
    "your_posts__check_ins__photos_and_videos_1.json",
    "shared_memories.json",
    "birthday_media.json",
];

/// Relative posts directory inside the export root.
const POSTS_SUBDIR: &[&str] = &["your_facebook_activity", "posts"];

/// Album subfolder scanned for additional `.json` files.
const ALBUM_SUBDIR: &str = "album";

pub type ExportResult<T> = Result<T, ExportError>;

/// Per-file export reading error.
#[derive(Debug)]
pub enum ExportError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read export file `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "malformed export file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Lists the export files to scan: the fixed post files that exist, then
/// every `.json` inside the album subfolder, in directory order.
pub fn discover_post_files(export_root: &Path) -> Vec<PathBuf> {
    let posts_dir = POSTS_SUBDIR
        .iter()
        .fold(export_root.to_path_buf(), |dir, part| dir.join(part));

    let mut files: Vec<PathBuf> = POST_FILES
        .iter()
        .map(|name| posts_dir.join(name))
        .filter(|path| path.exists())
        .collect();

    let album_dir = posts_dir.join(ALBUM_SUBDIR);
    match std::fs::read_dir(&album_dir) {
        Ok(entries) => {
            let mut album_files: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .collect();
            album_files.sort();
            files.extend(album_files);
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            warn!(
                "event=album_scan_failed module=export status=error dir={} error={err}",
                album_dir.display()
            );
        }
    }

    files
}

/// Reads one export file and returns its raw post values.
///
/// Accepted top-level shapes:
/// - array of records,
/// - object wrapping a `posts` or `data` array,
/// - anything else is treated as a single record.
pub fn read_posts_file(path: &Path) -> ExportResult<Vec<Value>> {
    let raw = std::fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(unwrap_posts(value))
}

fn unwrap_posts(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(ref map) => {
            for key in ["posts", "data"] {
                if let Some(Value::Array(items)) = map.get(key) {
                    return items.clone();
                }
            }
            vec![value]
        }
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::unwrap_posts;
    use serde_json::json;

    #[test]
    fn unwrap_accepts_top_level_array() {
        let posts = unwrap_posts(json!([{"timestamp": 1}, {"timestamp": 2}]));
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn unwrap_accepts_posts_and_data_wrappers() {
        let posts = unwrap_posts(json!({"posts": [{"timestamp": 1}]}));
        assert_eq!(posts.len(), 1);
        let data = unwrap_posts(json!({"data": [{"timestamp": 1}, {"timestamp": 2}]}));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn unwrap_falls_back_to_single_record() {
        let posts = unwrap_posts(json!({"timestamp": 1, "title": "t"}));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["title"], "t");
    }
}
