//! Media relocation into the date/type-partitioned destination tree.
//!
//! # Responsibility
//! - Copy referenced media files under
//!   `<root>/public/images/<YYYY-MM-DD>-<type>/` with collision-safe names.
//! - Rewrite event media references to the relocated relative paths.
//!
//! # Invariants
//! - A missing or uncopyable source yields `None` after logging; the error
//!   never propagates past this boundary.
//! - Destination directory creation is idempotent.
//! - A failed relocation drops only that image reference, never the event.

use crate::model::event::TimelineEvent;
use chrono::Utc;
use log::{info, warn};
use std::path::Path;

const IMAGES_SUBDIR: &[&str] = &["public", "images"];

/// Copies one media file into the destination tree.
///
/// Folder name is `{YYYY-MM-DD}-{kind}` derived from the ISO date's date
/// portion (display-form DD/MM/YYYY input is converted). The destination
/// file name is prefixed with the current epoch milliseconds so repeated
/// runs never collide. Returns the root-relative stored path.
pub fn relocate(source: &Path, iso_date: &str, kind: &str, dest_root: &Path) -> Option<String> {
    if !source.exists() {
        warn!(
            "event=media_missing module=media status=error source={}",
            source.display()
        );
        return None;
    }

    let folder_name = format!("{}-{kind}", date_folder_part(iso_date));
    let dest_dir = IMAGES_SUBDIR
        .iter()
        .fold(dest_root.to_path_buf(), |dir, part| dir.join(part))
        .join(&folder_name);
    if let Err(err) = std::fs::create_dir_all(&dest_dir) {
        warn!(
            "event=media_dir_failed module=media status=error dir={} error={err}",
            dest_dir.display()
        );
        return None;
    }

    let original_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "media".to_string());
    let file_name = format!("{}-{original_name}", Utc::now().timestamp_millis());
    let dest_path = dest_dir.join(&file_name);

    if let Err(err) = std::fs::copy(source, &dest_path) {
        warn!(
            "event=media_copy_failed module=media status=error source={} dest={} error={err}",
            source.display(),
            dest_path.display()
        );
        return None;
    }

    info!(
        "event=media_copied module=media status=ok source={} dest={}",
        source.display(),
        dest_path.display()
    );
    Some(format!("/images/{folder_name}/{file_name}"))
}

/// Relocates every image of one event, rewriting surviving references and
/// dropping failed ones. Returns the number of copied files.
pub fn relocate_event_images(event: &mut TimelineEvent, dest_root: &Path) -> usize {
    let iso_date = event.date_parsed.date.clone();
    let kind = event.kind.as_str();

    let mut relocated = Vec::with_capacity(event.images.len());
    for mut image in event.images.drain(..) {
        let source = Path::new(&image.path).to_path_buf();
        if let Some(relative) = relocate(&source, &iso_date, kind, dest_root) {
            image.path = relative;
            relocated.push(image);
        }
    }

    let copied = relocated.len();
    event.images = relocated;
    copied
}

/// Extracts the `YYYY-MM-DD` folder part from an ISO timestamp, converting a
/// DD/MM/YYYY display string when one is passed instead.
fn date_folder_part(date: &str) -> String {
    let date_str = date.split('T').next().unwrap_or(date);
    let parts: Vec<&str> = date_str.split('/').collect();
    if parts.len() == 3 {
        return format!("{}-{}-{}", parts[2], parts[1], parts[0]);
    }
    date_str.to_string()
}

#[cfg(test)]
mod tests {
    use super::{date_folder_part, relocate};
    use std::path::Path;

    #[test]
    fn folder_part_takes_iso_date_portion() {
        assert_eq!(date_folder_part("2021-03-14T09:00:00.000Z"), "2021-03-14");
    }

    #[test]
    fn folder_part_converts_display_dates() {
        assert_eq!(date_folder_part("14/03/2021"), "2021-03-14");
    }

    #[test]
    fn missing_source_returns_none() {
        let result = relocate(
            Path::new("/nonexistent/source.jpg"),
            "2021-03-14T09:00:00.000Z",
            "travel",
            Path::new("/tmp"),
        );
        assert_eq!(result, None);
    }
}
