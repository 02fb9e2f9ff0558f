//! Command implementations for the Lifeline CLI.
//!
//! # Responsibility
//! - Run the batch import and print human-readable progress.
//! - Write a fresh seed store from a JSON event array.
//!
//! # Invariants
//! - Import: per-file failures are reported and never abort the run.
//! - Seed: the input is parsed fully before any write; a parse failure
//!   terminates with a non-zero exit code and no partial store.

use anyhow::{Context, Result};
use lifeline_core::{
    ImportConfig, ImportService, TimelineDocument, TimelineEvent, TimelineStore,
};
use std::io::Read;
use std::path::{Path, PathBuf};

const MAX_LISTED_EVENTS: usize = 10;

/// Runs the full import pipeline and prints per-file and summary progress.
pub fn cmd_import(export_dir: PathBuf, data_dir: PathBuf, cutoff_year: i32) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("Scanning export at {}", export_dir.display());
    println!("Keeping only records about the designated subjects");
    println!("{}", "=".repeat(60));

    let mut config = ImportConfig::new(export_dir, data_dir);
    config.cutoff_year = cutoff_year;
    let store_path = config.store_path();

    let outcome = ImportService::with_default_rules(config)
        .run()
        .context("import run failed")?;

    for file in &outcome.files {
        match &file.error {
            Some(error) => println!("  ✗ {}: {error}", file.path.display()),
            None => println!(
                "  ✓ {}: {} posts, {} kept",
                file.path.display(),
                file.posts,
                file.kept
            ),
        }
    }

    println!(
        "\nFound {} new events ({} duplicates skipped), copied {} images",
        outcome.added.len(),
        outcome.duplicates_skipped,
        outcome.copied_images
    );
    for event in &outcome.added {
        for image in &event.images {
            println!("  ✓ copied {} -> {}", image.name, image.path);
        }
    }
    println!(
        "Store now holds {} events ({} existing, {} new)",
        outcome.total_events,
        outcome.existing_events,
        outcome.added.len()
    );
    println!("Saved to {}", store_path.display());

    if !outcome.added.is_empty() {
        println!("\nNew events:");
        for (index, event) in outcome.added.iter().take(MAX_LISTED_EVENTS).enumerate() {
            println!(
                "{}. {} - {} - {}",
                index + 1,
                event.date,
                event.kind.as_str(),
                event.title
            );
        }
        if outcome.added.len() > MAX_LISTED_EVENTS {
            println!("... and {} more", outcome.added.len() - MAX_LISTED_EVENTS);
        }
    }

    Ok(())
}

/// Writes a fresh store document from a JSON array of timeline events.
///
/// Reads standard input with `--from-stdin`, else the `--input` file. The
/// resulting store carries `lastSaved: null` and is a full overwrite.
pub fn cmd_seed(out: &Path, from_stdin: bool, input: Option<&Path>) -> Result<()> {
    let payload = if from_stdin {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("cannot read standard input")?;
        buffer
    } else {
        let path = input.context("seed requires --from-stdin or --input <FILE>")?;
        std::fs::read_to_string(path)
            .with_context(|| format!("cannot read seed file `{}`", path.display()))?
    };

    let events: Vec<TimelineEvent> =
        serde_json::from_str(&payload).context("seed payload is not a valid event array")?;

    let document = TimelineDocument {
        timeline_events: events,
        last_saved: None,
        ..TimelineDocument::default()
    };
    let store = TimelineStore::new(out);
    store
        .write(&document)
        .context("cannot write seed store")?;

    println!(
        "Wrote {} events to {}",
        document.timeline_events.len(),
        out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::cmd_seed;
    use serde_json::Value;
    use std::fs;

    const EVENT_ARRAY: &str = r#"[
        {
            "id": 1615712400000,
            "date": "14/03/2021",
            "dateParsed": {
                "original": "14/03/2021",
                "date": "2021-03-14T09:00:00.000Z",
                "year": 2021, "month": 3, "day": 14,
                "format": "DD/MM/YYYY"
            },
            "type": "dating",
            "title": "Ăn tối cùng vợ",
            "description": ""
        }
    ]"#;

    #[test]
    fn seed_writes_overwrite_document_with_null_last_saved() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("events.json");
        let out = dir.path().join("data").join("timeline.json");
        fs::write(&input, EVENT_ARRAY).unwrap();

        cmd_seed(&out, false, Some(&input)).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert!(value["lastSaved"].is_null());
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["timelineEvents"][0]["title"], "Ăn tối cùng vợ");
        assert_eq!(value["timelineEvents"][0]["type"], "dating");
    }

    #[test]
    fn seed_rejects_malformed_payload_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("events.json");
        let out = dir.path().join("timeline.json");
        fs::write(&input, "][ not an event array").unwrap();

        assert!(cmd_seed(&out, false, Some(&input)).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn seed_requires_an_input_source() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("timeline.json");
        assert!(cmd_seed(&out, false, None).is_err());
        assert!(!out.exists());
    }
}
