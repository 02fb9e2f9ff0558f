//! Lifeline CLI: imports social-export events into the timeline store.
//!
//! # Responsibility
//! - Parse invocation flags and dispatch to the import/seed commands.
//! - Own all console progress output; diagnostics go through file logging.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{cmd_import, cmd_seed};

#[derive(Parser)]
#[command(name = "lifeline")]
#[command(about = "Extract personal life events from a social-media export into a timeline store")]
#[command(version)]
struct Cli {
    /// Log level for file diagnostics (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; no file logging when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an export, classify records and merge new events into the store
    Import {
        /// Root directory of the bulk export
        #[arg(long, value_name = "DIR")]
        export_dir: PathBuf,
        /// Destination root holding data/timeline.json and public/images/
        #[arg(long, value_name = "DIR")]
        data_dir: PathBuf,
        /// Discard records dated before this year
        #[arg(long, default_value_t = lifeline_core::DEFAULT_CUTOFF_YEAR)]
        cutoff_year: i32,
    },
    /// Write a fresh store from a JSON array of events (full overwrite)
    Seed {
        /// Store file to (over)write
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        /// Read the event array from standard input
        #[arg(long)]
        from_stdin: bool,
        /// Read the event array from a file instead of standard input
        #[arg(long, value_name = "FILE", conflicts_with = "from_stdin")]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| lifeline_core::default_log_level());
        if let Err(err) = lifeline_core::init_logging(level, &log_dir.to_string_lossy()) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    match cli.command {
        Commands::Import {
            export_dir,
            data_dir,
            cutoff_year,
        } => cmd_import(export_dir, data_dir, cutoff_year),
        Commands::Seed {
            out,
            from_stdin,
            input,
        } => cmd_seed(&out, from_stdin, input.as_deref()),
    }
}
