//! Contract review CLI
//!
//! Command-line front end for the review pipeline:
//!
//! - `extract`: turn generated report text into a structured record
//! - `moderate`: approve or reject a stored review log entry
//! - `export`: build fine-tuning examples from approved entries
//!
//! JSON goes to stdout, logs go to stderr.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;

use commands::{run_export, run_extract, run_moderate, Decision, LogOptions, DEFAULT_SYSTEM_PROMPT};
use shared_types::review_log::DEFAULT_PROMPT_VERSION;

/// Command-line arguments for the review CLI
#[derive(Parser, Debug)]
#[command(name = "review-cli")]
#[command(about = "Structured extraction and moderation of contract review reports")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a structured record from generated report text
    Extract {
        /// File holding the generated report
        #[arg(long)]
        report: PathBuf,

        /// File holding the submitted contract (used to backfill the contract type)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Extraction settings JSON
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Emit a pending review log entry for this user instead of the bare record
        #[arg(long)]
        log_user: Option<String>,

        /// Prompt version recorded in the log entry
        #[arg(long, default_value = DEFAULT_PROMPT_VERSION)]
        prompt_version: String,
    },

    /// Approve or reject a stored review log entry
    Moderate {
        /// Review log entry JSON file
        entry: PathBuf,

        /// Mark the entry approved for fine-tuning export
        #[arg(long)]
        approve: bool,

        /// Mark the entry rejected
        #[arg(long)]
        reject: bool,

        /// Reviewer recorded on the entry
        #[arg(long)]
        reviewer: String,

        /// Admin notes
        #[arg(long, default_value = "")]
        notes: String,

        /// Rewrite the entry file instead of printing the result
        #[arg(long)]
        in_place: bool,
    },

    /// Export approved entries as fine-tuning examples
    Export {
        /// JSON array of review log entries
        entries: PathBuf,

        /// System message for every example
        #[arg(long, default_value = DEFAULT_SYSTEM_PROMPT)]
        system_prompt: String,
    },
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Command::Extract {
            report,
            source,
            settings,
            log_user,
            prompt_version,
        } => {
            let raw_report = read_file(&report)?;
            let source_text = match &source {
                Some(path) => read_file(path)?,
                None => String::new(),
            };
            let settings_json = settings.as_deref().map(read_file).transpose()?;
            let log = log_user.map(|user_id| LogOptions {
                user_id,
                prompt_version,
            });

            info!("Extracting report from {}", report.display());
            let output = run_extract(
                &raw_report,
                &source_text,
                settings_json.as_deref(),
                log.as_ref(),
                args.pretty,
            )
            .context("Extraction failed")?;
            println!("{}", output);
        }
        Command::Moderate {
            entry,
            approve,
            reject,
            reviewer,
            notes,
            in_place,
        } => {
            let decision = Decision::from_flags(approve, reject)?;
            let entry_json = read_file(&entry)?;
            let output = run_moderate(&entry_json, decision, &reviewer, &notes)
                .with_context(|| format!("Failed to moderate {}", entry.display()))?;

            if in_place {
                fs::write(&entry, &output)
                    .with_context(|| format!("Failed to write {}", entry.display()))?;
                info!("Updated {}", entry.display());
            } else {
                println!("{}", output);
            }
        }
        Command::Export {
            entries,
            system_prompt,
        } => {
            let entries_json = read_file(&entries)?;
            let output = run_export(&entries_json, &system_prompt, args.pretty)
                .with_context(|| format!("Failed to export {}", entries.display()))?;
            println!("{}", output);
        }
    }

    Ok(())
}
