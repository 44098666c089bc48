//! Subcommand implementations
//!
//! Each command takes the file contents already read by `main` and returns
//! the JSON document to print, so they can be exercised without touching
//! the filesystem.

use report_extractor::{ExtractionConfig, ReportExtractor};
use shared_types::{export_training_data, ReviewLogEntry};
use tracing::{debug, info};

use crate::error::CliError;

/// System message used for exported fine-tuning examples
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a legal compliance expert specializing in contract analysis. Analyze the following contract and provide structured feedback.";

/// Moderation decision for a logged review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Map the `--approve`/`--reject` flag pair onto a decision
    pub fn from_flags(approve: bool, reject: bool) -> Result<Self, CliError> {
        match (approve, reject) {
            (true, false) => Ok(Decision::Approve),
            (false, true) => Ok(Decision::Reject),
            _ => Err(CliError::MissingDecision),
        }
    }
}

/// Options for wrapping an extraction in a moderation log entry
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub user_id: String,
    pub prompt_version: String,
}

/// Extract a report and serialize it (or a pending log entry for it)
pub fn run_extract(
    raw_report: &str,
    source: &str,
    settings_json: Option<&str>,
    log: Option<&LogOptions>,
    pretty: bool,
) -> Result<String, CliError> {
    let config = match settings_json {
        Some(json) => ExtractionConfig::from_json(json)?,
        None => ExtractionConfig::default(),
    };
    let extractor = ReportExtractor::new(config);
    let report = extractor.extract(raw_report, source);

    match log {
        Some(options) => {
            let entry = ReviewLogEntry::with_prompt_version(
                &options.user_id,
                &options.prompt_version,
                source,
                &report,
            );
            info!(id = %entry.id, "Created pending review log entry");
            to_json(&entry, pretty)
        }
        None => to_json(&report, pretty),
    }
}

/// Record a moderation decision on a stored log entry
pub fn run_moderate(
    entry_json: &str,
    decision: Decision,
    reviewer: &str,
    notes: &str,
) -> Result<String, CliError> {
    let mut entry = ReviewLogEntry::from_json(entry_json).map_err(CliError::LogEntry)?;

    match decision {
        Decision::Approve => entry.approve(reviewer, notes),
        Decision::Reject => entry.reject(reviewer, notes),
    }
    info!(id = %entry.id, status = ?entry.status, "Recorded moderation decision");

    entry.to_json().map_err(CliError::LogEntry)
}

/// Convert approved entries from a JSON array into training examples
pub fn run_export(entries_json: &str, system_prompt: &str, pretty: bool) -> Result<String, CliError> {
    let entries: Vec<ReviewLogEntry> = serde_json::from_str(entries_json)?;
    let examples = export_training_data(&entries, system_prompt);
    debug!(
        entries = entries.len(),
        exported = examples.len(),
        "Built fine-tuning export"
    );
    to_json(&examples, pretty)
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
