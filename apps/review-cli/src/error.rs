//! Error types for the review CLI

use report_extractor::ConfigError;
use thiserror::Error;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid extraction settings: {0}")]
    Settings(#[from] ConfigError),

    #[error("Invalid review log entry: {0}")]
    LogEntry(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Choose exactly one of --approve or --reject")]
    MissingDecision,
}
