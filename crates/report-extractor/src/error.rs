use thiserror::Error;

/// Errors raised while building an [`ExtractionConfig`](crate::ExtractionConfig).
///
/// Extraction itself never fails; only user-supplied settings can be rejected.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {name} pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Label for section '{0}' has no phrases")]
    EmptyLabel(String),

    #[error("Section '{0}' appears more than once in the catalog")]
    DuplicateSection(String),

    #[error("Draft placeholder must not be empty")]
    EmptyPlaceholder,

    #[error("Failed to parse settings: {0}")]
    Settings(#[from] serde_json::Error),
}
