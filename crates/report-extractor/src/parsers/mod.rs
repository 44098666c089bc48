//! Per-section parsers. Each takes one located span and shares no state
//! with the others.

pub mod clauses;
pub mod draft;
pub mod issues;

use crate::patterns::{strip_emphasis, CONTRACT_TYPE_MARKER};

/// Clean the contract type span: first non-blank line, emphasis removed,
/// leading list markers dropped
pub fn clean_contract_type(span: &str) -> String {
    let first_line = span.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    let text = strip_emphasis(first_line);
    let text = text.trim().trim_matches('*').trim();
    CONTRACT_TYPE_MARKER.replace(text, "").trim().to_string()
}

/// Clean the reminder span into the disclaimer text
pub fn clean_disclaimer(span: &str) -> String {
    strip_emphasis(span.trim()).trim().to_string()
}
