//! Improved draft normalization
//!
//! Removes emphasis markup and turns header-like lines into upper-case
//! headers on their own line, so the renderer can display the draft as is.

use lazy_static::lazy_static;
use regex::Regex;

use crate::patterns::strip_emphasis;

lazy_static! {
    static ref HEADING_HASHES: Regex = Regex::new(r"(?m)^([ \t]*)#{1,6}[ \t]+").unwrap();

    /// Entirely upper-case words, optionally followed by a colon
    static ref UPPER_HEADER: Regex =
        Regex::new(r"^([A-Z][A-Z0-9 \t&/'-]*[A-Z0-9])[ \t]*:?$").unwrap();

    /// Capitalized words, short connectors allowed between them
    static ref TITLE_HEADER: Regex = Regex::new(
        r"^([A-Z][a-z]+(?:[ \t]+(?:(?:of|and|or|the|for|to|&)[ \t]+)*[A-Z][a-z]+)*)[ \t]*:?$"
    )
    .unwrap();
}

/// Normalize a draft span for display
pub fn normalize_draft(span: &str, header_max_len: usize) -> String {
    let without_hashes = HEADING_HASHES.replace_all(span, "$1");
    let text = strip_emphasis(&without_hashes);

    let lines: Vec<String> = text
        .lines()
        .map(|line| normalize_line(line, header_max_len))
        .collect();

    lines.join("\n").trim().to_string()
}

fn normalize_line(line: &str, header_max_len: usize) -> String {
    let body = line.trim();
    if body.is_empty() {
        return String::new();
    }
    let indent = &line[..line.len() - line.trim_start().len()];

    if let Some(caps) = UPPER_HEADER.captures(body) {
        return format!("{}{}", indent, caps[1].trim());
    }

    if let Some(caps) = TITLE_HEADER.captures(body) {
        let header = caps[1].trim();
        if header.chars().count() < header_max_len {
            return format!("{}{}", indent, header.to_uppercase());
        }
    }

    line.trim_end().to_string()
}
