//! Shared phrase catalogs, regex patterns and text helpers

use lazy_static::lazy_static;
use regex::Regex;

/// Contract type heading variants
pub const CONTRACT_TYPE_PHRASES: &[&str] =
    &["contract type detected", "detected contract type", "contract type"];

/// Issues heading variants
pub const ISSUES_PHRASES: &[&str] = &["issues found", "issues identified", "issues"];

/// Recommended clauses heading variants
pub const RECOMMENDED_CLAUSES_PHRASES: &[&str] = &[
    "recommended clauses",
    "recommended additional clauses",
    "recommendations",
];

/// Improved draft heading variants
pub const IMPROVED_DRAFT_PHRASES: &[&str] =
    &["improved contract draft", "improved contract", "improved draft"];

/// Closing reminder heading variants
pub const REMINDER_PHRASES: &[&str] = &["reminder"];

/// Headings of the older two-section report format
pub const LEGACY_ISSUES_PHRASES: &[&str] = &["findings"];
pub const LEGACY_DRAFT_PHRASES: &[&str] = &["revised version", "improved version"];

/// Sub-labels inside a recommended clause block
pub const REASON_PHRASES: &[&str] = &["reason", "description"];
pub const DRAFT_PHRASES: &[&str] = &["draft", "sample clause"];
pub const LINK_PHRASES: &[&str] = &["link"];

/// Signature lines, signature blocks, standalone date lines and separators
pub const DEFAULT_DENYLIST: &str =
    r"(?im)signed\s+by|signature\s+block|^\s*date\s*:|^\s*_{3,}|^\s*-+\s*$";

/// What the generator writes when it could not tell the contract type
pub const DEFAULT_NOT_DETECTED: &str = r"(?i)could\s+not\s+be\s+detected";

pub const DEFAULT_DRAFT_PLACEHOLDER: &str = "No improved version available.";

pub const DEFAULT_HEADER_MAX_LEN: usize = 30;
pub const DEFAULT_CONTRACT_TYPE_MAX_LEN: usize = 80;

lazy_static! {
    /// A line that opens a bullet
    pub static ref BULLET_LINE: Regex = Regex::new(r"^\s*[-•*]").unwrap();

    /// Leading bullet marker, including trailing whitespace
    pub static ref BULLET_MARKER: Regex = Regex::new(r"^\s*[-•*]\s*").unwrap();

    /// Leading enumeration: "1." / "2)" or a bullet glyph
    static ref LIST_MARKER: Regex = Regex::new(r"^\s*(?:\d+[.)]|[-•*])\s*").unwrap();

    /// A decimal such as "1.5%" at line start, which is not an enumerator
    static ref LEADING_DECIMAL: Regex = Regex::new(r"^\s*\d+[.)]\d").unwrap();

    /// Bullet lines for the fallback scan. `-` and `*` need a following
    /// space so rules ("---") and bold lines are not bullets.
    pub static ref FALLBACK_BULLET: Regex =
        Regex::new(r"(?m)^[ \t]*(?:[-*][ \t]+|•[ \t]*)(\S[^\r\n]*)").unwrap();

    /// Leading list markers left on a detected contract type
    pub static ref CONTRACT_TYPE_MARKER: Regex =
        Regex::new(r"^(?:[-•*.]+|\d+[.)])\s*").unwrap();

    static ref BLANK_LINE: Regex = Regex::new(r"\n[ \t\r]*\n").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref UNDERLINE: Regex = Regex::new(r"__(.+?)__").unwrap();
}

/// Build the matcher source for a section heading phrase.
///
/// A heading starts a line. Tolerates decorations before the phrase (`#`,
/// `>`, check mark, bold markers, an enumerator like `2)` or `B.`) and
/// requires a colon after it, optionally wrapped in bold markers.
pub fn heading_pattern(phrase: &str) -> String {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    format!(
        r"(?im)^[ \t]*(?:[#>]+[ \t]*)?(?:✅[ \t]*)?(?:[*_]+[ \t]*)?(?:(?:\d{{1,2}}|[a-e])[.)][ \t]*)?(?:[*_]+[ \t]*)?\b{}[ \t]*[*_]*[ \t]*:[ \t]*[*_]*",
        words.join(r"\s+")
    )
}

/// Build the matcher source for a clause sub-label such as `Reason:`.
/// A bullet or bold markers directly around the sub-label belong to the match.
pub fn sub_label_pattern(phrases: &[String]) -> String {
    let alternatives: Vec<String> = phrases
        .iter()
        .map(|p| {
            p.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    format!(
        r"(?i)(?:[-•*]+[ \t]*)?\b(?:{})[ \t]*[*_]*[ \t]*:(?:[ \t]*[*_]+)?",
        alternatives.join("|")
    )
}

/// Remove `**bold**` and `__underline__` delimiters, keeping the enclosed text
pub fn strip_emphasis(text: &str) -> String {
    let without_bold = BOLD.replace_all(text, "$1");
    UNDERLINE.replace_all(&without_bold, "$1").into_owned()
}

/// Remove a leading list marker. A leading decimal ("1.5% fee") is kept.
pub fn strip_list_marker(text: &str) -> &str {
    if LEADING_DECIMAL.is_match(text) {
        return text;
    }
    match LIST_MARKER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Non-empty paragraphs, trimmed. Paragraphs are separated by blank lines.
pub fn paragraphs(text: &str) -> Vec<&str> {
    BLANK_LINE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
