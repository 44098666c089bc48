use shared_types::Issue;

use crate::patterns::{strip_emphasis, strip_list_marker, BULLET_LINE};

/// Parse the issues span: one issue per list item or unmarked line.
///
/// An indented, unmarked line directly under a list item continues that
/// item, so a multi-line explanation stays one issue.
pub fn parse_issues(span: &str) -> Vec<Issue> {
    let mut items: Vec<(bool, Vec<String>)> = Vec::new();
    let mut open_item = false;

    for line in span.lines() {
        let Some(text) = clean_issue_line(line) else {
            open_item = false;
            continue;
        };

        let marked = has_list_marker(line);
        let indented = line.starts_with([' ', '\t']);
        match items.last_mut() {
            Some((true, lines)) if open_item && indented && !marked => lines.push(text),
            _ => items.push((marked, vec![text])),
        }
        open_item = true;
    }

    items
        .into_iter()
        .map(|(_, lines)| Issue::from_text(&lines.join("\n")))
        .collect()
}

/// Strip emphasis and a leading enumeration marker. `None` for blank lines.
pub fn clean_issue_line(line: &str) -> Option<String> {
    let text = strip_emphasis(line);
    let cleaned = strip_list_marker(&text).trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

fn has_list_marker(line: &str) -> bool {
    let trimmed = line.trim_start();
    BULLET_LINE.is_match(trimmed) || strip_list_marker(trimmed).len() < trimmed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn titles(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn test_numbered_list() {
        let issues = parse_issues("\n1. Missing governing law\n2) No late fee\n\n10. Vague scope\n");
        assert_eq!(
            titles(&issues),
            vec!["Missing governing law", "No late fee", "Vague scope"]
        );
    }

    #[test]
    fn test_bullet_glyphs() {
        let issues = parse_issues("- Dash item\n* Star item\n• Dot item");
        assert_eq!(titles(&issues), vec!["Dash item", "Star item", "Dot item"]);
    }

    #[test]
    fn test_title_equals_explanation() {
        let issues = parse_issues("1. Payment terms: net 90 is unusually long");
        assert_eq!(issues[0].title, issues[0].explanation);
        assert_eq!(issues[0].short_title(), "Payment terms");
    }

    #[test]
    fn test_decimal_is_not_a_marker() {
        let issues = parse_issues("1.5% monthly late fee is excessive");
        assert_eq!(titles(&issues), vec!["1.5% monthly late fee is excessive"]);
    }

    #[test]
    fn test_bold_title_is_unwrapped() {
        let issues = parse_issues("**Missing termination clause**");
        assert_eq!(titles(&issues), vec!["Missing termination clause"]);
    }

    #[test]
    fn test_number_without_space() {
        let issues = parse_issues("1.Missing governing law\n2)No late fee");
        assert_eq!(titles(&issues), vec!["Missing governing law", "No late fee"]);
    }

    #[test]
    fn test_indented_continuation_joins_item() {
        let issues = parse_issues("1. The contract lacks\n   a termination clause.\n2. Vague scope");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].title, "The contract lacks a termination clause.");
        assert_eq!(issues[0].explanation, "The contract lacks\na termination clause.");
        assert_eq!(issues[1], Issue::from_line("Vague scope"));
    }

    #[test]
    fn test_unmarked_lines_stay_separate() {
        let issues = parse_issues("  Missing law\n  Vague scope");
        assert_eq!(titles(&issues), vec!["Missing law", "Vague scope"]);
    }

    #[test]
    fn test_heading_word_in_issue_text_kept() {
        let issues = parse_issues("1. No payment reminder: invoices have no due date\n2. Vague scope of work");
        assert_eq!(
            titles(&issues),
            vec!["No payment reminder: invoices have no due date", "Vague scope of work"]
        );
    }

    #[test]
    fn test_empty_span() {
        assert!(parse_issues("").is_empty());
        assert!(parse_issues("\n  \n\t\n").is_empty());
    }
}
