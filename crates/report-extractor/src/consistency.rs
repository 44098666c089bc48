//! Final cross-checks on an assembled report
//!
//! Runs in order: drop signature/date noise from issues, drop clauses that
//! repeat an issue, then backfill the contract type from the source document.

use regex::Regex;
use shared_types::{Clause, Issue, ParsedReport};
use tracing::debug;

use crate::config::ExtractionConfig;

pub fn apply(report: &mut ParsedReport, source: &str, config: &ExtractionConfig) {
    drop_noise_issues(&mut report.issues, &config.denylist);
    drop_duplicate_clauses(&mut report.recommended_clauses, &report.issues);
    report.contract_type = backfill_contract_type(&report.contract_type, source, config);
}

/// Remove issues whose text matches the signature/date denylist
pub fn drop_noise_issues(issues: &mut Vec<Issue>, denylist: &Regex) {
    let before = issues.len();
    issues.retain(|issue| !denylist.is_match(&issue.title) && !denylist.is_match(&issue.explanation));
    if issues.len() < before {
        debug!(dropped = before - issues.len(), "Dropped signature/date issues");
    }
}

/// Remove clauses whose name or draft text already appears inside an issue
pub fn drop_duplicate_clauses(clauses: &mut Vec<Clause>, issues: &[Issue]) {
    let issue_texts: Vec<(String, String)> = issues
        .iter()
        .map(|i| (i.title.to_lowercase(), i.explanation.to_lowercase()))
        .collect();

    let mentioned = |needle: &str| {
        let needle = needle.to_lowercase();
        !needle.is_empty()
            && issue_texts
                .iter()
                .any(|(title, explanation)| title.contains(&needle) || explanation.contains(&needle))
    };

    let before = clauses.len();
    clauses.retain(|clause| !mentioned(&clause.name) && !mentioned(&clause.draft_text));
    if clauses.len() < before {
        debug!(dropped = before - clauses.len(), "Dropped clauses duplicating issues");
    }
}

/// Keep a detected contract type, otherwise take the source document's
/// first non-blank line when it is short enough to be a title
pub fn backfill_contract_type(current: &str, source: &str, config: &ExtractionConfig) -> String {
    let current = current.trim();
    if !current.is_empty() && !config.not_detected.is_match(current) {
        return current.to_string();
    }

    match source.lines().find(|line| !line.trim().is_empty()) {
        Some(line) if line.chars().count() < config.contract_type_max_len => {
            debug!("Contract type taken from source document title");
            line.trim().to_string()
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    fn clause(name: &str, draft: &str) -> Clause {
        Clause {
            name: name.to_string(),
            draft_text: draft.to_string(),
            ..Clause::default()
        }
    }

    #[test]
    fn test_signature_and_date_issues_dropped() {
        let mut issues = vec![
            Issue::from_line("Signed by the Contractor line is blank"),
            Issue::from_line("Date: ____"),
            Issue::from_line("________________"),
            Issue::from_line("Missing effective date"),
            Issue::from_line("Signature block for the Client"),
        ];
        drop_noise_issues(&mut issues, &config().denylist);
        assert_eq!(issues, vec![Issue::from_line("Missing effective date")]);
    }

    #[test]
    fn test_clause_named_in_issue_dropped() {
        let issues = vec![Issue::from_line("No force majeure clause is included")];
        let mut clauses = vec![
            clause("Force Majeure", "Neither party liable for acts of God."),
            clause("Severability", "Invalid parts do not void the rest."),
        ];
        drop_duplicate_clauses(&mut clauses, &issues);

        let names: Vec<&str> = clauses.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Severability"]);
    }

    #[test]
    fn test_clause_draft_in_issue_dropped() {
        let issues = vec![Issue::from_line("Add: Notices go to the addresses above.")];
        let mut clauses = vec![clause("Communication", "notices go to the addresses above.")];
        drop_duplicate_clauses(&mut clauses, &issues);
        assert!(clauses.is_empty());
    }

    #[test]
    fn test_empty_clause_fields_never_match() {
        let issues = vec![Issue::from_line("Vague scope")];
        let mut clauses = vec![clause("", "Each deliverable is listed in Exhibit A.")];
        drop_duplicate_clauses(&mut clauses, &issues);
        assert_eq!(clauses.len(), 1);
    }

    #[test]
    fn test_detected_contract_type_kept() {
        assert_eq!(backfill_contract_type("NDA", "SERVICES AGREEMENT", &config()), "NDA");
    }

    #[test]
    fn test_sentinel_backfilled_from_source() {
        let source = "\n\n  SERVICES AGREEMENT  \nThis agreement is made between...";
        assert_eq!(
            backfill_contract_type("Contract type could not be detected.", source, &config()),
            "SERVICES AGREEMENT"
        );
    }

    #[test]
    fn test_empty_backfilled_from_source() {
        assert_eq!(
            backfill_contract_type("", "Consulting Agreement\r\nBody", &config()),
            "Consulting Agreement"
        );
    }

    #[test]
    fn test_long_first_line_leaves_empty() {
        let source = "This agreement is entered into by and between the undersigned parties as of the date below.";
        assert!(source.len() >= 80);
        assert_eq!(backfill_contract_type("", source, &config()), "");
    }

    #[test]
    fn test_empty_source_leaves_empty() {
        assert_eq!(backfill_contract_type("could not be detected", "", &config()), "");
    }
}
