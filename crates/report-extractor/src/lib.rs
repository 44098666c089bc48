//! Structured extraction of generated contract review reports
//!
//! The generator is asked for ordered, labeled sections (contract type,
//! issues, recommended clauses, improved draft, reminder) but does not
//! always comply. [`ReportExtractor`] recovers a [`ParsedReport`] from
//! whatever text comes back and never fails.

pub mod config;
pub mod consistency;
pub mod error;
pub mod fallback;
pub mod locator;
pub mod parsers;
pub mod patterns;

pub use config::{ExtractionConfig, ExtractionSettings, SectionKind};
pub use error::ConfigError;
pub use shared_types::{Clause, Issue, ParsedReport};

use tracing::{info, warn};

/// Holds a compiled configuration and turns raw generator output into a
/// [`ParsedReport`]. Safe to share across threads.
pub struct ReportExtractor {
    config: ExtractionConfig,
}

impl ReportExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract a report. `source` is the submitted contract text, used only
    /// to backfill an undetected contract type.
    pub fn extract(&self, raw: &str, source: &str) -> ParsedReport {
        extract_report(raw, source, &self.config)
    }
}

impl Default for ReportExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

/// Run the full pipeline: locate sections, parse each one, patch empty
/// fields from the fallback chain, then apply the consistency filter
pub fn extract_report(raw: &str, source: &str, config: &ExtractionConfig) -> ParsedReport {
    let sections = locator::locate(raw, &config.sections);

    let mut report = ParsedReport {
        contract_type: parsers::clean_contract_type(sections.get(SectionKind::ContractType)),
        issues: parsers::issues::parse_issues(sections.get(SectionKind::Issues)),
        recommended_clauses: parsers::clauses::parse_clauses(
            sections.get(SectionKind::RecommendedClauses),
            &config.clause_fields,
        ),
        improved_draft: parsers::draft::normalize_draft(
            sections.get(SectionKind::ImprovedDraft),
            config.header_max_len,
        ),
        disclaimer: parsers::clean_disclaimer(sections.get(SectionKind::Reminder)),
    };

    if fallback::needs_fallback(&report) {
        warn!(
            raw_len = raw.len(),
            "Report does not follow the labeled section convention"
        );
        fallback::apply(&mut report, raw, config);
    }

    consistency::apply(&mut report, source, config);

    info!(
        contract_type_detected = !report.contract_type.is_empty(),
        issues = report.issues.len(),
        clauses = report.recommended_clauses.len(),
        draft_len = report.improved_draft.len(),
        "Extracted review report"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NDA_REPORT: &str = "Contract Type Detected: NDA\nIssues Found:\n1. Missing governing law\nRecommended Clauses:\n- Force Majeure: Reason: protects both parties Draft: Neither party liable for acts of God.\nImproved Contract:\nNDA AGREEMENT\nConfidential information is protected.\nReminder:\nDisclaimer: general information only.";

    #[test]
    fn test_extractor_parses_conventional_report() {
        let extractor = ReportExtractor::default();
        let report = extractor.extract(NDA_REPORT, "MUTUAL NDA\nThe parties agree...");

        assert_eq!(
            report,
            ParsedReport {
                contract_type: "NDA".to_string(),
                issues: vec![Issue::from_line("Missing governing law")],
                recommended_clauses: vec![Clause {
                    name: "Force Majeure".to_string(),
                    reason: "protects both parties".to_string(),
                    draft_text: "Neither party liable for acts of God.".to_string(),
                    link: None,
                }],
                improved_draft: "NDA AGREEMENT\nConfidential information is protected."
                    .to_string(),
                disclaimer: "Disclaimer: general information only.".to_string(),
            }
        );
    }

    #[test]
    fn test_extractor_backfills_sentinel_contract_type() {
        let raw = "Contract Type Detected: Contract type could not be detected\nIssues Found:\n1. No payment schedule\nImproved Contract:\nPAYMENT\nClient pays monthly.";
        let report = ReportExtractor::default().extract(raw, "SERVICES AGREEMENT\nBody text");

        assert_eq!(report.contract_type, "SERVICES AGREEMENT");
        assert_eq!(report.issues, vec![Issue::from_line("No payment schedule")]);
    }

    #[test]
    fn test_extractor_filters_signature_issue_and_duplicate_clause() {
        let raw = "Contract Type Detected: Freelance Contract\nIssues Found:\n1. Missing late payment penalty\n2. Signature block is not dated\n3. No confidentiality terms\nRecommended Clauses:\n- Confidentiality: Reason: protects data Draft: Each party keeps information secret.\n- Late Payment Penalty: Draft: Late invoices accrue 1.5% monthly.\n- Non-Solicitation: Draft: Neither party solicits the other's staff.\nImproved Contract:\nFREELANCE AGREEMENT\nTerms follow.";
        let report = ReportExtractor::default().extract(raw, "");

        assert_eq!(
            report.issues,
            vec![
                Issue::from_line("Missing late payment penalty"),
                Issue::from_line("No confidentiality terms"),
            ]
        );
        let names: Vec<&str> = report
            .recommended_clauses
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Non-Solicitation"]);
    }

    #[test]
    fn test_extractor_uses_fallback_for_unstructured_text() {
        let raw = "I reviewed the agreement.\n\n- The termination clause is one-sided\n- No dispute resolution\n\nCONSULTING AGREEMENT\nEither party may terminate with notice.";
        let report = ReportExtractor::default().extract(raw, "Consulting Agreement\nBody");

        assert_eq!(report.contract_type, "Consulting Agreement");
        assert_eq!(report.issues.len(), 2);
        assert_eq!(
            report.improved_draft,
            "CONSULTING AGREEMENT\nEither party may terminate with notice."
        );
        assert_eq!(report.disclaimer, "");
    }

    #[test]
    fn test_fallback_skipped_when_contract_type_found() {
        let raw = "Contract Type Detected: NDA\n\n- stray bullet\n\nlast paragraph";
        let report = ReportExtractor::default().extract(raw, "");

        assert_eq!(report.contract_type, "NDA");
        assert!(report.issues.is_empty());
        assert_eq!(report.improved_draft, "");
    }

    #[test]
    fn test_extractor_with_custom_settings() {
        let mut settings = ExtractionSettings::default();
        settings.sections[1].phrases.push("problems".to_string());
        let extractor = ReportExtractor::new(ExtractionConfig::from_settings(&settings).unwrap());

        let raw = "Contract Type Detected: NDA\nProblems:\n- Missing term\nImproved Contract:\nBODY";
        let report = extractor.extract(raw, "");
        assert_eq!(report.issues, vec![Issue::from_line("Missing term")]);
    }
}
