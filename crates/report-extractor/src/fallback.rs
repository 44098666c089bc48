//! Fallback chain for reports that ignore the labeled section convention
//!
//! Each field has an ordered list of strategies; the first one that yields
//! content wins. Fields are patched independently.

use shared_types::{Issue, ParsedReport};
use tracing::warn;

use crate::config::{ExtractionConfig, SectionKind};
use crate::locator::locate;
use crate::parsers::draft::normalize_draft;
use crate::parsers::issues::parse_issues;
use crate::patterns::{paragraphs, FALLBACK_BULLET};

/// Ways to recover issues, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueStrategy {
    /// "Findings:" section of the older two-section format
    LegacyConvention,
    /// Every bulleted line in the report
    BulletScan,
    /// The first paragraph as one synthetic issue
    FirstParagraph,
}

impl IssueStrategy {
    pub const CHAIN: [IssueStrategy; 3] = [
        IssueStrategy::LegacyConvention,
        IssueStrategy::BulletScan,
        IssueStrategy::FirstParagraph,
    ];

    pub fn apply(self, raw: &str, config: &ExtractionConfig) -> Vec<Issue> {
        match self {
            IssueStrategy::LegacyConvention => {
                let sections = locate(raw, &config.legacy_sections);
                parse_issues(sections.get(SectionKind::Issues))
            }
            IssueStrategy::BulletScan => FALLBACK_BULLET
                .captures_iter(raw)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .filter(|line| !line.is_empty())
                .map(Issue::from_text)
                .collect(),
            IssueStrategy::FirstParagraph => paragraphs(raw)
                .first()
                .map(|paragraph| vec![Issue::from_text(paragraph)])
                .unwrap_or_default(),
        }
    }
}

/// Ways to recover the improved draft, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStrategy {
    /// "Revised version:" section of the older two-section format
    LegacyConvention,
    /// The last paragraph, when the report has more than one
    LastParagraph,
    /// Literal marker that no improved version is available
    Placeholder,
}

impl DraftStrategy {
    pub const CHAIN: [DraftStrategy; 3] = [
        DraftStrategy::LegacyConvention,
        DraftStrategy::LastParagraph,
        DraftStrategy::Placeholder,
    ];

    pub fn apply(self, raw: &str, config: &ExtractionConfig) -> String {
        match self {
            DraftStrategy::LegacyConvention => {
                let sections = locate(raw, &config.legacy_sections);
                normalize_draft(sections.get(SectionKind::ImprovedDraft), config.header_max_len)
            }
            DraftStrategy::LastParagraph => match paragraphs(raw).as_slice() {
                [_, .., last] => normalize_draft(last, config.header_max_len),
                _ => String::new(),
            },
            DraftStrategy::Placeholder => config.draft_placeholder.clone(),
        }
    }
}

/// True when the primary convention produced nothing at all
pub fn needs_fallback(report: &ParsedReport) -> bool {
    report.contract_type.is_empty() && report.issues.is_empty() && report.improved_draft.is_empty()
}

/// Fill the empty issue and draft fields from the raw report
pub fn apply(report: &mut ParsedReport, raw: &str, config: &ExtractionConfig) {
    if report.issues.is_empty() {
        for strategy in IssueStrategy::CHAIN {
            let issues = strategy.apply(raw, config);
            if !issues.is_empty() {
                warn!(?strategy, count = issues.len(), "Recovered issues from fallback");
                report.issues = issues;
                break;
            }
        }
    }

    if report.improved_draft.is_empty() {
        for strategy in DraftStrategy::CHAIN {
            let draft = strategy.apply(raw, config);
            if !draft.is_empty() {
                warn!(?strategy, len = draft.len(), "Recovered improved draft from fallback");
                report.improved_draft = draft;
                break;
            }
        }
    }
}
