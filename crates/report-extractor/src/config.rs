//! Extraction configuration
//!
//! [`ExtractionSettings`] is the serializable, user-tunable form.
//! [`ExtractionConfig`] is the compiled form: built once at start-up,
//! never mutated, and passed by reference into every extraction call.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::patterns::{self, heading_pattern, sub_label_pattern};

/// Canonical section of a generated review report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    ContractType,
    Issues,
    RecommendedClauses,
    ImprovedDraft,
    Reminder,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::ContractType => "contract_type",
            SectionKind::Issues => "issues",
            SectionKind::RecommendedClauses => "recommended_clauses",
            SectionKind::ImprovedDraft => "improved_draft",
            SectionKind::Reminder => "reminder",
        }
    }
}

/// One catalog entry: a section and the heading phrases that introduce it
#[derive(Debug, Clone)]
pub struct SectionLabel {
    pub kind: SectionKind,
    pub phrases: Vec<String>,
    matchers: Vec<Regex>,
}

impl SectionLabel {
    pub fn new(kind: SectionKind, phrases: &[String]) -> Result<Self, ConfigError> {
        if phrases.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigError::EmptyLabel(kind.as_str().to_string()));
        }

        let matchers = phrases
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| compile(&format!("{} heading", kind.as_str()), &heading_pattern(p)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            kind,
            phrases: phrases.to_vec(),
            matchers,
        })
    }

    /// Byte range of the earliest heading match in `haystack` at or after
    /// `from`. Line starts are judged against the whole haystack, so a
    /// search from mid-line never treats `from` as a line start.
    /// On a tie the longer match wins.
    pub fn find_in(&self, haystack: &str, from: usize) -> Option<(usize, usize)> {
        self.matchers
            .iter()
            .filter_map(|re| re.find_at(haystack, from))
            .map(|m| (m.start(), m.end()))
            .min_by_key(|&(start, end)| (start, std::cmp::Reverse(end)))
    }
}

/// Ordered list of section labels. Order is priority: a label's span ends
/// at the first match of any label after it (its boundary set).
#[derive(Debug, Clone)]
pub struct SectionCatalog {
    labels: Vec<SectionLabel>,
}

impl SectionCatalog {
    pub fn new(labels: Vec<SectionLabel>) -> Result<Self, ConfigError> {
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].iter().any(|earlier| earlier.kind == label.kind) {
                return Err(ConfigError::DuplicateSection(label.kind.as_str().to_string()));
            }
        }
        Ok(Self { labels })
    }

    fn from_settings(sections: &[SectionSettings]) -> Result<Self, ConfigError> {
        let labels = sections
            .iter()
            .map(|s| SectionLabel::new(s.kind, &s.phrases))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(labels)
    }

    pub fn labels(&self) -> &[SectionLabel] {
        &self.labels
    }

    /// Labels that can close the span of the label at `index`
    pub fn boundary_set(&self, index: usize) -> &[SectionLabel] {
        self.labels.get(index + 1..).unwrap_or(&[])
    }
}

/// Sub-label inside a recommended clause block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseField {
    Reason,
    Draft,
    Link,
}

/// Compiled sub-label matchers for clause blocks
#[derive(Debug, Clone)]
pub struct ClauseFieldMatchers {
    reason: Regex,
    draft: Regex,
    link: Regex,
}

impl ClauseFieldMatchers {
    fn from_settings(settings: &ClauseFieldSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            reason: compile("clause reason", &sub_label_pattern(&settings.reason))?,
            draft: compile("clause draft", &sub_label_pattern(&settings.draft))?,
            link: compile("clause link", &sub_label_pattern(&settings.link))?,
        })
    }

    /// Every sub-label occurrence in `block` as `(start, end, field)`, by position
    pub fn markers(&self, block: &str) -> Vec<(usize, usize, ClauseField)> {
        let mut found: Vec<(usize, usize, ClauseField)> = [
            (&self.reason, ClauseField::Reason),
            (&self.draft, ClauseField::Draft),
            (&self.link, ClauseField::Link),
        ]
        .iter()
        .flat_map(|(re, field)| re.find_iter(block).map(move |m| (m.start(), m.end(), *field)))
        .collect();
        found.sort_by_key(|&(start, _, _)| start);
        found
    }

    /// True when `line` (after indentation) opens with a sub-label
    pub fn opens_with_marker(&self, line: &str) -> bool {
        let line = line.trim_start();
        [&self.reason, &self.draft, &self.link]
            .iter()
            .any(|re| re.find(line).map_or(false, |m| m.start() == 0))
    }
}

/// Serializable section entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSettings {
    pub kind: SectionKind,
    pub phrases: Vec<String>,
}

impl SectionSettings {
    fn new(kind: SectionKind, phrases: &[&str]) -> Self {
        Self {
            kind,
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClauseFieldSettings {
    pub reason: Vec<String>,
    pub draft: Vec<String>,
    pub link: Vec<String>,
}

impl Default for ClauseFieldSettings {
    fn default() -> Self {
        let owned = |phrases: &[&str]| phrases.iter().map(|p| p.to_string()).collect();
        Self {
            reason: owned(patterns::REASON_PHRASES),
            draft: owned(patterns::DRAFT_PHRASES),
            link: owned(patterns::LINK_PHRASES),
        }
    }
}

/// User-tunable extraction settings, loadable from JSON. Missing fields
/// take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub sections: Vec<SectionSettings>,
    pub legacy_sections: Vec<SectionSettings>,
    pub clause_fields: ClauseFieldSettings,
    pub denylist_pattern: String,
    pub not_detected_pattern: String,
    pub header_max_len: usize,
    pub contract_type_max_len: usize,
    pub draft_placeholder: String,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            sections: vec![
                SectionSettings::new(SectionKind::ContractType, patterns::CONTRACT_TYPE_PHRASES),
                SectionSettings::new(SectionKind::Issues, patterns::ISSUES_PHRASES),
                SectionSettings::new(
                    SectionKind::RecommendedClauses,
                    patterns::RECOMMENDED_CLAUSES_PHRASES,
                ),
                SectionSettings::new(SectionKind::ImprovedDraft, patterns::IMPROVED_DRAFT_PHRASES),
                SectionSettings::new(SectionKind::Reminder, patterns::REMINDER_PHRASES),
            ],
            legacy_sections: vec![
                SectionSettings::new(SectionKind::Issues, patterns::LEGACY_ISSUES_PHRASES),
                SectionSettings::new(SectionKind::ImprovedDraft, patterns::LEGACY_DRAFT_PHRASES),
            ],
            clause_fields: ClauseFieldSettings::default(),
            denylist_pattern: patterns::DEFAULT_DENYLIST.to_string(),
            not_detected_pattern: patterns::DEFAULT_NOT_DETECTED.to_string(),
            header_max_len: patterns::DEFAULT_HEADER_MAX_LEN,
            contract_type_max_len: patterns::DEFAULT_CONTRACT_TYPE_MAX_LEN,
            draft_placeholder: patterns::DEFAULT_DRAFT_PLACEHOLDER.to_string(),
        }
    }
}

impl ExtractionSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Compiled, read-only extraction configuration
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub sections: SectionCatalog,
    pub legacy_sections: SectionCatalog,
    pub clause_fields: ClauseFieldMatchers,
    pub denylist: Regex,
    pub not_detected: Regex,
    pub header_max_len: usize,
    pub contract_type_max_len: usize,
    pub draft_placeholder: String,
}

impl ExtractionConfig {
    pub fn from_settings(settings: &ExtractionSettings) -> Result<Self, ConfigError> {
        if settings.draft_placeholder.trim().is_empty() {
            return Err(ConfigError::EmptyPlaceholder);
        }

        Ok(Self {
            sections: SectionCatalog::from_settings(&settings.sections)?,
            legacy_sections: SectionCatalog::from_settings(&settings.legacy_sections)?,
            clause_fields: ClauseFieldMatchers::from_settings(&settings.clause_fields)?,
            denylist: compile("denylist", &settings.denylist_pattern)?,
            not_detected: compile("not-detected", &settings.not_detected_pattern)?,
            header_max_len: settings.header_max_len,
            contract_type_max_len: settings.contract_type_max_len,
            draft_placeholder: settings.draft_placeholder.trim().to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_settings(&ExtractionSettings::from_json(json)?)
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::from_settings(&ExtractionSettings::default())
            .expect("built-in extraction settings compile")
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        name: name.to_string(),
        source,
    })
}
