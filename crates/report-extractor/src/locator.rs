//! Section locator
//!
//! Splits a raw report into labeled spans. Labels are consulted in catalog
//! order; each label is searched only in the text after the previous label's
//! heading, so spans never overlap. A span runs from the end of its heading
//! to the start of the earliest later heading, or to end of text. Headings
//! only count at the start of a line.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{SectionCatalog, SectionKind};

/// Spans found in one report, borrowed from the raw text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatedSections<'a> {
    spans: BTreeMap<SectionKind, &'a str>,
}

impl<'a> LocatedSections<'a> {
    /// Span for `kind`; empty when the heading was not found
    pub fn get(&self, kind: SectionKind) -> &'a str {
        self.spans.get(&kind).copied().unwrap_or("")
    }

    pub fn found(&self, kind: SectionKind) -> bool {
        self.spans.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Locate every catalog section in `raw`
pub fn locate<'a>(raw: &'a str, catalog: &SectionCatalog) -> LocatedSections<'a> {
    let mut spans = BTreeMap::new();
    let mut cursor = 0;

    for (index, label) in catalog.labels().iter().enumerate() {
        let Some((_, content_start)) = label.find_in(raw, cursor) else {
            debug!(section = label.kind.as_str(), "Section heading not found");
            continue;
        };

        let content_end = catalog
            .boundary_set(index)
            .iter()
            .filter_map(|next| next.find_in(raw, content_start))
            .map(|(start, _)| start)
            .min()
            .unwrap_or(raw.len());

        debug!(
            section = label.kind.as_str(),
            start = content_start,
            len = content_end - content_start,
            "Located section"
        );
        spans.insert(label.kind, &raw[content_start..content_end]);
        cursor = content_start;
    }

    LocatedSections { spans }
}
