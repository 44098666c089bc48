//! Recommended clause blocks
//!
//! A block runs from one bullet line to just before the next. Bulleted lines
//! that open with a sub-label (`- Reason:`) stay inside the current block.
//! Each field is matched independently, so a missing `Reason:` only leaves
//! `reason` empty.

use std::ops::Range;

use shared_types::Clause;
use tracing::debug;

use crate::config::{ClauseField, ClauseFieldMatchers};
use crate::patterns::{strip_emphasis, BULLET_LINE, BULLET_MARKER};

type Marker = (usize, usize, ClauseField);

struct Block<'a> {
    bulleted: bool,
    lines: Vec<&'a str>,
}

/// Parse the recommended clauses span
pub fn parse_clauses(span: &str, fields: &ClauseFieldMatchers) -> Vec<Clause> {
    let blocks = split_blocks(span, fields);
    let clauses: Vec<Clause> = blocks
        .iter()
        .map(|block| parse_block(block, fields))
        .filter(|clause| !clause.is_noise())
        .collect();

    debug!(
        blocks = blocks.len(),
        clauses = clauses.len(),
        "Parsed recommended clauses"
    );
    clauses
}

fn split_blocks<'a>(span: &'a str, fields: &ClauseFieldMatchers) -> Vec<Block<'a>> {
    let mut blocks: Vec<Block<'a>> = Vec::new();

    for line in span.lines() {
        let opens = BULLET_LINE.is_match(line) && !fields.opens_with_marker(line);
        match blocks.last_mut() {
            Some(block) if !opens => block.lines.push(line),
            _ => blocks.push(Block {
                bulleted: opens,
                lines: vec![line],
            }),
        }
    }

    blocks
}

fn parse_block(block: &Block<'_>, fields: &ClauseFieldMatchers) -> Clause {
    let text = block.lines.join("\n");
    let markers = fields.markers(&text);

    let name = if block.bulleted {
        clause_name(block.lines[0], &markers)
    } else {
        String::new()
    };

    let link = field_value(&text, &markers, ClauseField::Link);

    Clause {
        name,
        reason: field_value(&text, &markers, ClauseField::Reason),
        draft_text: field_value(&text, &markers, ClauseField::Draft),
        link: if link.is_empty() { None } else { Some(link) },
    }
}

/// Text between the bullet and the first colon (or first sub-label) on the
/// block's opening line
fn clause_name(first_line: &str, markers: &[Marker]) -> String {
    let name_start = BULLET_MARKER.find(first_line).map_or(0, |m| m.end());

    let colon = first_line[name_start..]
        .find(':')
        .map(|i| name_start + i)
        .unwrap_or(first_line.len());
    let marker = markers
        .iter()
        .map(|&(start, _, _)| start)
        .find(|&start| start >= name_start && start < first_line.len())
        .unwrap_or(first_line.len());

    let raw = &first_line[name_start..colon.min(marker)];
    strip_emphasis(raw).trim().trim_matches('*').trim().to_string()
}

/// Value after the first `field` sub-label. A draft runs to the first link
/// marker, so sub-label words inside the draft prose stay part of it and are
/// not taken as labels of their own.
fn field_value(text: &str, markers: &[Marker], field: ClauseField) -> String {
    let draft = value_range(markers, ClauseField::Draft, text.len());
    let markers: Vec<Marker> = markers
        .iter()
        .copied()
        .filter(|&(start, _, f)| {
            f == ClauseField::Draft || !draft.as_ref().map_or(false, |r| r.contains(&start))
        })
        .collect();

    let Some(range) = value_range(&markers, field, text.len()) else {
        return String::new();
    };

    let value: Vec<&str> = text[range]
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    strip_emphasis(&value.join("\n")).trim().to_string()
}

/// Byte range after the first `field` marker, up to the first marker of a
/// field that closes it
fn value_range(markers: &[Marker], field: ClauseField, text_len: usize) -> Option<Range<usize>> {
    let first_of = |wanted: ClauseField| {
        markers
            .iter()
            .find(|&&(_, _, f)| f == wanted)
            .map(|&(start, end, _)| (start, end))
    };

    let (_, value_start) = first_of(field)?;
    let closers: &[ClauseField] = match field {
        ClauseField::Reason => &[ClauseField::Draft, ClauseField::Link],
        ClauseField::Draft => &[ClauseField::Link],
        ClauseField::Link => &[ClauseField::Reason, ClauseField::Draft],
    };
    let value_end = closers
        .iter()
        .filter_map(|&closer| first_of(closer))
        .map(|(start, _)| start)
        .filter(|&start| start >= value_start)
        .min()
        .unwrap_or(text_len);

    Some(value_start..value_end)
}
