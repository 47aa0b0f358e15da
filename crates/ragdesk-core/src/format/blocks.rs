//! Builders for paragraph and table blocks.

use std::sync::LazyLock;

use regex::Regex;

use super::ContentBlock;

const BULLET: &str = "• ";

/// A bullet marker following any non-newline character, across any
/// whitespace (line breaks included).
static INLINE_BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^\n])\s*\* ").expect("INLINE_BULLET_RE regex pattern is valid")
});

/// Reflows inline `* ` markers into a blank-line separated bullet list and
/// trims the result. Returns `None` when nothing but whitespace is left.
pub(super) fn build_paragraph(joined: &str) -> Option<String> {
    let reflowed = INLINE_BULLET_RE.replace_all(joined, "${1}\n\n• ");
    let reflowed = match reflowed.strip_prefix("* ") {
        Some(rest) => format!("{BULLET}{rest}"),
        None => reflowed.into_owned(),
    };

    let trimmed = reflowed.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Builds a table from raw pipe-delimited lines.
///
/// Line 0 is the header, line 1 is skipped unconditionally, and the rest are
/// data rows. Fewer than two lines produce no table.
pub(super) fn build_table(lines: &[&str]) -> Option<ContentBlock> {
    let [header, _separator, data @ ..] = lines else {
        return None;
    };

    Some(ContentBlock::Table {
        headers: header_cells(header),
        rows: data.iter().map(|line| row_cells(line)).collect(),
    })
}

/// Header cells: outer segments are dropped only when they are blank.
fn header_cells(line: &str) -> Vec<String> {
    let mut segments: Vec<&str> = line.split('|').collect();
    if segments.first().is_some_and(|s| s.trim().is_empty()) {
        segments.remove(0);
    }
    if segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }
    segments.iter().map(|s| s.trim().to_string()).collect()
}

/// Data row cells: first and last segments are dropped by position.
fn row_cells(line: &str) -> Vec<String> {
    let segments: Vec<&str> = line.split('|').collect();
    if segments.len() < 2 {
        return Vec::new();
    }
    segments[1..segments.len() - 1]
        .iter()
        .map(|s| s.trim().to_string())
        .collect()
}
