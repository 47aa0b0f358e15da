//! Mixed-content response formatting for backend replies.
//!
//! This module provides:
//! - `format_response()`: Split a reply into paragraph and table blocks
//! - `classify_line()`: Decide whether a single line is a table row
//!
//! The formatter is total: every string input yields a (possibly empty)
//! sequence of blocks. Layout is left to whatever consumes the blocks.

mod blocks;
mod segment;

use serde::{Deserialize, Serialize};

pub use segment::{LineKind, classify_line};

/// One unit of a formatted reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Reflowed prose. Internal line breaks are significant.
    Paragraph { text: String },
    /// A pipe-delimited table. Rows are not normalized to the header width.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl ContentBlock {
    /// Creates a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table { .. })
    }
}

/// The formatted form of one backend reply.
pub type RenderedMessage = Vec<ContentBlock>;

/// Formats a raw backend reply into ordered content blocks.
///
/// Consecutive pipe-bounded lines become a table (when there are at least
/// two of them), everything else becomes paragraphs. Empty or
/// whitespace-only input yields no blocks.
pub fn format_response(raw: &str) -> RenderedMessage {
    let mut segmenter = segment::Segmenter::new();
    for line in raw.split('\n') {
        segmenter.push_line(line);
    }
    segmenter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> ContentBlock {
        ContentBlock::Table {
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }

    #[test]
    fn test_empty_input_yields_no_blocks() {
        assert!(format_response("").is_empty());
        assert!(format_response("   \n\n \t ").is_empty());
    }

    #[test]
    fn test_plain_text_is_single_paragraph() {
        let blocks = format_response("first line\nsecond line\n\nthird");
        assert_eq!(
            blocks,
            vec![ContentBlock::paragraph("first line\nsecond line\n\nthird")]
        );
    }

    #[test]
    fn test_bullet_reflow_example() {
        let blocks = format_response("Findings: * first point * second point");
        assert_eq!(
            blocks,
            vec![ContentBlock::paragraph(
                "Findings:\n\n• first point\n\n• second point"
            )]
        );
    }

    #[test]
    fn test_table_example() {
        let blocks = format_response("| Name | Age |\n|---|---|\n| Alice | 30 |\n| Bob | 25 |");
        assert_eq!(
            blocks,
            vec![table(
                &["Name", "Age"],
                &[&["Alice", "30"], &["Bob", "25"]]
            )]
        );
    }

    #[test]
    fn test_mixed_example() {
        let blocks = format_response("Intro text\n| A | B |\n|---|---|\n| 1 | 2 |\nOutro text");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::paragraph("Intro text"),
                table(&["A", "B"], &[&["1", "2"]]),
                ContentBlock::paragraph("Outro text"),
            ]
        );
    }

    #[test]
    fn test_table_row_count_is_lines_minus_two() {
        let input = "| a | b | c |\n| x | y | z |\n| 1 | 2 | 3 |\n| 4 | 5 | 6 |\n| 7 | 8 | 9 |";
        let blocks = format_response(input);
        assert_eq!(blocks.len(), 1);
        let ContentBlock::Table { headers, rows } = &blocks[0] else {
            panic!("expected a table, got {blocks:?}");
        };
        assert_eq!(headers.len(), 3);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_two_pipe_lines_make_header_only_table() {
        let blocks = format_response("| only | header |\n|---|---|");
        assert_eq!(blocks, vec![table(&["only", "header"], &[])]);
    }

    // A lone pipe row is dropped entirely; it does not fall back to text, and the
    // text around it stays split in two paragraphs.
    #[test]
    fn test_single_pipe_line_is_dropped_and_splits_text() {
        let blocks = format_response("before\n| lonely | row |\nafter");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::paragraph("before"),
                ContentBlock::paragraph("after"),
            ]
        );
        assert!(!blocks.iter().any(ContentBlock::is_table));
    }

    #[test]
    fn test_single_pipe_line_alone_yields_nothing() {
        assert!(format_response("| just | one |").is_empty());
    }

    // Data rows drop the first and last split segments by position, so a
    // doubled closing pipe leaves an empty trailing cell behind.
    #[test]
    fn test_data_row_positional_drop_keeps_stray_empty_cell() {
        let blocks = format_response("| A | B |\n|---|---|\n| 1 | 2 ||");
        assert_eq!(blocks, vec![table(&["A", "B"], &[&["1", "2", ""]])]);
    }

    #[test]
    fn test_mismatched_cell_counts_are_kept() {
        let blocks = format_response("| A | B |\n|---|---|\n| 1 |\n| 1 | 2 | 3 |");
        assert_eq!(
            blocks,
            vec![table(&["A", "B"], &[&["1"], &["1", "2", "3"]])]
        );
    }

    #[test]
    fn test_separator_row_is_discarded_whatever_it_holds() {
        let blocks = format_response("| A | B |\n| not | dashes |\n| 1 | 2 |");
        assert_eq!(blocks, vec![table(&["A", "B"], &[&["1", "2"]])]);
    }

    #[test]
    fn test_indented_table_rows_are_recognized() {
        let blocks = format_response("  | A | B |  \n\t|---|---|\n   | 1 | 2 |");
        assert_eq!(blocks, vec![table(&["A", "B"], &[&["1", "2"]])]);
    }

    #[test]
    fn test_adjacent_tables_separated_by_blank_line() {
        let blocks = format_response("| A |\n|---|\n| 1 |\n\n| B |\n|---|\n| 2 |");
        assert_eq!(
            blocks,
            vec![table(&["A"], &[&["1"]]), table(&["B"], &[&["2"]])]
        );
    }

    #[test]
    fn test_leading_bullet_has_no_blank_line() {
        let blocks = format_response("* alpha * beta");
        assert_eq!(blocks, vec![ContentBlock::paragraph("• alpha\n\n• beta")]);
    }

    // A list item renders the same whether or not it opens the paragraph.
    #[test]
    fn test_list_items_reflow_regardless_of_position() {
        assert_eq!(
            format_response("Key findings:\n* alpha\n* beta"),
            vec![ContentBlock::paragraph("Key findings:\n\n• alpha\n\n• beta")]
        );
        assert_eq!(
            format_response("intro\n| x |\n|---|\n* after table"),
            vec![
                ContentBlock::paragraph("intro"),
                table(&["x"], &[]),
                ContentBlock::paragraph("• after table"),
            ]
        );
    }

    #[test]
    fn test_formatting_is_idempotent_per_input() {
        let input = "Summary * one * two\n| k | v |\n|---|---|\n| a | 1 |\ntrailing";
        assert_eq!(format_response(input), format_response(input));
    }

    #[test]
    fn test_block_serializes_with_type_tag() {
        let json = serde_json::to_value(ContentBlock::paragraph("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "paragraph", "text": "hi"}));
    }
}
