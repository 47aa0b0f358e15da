//! Terminal layout for formatted replies.
//!
//! Paragraphs are printed as-is (line breaks preserved); tables go through
//! comfy-table.

use comfy_table::{ContentArrangement, Table};
use ragdesk_core::format::ContentBlock;

/// Renders blocks into plain text lines, with a blank line between blocks.
pub fn render_blocks(blocks: &[ContentBlock], max_width: Option<u16>) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        match block {
            ContentBlock::Paragraph { text } => lines.extend(text.lines().map(String::from)),
            ContentBlock::Table { headers, rows } => {
                lines.extend(render_table(headers, rows, max_width));
            }
        }
    }
    lines
}

/// Renders one table and returns its lines.
fn render_table(headers: &[String], rows: &[Vec<String>], max_width: Option<u16>) -> Vec<String> {
    let mut table = Table::new();

    // Without an explicit width comfy-table falls back to the tty width, if any.
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some(width) = max_width {
        table.set_width(width);
    }

    if !headers.is_empty() {
        table.set_header(headers);
    }

    for row in rows {
        table.add_row(row);
    }

    table.to_string().lines().map(String::from).collect()
}

/// Joins rendered lines into a printable string.
pub fn render_to_string(blocks: &[ContentBlock], max_width: Option<u16>) -> String {
    render_blocks(blocks, max_width).join("\n")
}

#[cfg(test)]
mod tests {
    use ragdesk_core::format::format_response;

    use super::*;

    #[test]
    fn test_paragraph_keeps_line_breaks() {
        let blocks = format_response("Findings: * first * second");
        let lines = render_blocks(&blocks, None);
        assert_eq!(lines, vec!["Findings:", "", "• first", "", "• second"]);
    }

    #[test]
    fn test_table_renders() {
        let blocks = format_response("| A | B |\n|---|---|\n| 1 | 2 |");
        let lines = render_blocks(&blocks, Some(40));

        assert!(lines.len() >= 3, "Table should render multiple lines");
        let combined = lines.join("\n");
        assert!(combined.contains('A'), "Table should contain header A");
        assert!(combined.contains('B'), "Table should contain header B");
        assert!(combined.contains('1'), "Table should contain cell 1");
        assert!(combined.contains('2'), "Table should contain cell 2");
        assert!(!combined.contains("---|"), "Separator row should not be rendered");
    }

    #[test]
    fn test_blocks_are_separated_by_blank_line() {
        let blocks = format_response("Intro\n| A |\n|---|\n| 1 |\nOutro");
        let lines = render_blocks(&blocks, None);
        assert_eq!(lines.first().map(String::as_str), Some("Intro"));
        assert_eq!(lines.get(1).map(String::as_str), Some(""));
        assert_eq!(lines.last().map(String::as_str), Some("Outro"));
        assert_eq!(lines[lines.len() - 2], "");
    }

    #[test]
    fn test_empty_blocks_render_nothing() {
        assert!(render_to_string(&[], None).is_empty());
    }
}
