//! Line classification and region segmentation.

use super::blocks::{build_paragraph, build_table};
use super::{ContentBlock, RenderedMessage};

/// Classification of a single reply line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Trimmed line starts and ends with `|`.
    TableRow,
    /// Anything else, including empty lines.
    Text,
}

/// Classifies a line as a table row or text.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.starts_with('|') && trimmed.ends_with('|') {
        LineKind::TableRow
    } else {
        LineKind::Text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InText,
    InTable,
}

/// Groups consecutive lines of the same kind into regions and emits a block
/// per region as soon as the region closes.
#[derive(Debug)]
pub(super) struct Segmenter<'a> {
    state: State,
    text_lines: Vec<&'a str>,
    table_lines: Vec<&'a str>,
    blocks: RenderedMessage,
}

impl<'a> Segmenter<'a> {
    pub(super) fn new() -> Self {
        Self {
            state: State::InText,
            text_lines: Vec::new(),
            table_lines: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub(super) fn push_line(&mut self, line: &'a str) {
        match (self.state, classify_line(line)) {
            (State::InText, LineKind::Text) => self.text_lines.push(line),
            (State::InText, LineKind::TableRow) => {
                self.flush_text();
                self.table_lines.push(line);
                self.state = State::InTable;
            }
            (State::InTable, LineKind::TableRow) => self.table_lines.push(line),
            (State::InTable, LineKind::Text) => {
                self.flush_table();
                self.text_lines.push(line);
                self.state = State::InText;
            }
        }
    }

    pub(super) fn finish(mut self) -> RenderedMessage {
        match self.state {
            State::InText => self.flush_text(),
            State::InTable => self.flush_table(),
        }
        self.blocks
    }

    fn flush_text(&mut self) {
        if self.text_lines.is_empty() {
            return;
        }
        let joined = self.text_lines.join("\n");
        self.text_lines.clear();
        if let Some(text) = build_paragraph(&joined) {
            self.blocks.push(ContentBlock::Paragraph { text });
        }
    }

    /// Regions shorter than header + separator are dropped, not demoted to text.
    fn flush_table(&mut self) {
        let lines = std::mem::take(&mut self.table_lines);
        if let Some(block) = build_table(&lines) {
            self.blocks.push(block);
        }
    }
}
