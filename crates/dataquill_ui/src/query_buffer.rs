//! Text buffer behind the SQL editor.
//!
//! Offsets are byte offsets into the text and always sit on grapheme
//! boundaries. The selection is a byte range; the caret is the end the user
//! last moved.

use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Indentation inserted by the tab key.
pub const INDENT: &str = "  ";

/// One piece of a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text { text: String, selected: bool },
    Caret,
}

/// Editable query text with a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuffer {
    text: String,
    selected_range: Range<usize>,
    selection_reversed: bool,
}

impl QueryBuffer {
    /// Create a buffer with the caret at the end of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self { text, selected_range: end..end, selection_reversed: false }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selected_range(&self) -> Range<usize> {
        self.selected_range.clone()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_range.is_empty()
    }

    pub fn selected_text(&self) -> &str {
        &self.text[self.selected_range.clone()]
    }

    /// Caret offset.
    pub fn cursor(&self) -> usize {
        if self.selection_reversed {
            self.selected_range.start
        } else {
            self.selected_range.end
        }
    }

    /// Replace the whole text and move the caret to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    // ========== Editing ==========

    /// Replace the selection with `text`.
    pub fn insert(&mut self, text: &str) {
        let range = self.selected_range.clone();
        self.text.replace_range(range.clone(), text);
        self.move_to(range.start + text.len());
    }

    pub fn newline(&mut self) {
        self.insert("\n");
    }

    pub fn indent(&mut self) {
        self.insert(INDENT);
    }

    /// Delete the selection, or the grapheme before the caret.
    pub fn backspace(&mut self) {
        if !self.has_selection() {
            self.select_to(self.previous_boundary(self.cursor()));
        }
        self.insert("");
    }

    /// Delete the selection, or the grapheme after the caret.
    pub fn delete(&mut self) {
        if !self.has_selection() {
            self.select_to(self.next_boundary(self.cursor()));
        }
        self.insert("");
    }

    /// Remove and return the selected text.
    pub fn cut(&mut self) -> Option<String> {
        if !self.has_selection() {
            return None;
        }
        let taken = self.selected_text().to_string();
        self.insert("");
        Some(taken)
    }

    // ========== Movement ==========

    pub fn move_left(&mut self) {
        if self.has_selection() {
            self.move_to(self.selected_range.start);
        } else {
            self.move_to(self.previous_boundary(self.cursor()));
        }
    }

    pub fn move_right(&mut self) {
        if self.has_selection() {
            self.move_to(self.selected_range.end);
        } else {
            self.move_to(self.next_boundary(self.cursor()));
        }
    }

    pub fn select_left(&mut self) {
        self.select_to(self.previous_boundary(self.cursor()));
    }

    pub fn select_right(&mut self) {
        self.select_to(self.next_boundary(self.cursor()));
    }

    pub fn select_all(&mut self) {
        self.selection_reversed = false;
        self.selected_range = 0..self.text.len();
    }

    pub fn move_to_line_start(&mut self) {
        self.move_to(self.line_start(self.cursor()));
    }

    pub fn move_to_line_end(&mut self) {
        self.move_to(self.line_end(self.cursor()));
    }

    /// Move to the same column on the previous line, or to the start.
    pub fn move_up(&mut self) {
        let cursor = self.cursor();
        let start = self.line_start(cursor);
        if start == 0 {
            self.move_to(0);
            return;
        }
        let column = self.column(cursor);
        let previous_start = self.line_start(start - 1);
        self.move_to(self.offset_at_column(previous_start, column));
    }

    /// Move to the same column on the next line, or to the end.
    pub fn move_down(&mut self) {
        let cursor = self.cursor();
        let end = self.line_end(cursor);
        if end == self.text.len() {
            self.move_to(end);
            return;
        }
        let column = self.column(cursor);
        self.move_to(self.offset_at_column(end + 1, column));
    }

    fn move_to(&mut self, offset: usize) {
        self.selected_range = offset..offset;
        self.selection_reversed = false;
    }

    fn select_to(&mut self, offset: usize) {
        if self.selection_reversed {
            self.selected_range.start = offset;
        } else {
            self.selected_range.end = offset;
        }
        if self.selected_range.end < self.selected_range.start {
            self.selection_reversed = !self.selection_reversed;
            self.selected_range = self.selected_range.end..self.selected_range.start;
        }
    }

    // ========== Boundaries ==========

    fn previous_boundary(&self, offset: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .rev()
            .find_map(|(idx, _)| (idx < offset).then_some(idx))
            .unwrap_or(0)
    }

    fn next_boundary(&self, offset: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .find_map(|(idx, _)| (idx > offset).then_some(idx))
            .unwrap_or(self.text.len())
    }

    fn line_start(&self, offset: usize) -> usize {
        self.text[..offset].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self, offset: usize) -> usize {
        self.text[offset..].find('\n').map_or(self.text.len(), |i| offset + i)
    }

    /// Caret column in graphemes.
    fn column(&self, offset: usize) -> usize {
        self.text[self.line_start(offset)..offset].graphemes(true).count()
    }

    fn offset_at_column(&self, line_start: usize, column: usize) -> usize {
        let line = &self.text[line_start..self.line_end(line_start)];
        line.grapheme_indices(true)
            .nth(column)
            .map_or(line_start + line.len(), |(idx, _)| line_start + idx)
    }

    // ========== Rendering ==========

    /// Lines split into selected/unselected runs with the caret placed.
    pub fn lines(&self) -> Vec<Vec<Segment>> {
        let cursor = self.cursor();
        let selection = self.selected_range.clone();
        let mut lines = Vec::new();
        let mut start = 0;

        for line in self.text.split('\n') {
            let end = start + line.len();
            let mut cuts = vec![start, end];
            cuts.extend(
                [selection.start, selection.end, cursor]
                    .into_iter()
                    .filter(|&offset| offset > start && offset < end),
            );
            cuts.sort_unstable();
            cuts.dedup();

            let mut segments = Vec::new();
            if cursor == start {
                segments.push(Segment::Caret);
            }
            for pair in cuts.windows(2) {
                let (from, to) = (pair[0], pair[1]);
                let selected = !selection.is_empty() && from >= selection.start && to <= selection.end;
                segments.push(Segment::Text { text: self.text[from..to].to_string(), selected });
                if to == cursor {
                    segments.push(Segment::Caret);
                }
            }
            lines.push(segments);
            start = end + 1;
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(segment: &Segment) -> Option<(&str, bool)> {
        match segment {
            Segment::Text { text, selected } => Some((text.as_str(), *selected)),
            Segment::Caret => None,
        }
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut buffer = QueryBuffer::new("SELECT");
        buffer.insert(" 1");
        assert_eq!(buffer.text(), "SELECT 1");
        buffer.backspace();
        buffer.backspace();
        assert_eq!(buffer.text(), "SELECT");
        assert_eq!(buffer.cursor(), 6);
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut buffer = QueryBuffer::new("Taquería");
        buffer.move_left();
        buffer.backspace();
        assert_eq!(buffer.text(), "Taquera");

        let mut combining = QueryBuffer::new("cafe\u{301}");
        combining.backspace();
        assert_eq!(combining.text(), "caf");
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut buffer = QueryBuffer::new("abc");
        buffer.delete();
        assert_eq!(buffer.text(), "abc");
        buffer.move_to_line_start();
        buffer.delete();
        assert_eq!(buffer.text(), "bc");
    }

    #[test]
    fn test_select_all_then_type_replaces() {
        let mut buffer = QueryBuffer::new("SELECT * FROM Customers");
        buffer.select_all();
        assert_eq!(buffer.selected_text(), "SELECT * FROM Customers");
        buffer.insert("DROP TABLE t");
        assert_eq!(buffer.text(), "DROP TABLE t");
        assert!(!buffer.has_selection());
    }

    #[test]
    fn test_selection_flips_direction() {
        let mut buffer = QueryBuffer::new("abcd");
        buffer.move_left();
        buffer.select_right();
        assert_eq!(buffer.selected_range(), 3..4);
        buffer.move_left();
        buffer.move_left();
        buffer.select_left();
        buffer.select_left();
        assert_eq!(buffer.selected_range(), 0..2);
        assert_eq!(buffer.cursor(), 0);
        assert_eq!(buffer.cut().as_deref(), Some("ab"));
        assert_eq!(buffer.text(), "cd");
        assert_eq!(buffer.cut(), None);
    }

    #[test]
    fn test_line_navigation() {
        let mut buffer = QueryBuffer::new("SELECT *\nFROM Orders\nWHERE 1");
        buffer.move_to_line_start();
        assert_eq!(buffer.cursor(), 21);
        buffer.move_up();
        assert_eq!(buffer.cursor(), 9);
        buffer.move_to_line_end();
        assert_eq!(buffer.cursor(), 20);
        buffer.move_up();
        assert_eq!(buffer.cursor(), 8);
        buffer.move_down();
        buffer.move_down();
        assert_eq!(buffer.cursor(), buffer.text().len());
        buffer.move_up();
        buffer.move_up();
        buffer.move_up();
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_newline_and_indent() {
        let mut buffer = QueryBuffer::new("SELECT *");
        buffer.newline();
        buffer.indent();
        buffer.insert("FROM Products");
        assert_eq!(buffer.text(), "SELECT *\n  FROM Products");
    }

    #[test]
    fn test_lines_place_caret() {
        let mut buffer = QueryBuffer::new("ab\ncd");
        buffer.move_up();
        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], vec![Segment::Text { text: "ab".into(), selected: false }, Segment::Caret]);
        assert_eq!(lines[1], vec![Segment::Text { text: "cd".into(), selected: false }]);

        let empty = QueryBuffer::new("");
        assert_eq!(empty.lines(), vec![vec![Segment::Caret]]);
    }

    #[test]
    fn test_lines_mark_selection() {
        let mut buffer = QueryBuffer::new("abc\ndef");
        buffer.move_left();
        buffer.select_left();
        buffer.select_left();
        buffer.select_left();
        buffer.select_left();
        assert_eq!(buffer.selected_text(), "c\nde");

        let lines = buffer.lines();
        let first: Vec<_> = lines[0].iter().filter_map(text).collect();
        assert_eq!(first, vec![("ab", false), ("c", true)]);
        assert_eq!(lines[0][1], Segment::Caret);
        let second: Vec<_> = lines[1].iter().filter_map(text).collect();
        assert_eq!(second, vec![("de", true), ("f", false)]);
    }
}
