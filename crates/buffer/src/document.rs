// Chunk: docs/chunks/text_buffer - Unlocked editing core

//! The unlocked state behind a [`Buffer`](crate::Buffer).
//!
//! A [`Document`] ties the line store, display cache, marks, rule set and
//! layout configuration together so every edit leaves them consistent:
//!
//! 1. mutate the [`LineStore`]
//! 2. reflow the smallest affected line range
//! 3. adjust marks
//! 4. re-clamp the scroll offset
//!
//! History recording happens one level up, so undo and redo can replay edits
//! through the same primitives without recording them again.

use std::ops::Range;

use gridpad_syntax::Syntax;
use tracing::{debug, trace};

use crate::config::BufferConfig;
use crate::display::{DisplayCache, DisplayLine, Layout};
use crate::line_store::LineStore;
use crate::marks::MarkTable;
use crate::types::Position;
use crate::undo::EditTarget;

#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) lines: LineStore,
    pub(crate) display: DisplayCache,
    pub(crate) marks: MarkTable,
    syntax: Syntax,
    pub(crate) config: BufferConfig,
    /// Index of the first visible display line.
    pub(crate) scroll: usize,
}

impl Document {
    /// Creates an empty document laid out with `config`.
    pub fn new(config: BufferConfig) -> Self {
        let mut doc = Self {
            lines: LineStore::new(),
            display: DisplayCache::new(),
            marks: MarkTable::new(),
            syntax: Syntax::default(),
            config: config.clamped(),
            scroll: 0,
        };
        doc.reflow_all();
        doc
    }

    /// Replaces the layout configuration and reflows everything if the
    /// column count or tab width changed.
    pub fn set_config(&mut self, config: BufferConfig) {
        let config = config.clamped();
        let relayout =
            config.cols != self.config.cols || config.tab_width != self.config.tab_width;
        debug!(
            cols = config.cols,
            rows = config.rows,
            tab_width = config.tab_width,
            relayout,
            "buffer layout changed"
        );
        self.config = config;
        if relayout {
            self.reflow_all();
        } else {
            self.clamp_scroll();
        }
    }

    /// Replaces the rule set and reflows everything.
    pub fn set_syntax(&mut self, syntax: Syntax) {
        debug!(rules = syntax.rules().len(), "syntax rules replaced");
        self.syntax = syntax;
        self.reflow_all();
    }

    fn reflow(&mut self, range: Range<usize>) {
        let layout = Layout {
            cols: self.config.cols,
            tab_width: self.config.tab_width,
            syntax: &self.syntax,
        };
        self.display.reflow(&mut self.lines, range, &layout);
    }

    fn reflow_all(&mut self) {
        self.reflow(0..self.lines.len());
        self.clamp_scroll();
        debug!(
            lines = self.lines.len(),
            display_lines = self.display.len(),
            "full reflow"
        );
    }

    /// Returns the largest valid scroll offset.
    pub(crate) fn max_scroll(&self) -> usize {
        self.display.len().saturating_sub(self.config.rows)
    }

    pub(crate) fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Moves the scroll offset by `delta` display lines, clamped.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta).min(self.max_scroll());
    }

    /// Returns `scroll / max_scroll`, or `-1.0` when everything fits.
    pub fn scroll_fraction(&self) -> f64 {
        match self.max_scroll() {
            0 => -1.0,
            max => self.scroll as f64 / max as f64,
        }
    }

    /// Returns the clamped form of `pos`.
    pub fn clip(&self, pos: Position) -> Position {
        self.lines.clip(pos)
    }

    /// Clips a range and returns it only if it is non-empty both before and
    /// after clipping.
    fn clip_range(&self, begin: Position, end: Position) -> Option<(Position, Position)> {
        if end <= begin {
            return None;
        }
        let (begin, end) = (self.clip(begin), self.clip(end));
        (begin < end).then_some((begin, end))
    }

    /// Inserts `text` at `at` (clipped). Returns the clipped start and the
    /// position just past the inserted text; they are equal for empty text.
    pub fn insert(&mut self, at: Position, text: &str) -> (Position, Position) {
        let start = self.clip(at);
        if text.is_empty() {
            return (start, start);
        }
        let end = self.lines.insert(start, text);
        self.reflow(start.line_index()..end.line_index() + 1);
        self.marks.adjust_insert(start, end);
        self.clamp_scroll();
        trace!(%start, %end, "insert");
        (start, end)
    }

    /// Removes `[begin, end)` (clipped). Returns the clipped range and the
    /// removed text, or `None` when the range is empty or inverted.
    pub fn delete(&mut self, begin: Position, end: Position) -> Option<(Position, Position, String)> {
        let (begin, end) = self.clip_range(begin, end)?;
        let removed = self.lines.delete(begin, end);
        let line = begin.line_index();
        self.reflow(line..line + 1);
        self.marks.adjust_delete(begin, end);
        self.clamp_scroll();
        trace!(%begin, %end, "delete");
        Some((begin, end, removed))
    }

    /// Returns the text in `[begin, end)` (clipped), or an empty string for an
    /// empty or inverted range.
    pub fn get(&self, begin: Position, end: Position) -> String {
        self.clip_range(begin, end)
            .map(|(begin, end)| self.lines.text_between(begin, end))
            .unwrap_or_default()
    }

    /// Returns exactly `rows` display lines starting at the scroll offset,
    /// padded with empty lines past the end of the content.
    pub fn visible_lines(&self) -> Vec<DisplayLine> {
        (self.scroll..self.scroll + self.config.rows)
            .map(|index| self.display.get(index).cloned().unwrap_or_default())
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(BufferConfig::default())
    }
}

impl EditTarget for Document {
    fn insert(&mut self, at: Position, text: &str) -> Position {
        Document::insert(self, at, text).1
    }

    fn delete(&mut self, start: Position, end: Position) -> String {
        Document::delete(self, start, end)
            .map(|(_, _, removed)| removed)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str, cols: usize, rows: usize) -> Document {
        let mut doc = Document::new(BufferConfig {
            cols,
            rows,
            tab_width: 4,
        });
        doc.insert(Position::new(1, 0), text);
        doc
    }

    #[test]
    fn test_new_document_has_one_display_line() {
        let doc = Document::default();
        assert_eq!(doc.lines.len(), 1);
        assert_eq!(doc.display.len(), 1);
        assert_eq!(doc.lines.content(), "");
    }

    #[test]
    fn test_insert_empty_text_is_noop() {
        let mut doc = doc("abc", 80, 24);
        let (start, end) = doc.insert(Position::new(1, 9), "");
        assert_eq!(start, Position::new(1, 3));
        assert_eq!(start, end);
        assert_eq!(doc.lines.content(), "abc");
    }

    #[test]
    fn test_insert_reflows_new_lines() {
        let mut doc = doc("first\nlast", 3, 24);
        assert_eq!(doc.display.len(), 2 + 2);
        doc.insert(Position::new(1, 5), "\nabcdefg");
        assert_eq!(doc.display.len(), 2 + 3 + 2);
        assert_eq!(doc.lines.line(1).anchor(), 2);
        assert_eq!(doc.lines.line(2).anchor(), 5);
    }

    #[test]
    fn test_delete_rejects_inverted_and_collapsed_ranges() {
        let mut doc = doc("abc", 80, 24);
        assert!(doc.delete(Position::new(1, 2), Position::new(1, 1)).is_none());
        assert!(doc.delete(Position::new(1, 2), Position::new(1, 2)).is_none());
        // Both ends clip to 1:3.
        assert!(doc.delete(Position::new(1, 5), Position::new(1, 9)).is_none());
        assert_eq!(doc.lines.content(), "abc");
    }

    #[test]
    fn test_delete_joins_lines_and_reflows() {
        let mut doc = doc("ab\ncd\nef", 80, 24);
        let (begin, end, removed) = doc
            .delete(Position::new(1, 1), Position::new(3, 1))
            .unwrap();
        assert_eq!((begin, end), (Position::new(1, 1), Position::new(3, 1)));
        assert_eq!(removed, "b\ncd\ne");
        assert_eq!(doc.lines.content(), "af");
        assert_eq!(doc.display.len(), 1);
    }

    #[test]
    fn test_get_clips_and_rejects_inverted() {
        let doc = doc("hello\nworld", 80, 24);
        assert_eq!(doc.get(Position::new(1, 3), Position::new(2, 2)), "lo\nwo");
        assert_eq!(doc.get(Position::new(2, 2), Position::new(1, 3)), "");
        assert_eq!(doc.get(Position::new(0, 0), Position::new(9, 9)), "hello\nworld");
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut doc = doc("1\n2\n3\n4\n5", 80, 2);
        doc.scroll_by(10);
        assert_eq!(doc.scroll, 3);
        assert_eq!(doc.scroll_fraction(), 1.0);
        doc.scroll_by(-10);
        assert_eq!(doc.scroll, 0);
        assert_eq!(doc.scroll_fraction(), 0.0);
    }

    #[test]
    fn test_scroll_reclamped_after_delete() {
        let mut doc = doc("1\n2\n3\n4\n5", 80, 2);
        doc.scroll_by(3);
        doc.delete(Position::new(1, 1), Position::new(5, 1));
        assert_eq!(doc.scroll, 0);
        assert_eq!(doc.scroll_fraction(), -1.0);
    }

    #[test]
    fn test_visible_lines_padded() {
        let doc = doc("one\ntwo", 80, 4);
        let lines = doc.visible_lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text(), "one");
        assert_eq!(lines[1].text(), "two");
        assert_eq!(lines[2], DisplayLine::default());
        assert_eq!(lines[3], DisplayLine::default());
    }

    #[test]
    fn test_set_config_relayouts_on_cols_change() {
        let mut doc = doc("abcdef", 80, 24);
        assert_eq!(doc.display.len(), 1);
        doc.set_config(BufferConfig {
            cols: 2,
            rows: 24,
            tab_width: 4,
        });
        assert_eq!(doc.display.len(), 3);
    }

    #[test]
    fn test_edit_target_delete_returns_removed_text() {
        let mut doc = doc("hello", 80, 24);
        let removed = EditTarget::delete(&mut doc, Position::new(1, 1), Position::new(1, 3));
        assert_eq!(removed, "el");
        let end = EditTarget::insert(&mut doc, Position::new(1, 1), "el");
        assert_eq!(end, Position::new(1, 3));
        assert_eq!(doc.lines.content(), "hello");
    }
}
