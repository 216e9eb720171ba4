// Chunk: docs/chunks/line_wrap_rendering - Mapping between positions and screen cells

//! Conversions between logical positions and screen coordinates.
//!
//! Screen coordinates are `(col, row)` relative to the scroll offset. Rows
//! count display lines, so a wrapped logical line spans several rows; columns
//! count expanded cells, so a tab spans several columns.

use crate::document::Document;
use crate::tabs;
use crate::types::Position;

impl Document {
    /// Returns the screen cell of `pos` (clipped) as `(col, row)`.
    ///
    /// The row is relative to the scroll offset and may lie outside the
    /// visible area.
    pub fn coords_from_index(&self, pos: Position) -> (isize, isize) {
        let pos = self.clip(pos);
        let line = self.lines.line(pos.line_index());
        let cols = self.config.cols;
        let width = tabs::display_width(
            line.text()[..pos.char_index()].iter().copied(),
            self.config.tab_width,
        );
        let row = (line.anchor() + width / cols) as isize - self.scroll as isize;
        ((width % cols) as isize, row)
    }

    /// Returns the position under screen cell `(col, row)`.
    ///
    /// Rows outside the content resolve to the first or last display line. A
    /// column inside a tab, or past the end of the line, resolves to the
    /// character that starts there or to the end of the line.
    pub fn index_from_coords(&self, col: isize, row: isize) -> Position {
        let cols = self.config.cols;
        let mut col = col.max(0) as usize;
        let total = self.display.len() as isize;
        let absolute = row.saturating_add(self.scroll as isize).saturating_add(1);
        let mut index = (absolute.clamp(1, total) - 1) as usize;

        while index > 0 && self.display.get(index).is_some_and(|d| d.continuation) {
            index -= 1;
            col += cols;
        }

        let line_index = self.lines.line_at_display(index);
        let mut width = 0;
        let mut ch = 0;
        for &c in self.lines.line(line_index).text() {
            let next = tabs::advance(width, c, self.config.tab_width);
            if next > col {
                break;
            }
            width = next;
            ch += 1;
        }
        Position::new(line_index as isize + 1, ch)
    }

    /// Moves `pos` (clipped) by `count` characters, forward when positive.
    ///
    /// Each line break counts as one character. Movement stops at the start
    /// and the end of the buffer.
    pub fn shift_index(&self, pos: Position, count: isize) -> Position {
        let mut pos = self.clip(pos);
        let last = self.lines.len() as isize;
        let line_len = |line: isize| self.lines.line((line - 1) as usize).len() as isize;

        if count >= 0 {
            let mut remaining = count;
            loop {
                let len = line_len(pos.line);
                let room = len - pos.ch;
                if remaining <= room {
                    pos.ch += remaining;
                    break;
                }
                if pos.line == last {
                    pos.ch = len;
                    break;
                }
                remaining -= room + 1;
                pos.line += 1;
                pos.ch = 0;
            }
        } else {
            let mut remaining = count.saturating_neg();
            loop {
                if remaining <= pos.ch {
                    pos.ch -= remaining;
                    break;
                }
                if pos.line == 1 {
                    pos.ch = 0;
                    break;
                }
                remaining -= pos.ch + 1;
                pos.line -= 1;
                pos.ch = line_len(pos.line);
            }
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BufferConfig;

    fn doc(text: &str, cols: usize, tab_width: usize) -> Document {
        let mut doc = Document::new(BufferConfig {
            cols,
            rows: 24,
            tab_width,
        });
        doc.insert(Position::new(1, 0), text);
        doc
    }

    #[test]
    fn test_coords_on_wrapped_line_with_tab() {
        let doc = doc("\n\thello", 4, 8);
        assert_eq!(doc.coords_from_index(Position::new(2, 3)), (2, 3));
        assert_eq!(doc.coords_from_index(Position::new(1, 0)), (0, 0));
        assert_eq!(doc.coords_from_index(Position::new(2, 0)), (0, 1));
    }

    #[test]
    fn test_index_from_continuation_row() {
        let doc = doc("\n\thello", 4, 8);
        assert_eq!(doc.index_from_coords(2, 3), Position::new(2, 3));
        // Inside the tab's cells.
        assert_eq!(doc.index_from_coords(3, 1), Position::new(2, 0));
        assert_eq!(doc.index_from_coords(0, 3), Position::new(2, 1));
    }

    #[test]
    fn test_index_from_coords_clamps() {
        let doc = doc("ab\ncd", 80, 8);
        assert_eq!(doc.index_from_coords(-5, -5), Position::new(1, 0));
        assert_eq!(doc.index_from_coords(99, 99), Position::new(2, 2));
    }

    #[test]
    fn test_coords_account_for_scroll() {
        let mut doc = doc("a\nb\nc\nd", 80, 8);
        doc.config.rows = 2;
        doc.scroll_by(2);
        assert_eq!(doc.coords_from_index(Position::new(1, 0)), (0, -2));
        assert_eq!(doc.coords_from_index(Position::new(4, 1)), (1, 1));
        assert_eq!(doc.index_from_coords(0, 0), Position::new(3, 0));
    }

    #[test]
    fn test_shift_index_within_line() {
        let doc = doc("hello\nworld", 80, 8);
        assert_eq!(doc.shift_index(Position::new(1, 1), 3), Position::new(1, 4));
        assert_eq!(doc.shift_index(Position::new(1, 4), -3), Position::new(1, 1));
        assert_eq!(doc.shift_index(Position::new(2, 2), 0), Position::new(2, 2));
    }

    #[test]
    fn test_shift_index_crosses_line_breaks() {
        let doc = doc("hello\nworld", 80, 8);
        assert_eq!(doc.shift_index(Position::new(1, 5), 1), Position::new(2, 0));
        assert_eq!(doc.shift_index(Position::new(1, 3), 4), Position::new(2, 1));
        assert_eq!(doc.shift_index(Position::new(2, 0), -1), Position::new(1, 5));
        assert_eq!(doc.shift_index(Position::new(2, 1), -4), Position::new(1, 3));
    }

    #[test]
    fn test_shift_index_clamps_at_boundaries() {
        let doc = doc("hello\nworld", 80, 8);
        assert_eq!(doc.shift_index(Position::new(1, 2), 100), Position::new(2, 5));
        assert_eq!(doc.shift_index(Position::new(2, 2), -100), Position::new(1, 0));
    }
}
