// Chunk: docs/chunks/text_buffer - Line store with display-run anchors

//! Ordered storage of logical lines.
//!
//! Each [`Line`] owns its characters and the index of the first display line
//! of its run in the [`DisplayCache`](crate::display::DisplayCache). Anchors
//! are kept in ascending order by reflow, which lets coordinate lookups find
//! the owning line of a display row with a binary search.
//!
//! Mutations here only touch text. Callers reflow the affected lines
//! afterwards; until then the anchors of freshly inserted lines are
//! placeholders.

use crate::types::Position;

/// A single logical line.
#[derive(Debug, Clone, Default)]
pub struct Line {
    text: Vec<char>,
    /// Index of the first display line of this line's run.
    anchor: usize,
}

impl Line {
    fn new(text: Vec<char>) -> Self {
        Self { text, anchor: 0 }
    }

    /// Returns the raw characters of the line (no newline).
    pub fn text(&self) -> &[char] {
        &self.text
    }

    /// Returns the number of characters in the line.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns the display index of the first display line of this line's run.
    pub fn anchor(&self) -> usize {
        self.anchor
    }
}

/// The logical lines of a buffer, in order.
///
/// A store always holds at least one line (even when empty).
#[derive(Debug, Clone)]
pub struct LineStore {
    lines: Vec<Line>,
}

impl LineStore {
    /// Creates a store with a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::default()],
        }
    }

    /// Returns the number of lines. Always at least 1.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns the line at 0-based `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn line(&self, index: usize) -> &Line {
        &self.lines[index]
    }

    /// Returns the line at 0-based `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub(crate) fn set_anchor(&mut self, index: usize, anchor: usize) {
        self.lines[index].anchor = anchor;
    }

    /// Shifts the anchors of every line from `from` onwards by `delta`.
    pub(crate) fn shift_anchors(&mut self, from: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        for line in self.lines.iter_mut().skip(from) {
            line.anchor = line.anchor.saturating_add_signed(delta);
        }
    }

    /// Returns the 0-based index of the line whose run contains display line
    /// `display_index`.
    pub fn line_at_display(&self, display_index: usize) -> usize {
        self.lines
            .partition_point(|line| line.anchor <= display_index)
            .saturating_sub(1)
    }

    /// Clamps `pos` into the buffer: line into `[1, len]`, character into
    /// `[0, line length]`.
    pub fn clip(&self, pos: Position) -> Position {
        let line = pos.line.clamp(1, self.lines.len() as isize);
        let len = self.lines[(line - 1) as usize].len() as isize;
        Position::new(line, pos.ch.clamp(0, len))
    }

    /// Returns the position after the last character.
    pub fn end(&self) -> Position {
        let last = self.lines.len();
        Position::new(last as isize, self.lines[last - 1].len() as isize)
    }

    /// Returns the text between two clipped positions, `begin <= end`.
    pub fn text_between(&self, begin: Position, end: Position) -> String {
        let (first, last) = (begin.line_index(), end.line_index());
        if first == last {
            return self.lines[first].text[begin.char_index()..end.char_index()]
                .iter()
                .collect();
        }

        let mut out: String = self.lines[first].text[begin.char_index()..].iter().collect();
        for line in &self.lines[first + 1..last] {
            out.push('\n');
            out.extend(line.text.iter());
        }
        out.push('\n');
        out.extend(self.lines[last].text[..end.char_index()].iter());
        out
    }

    /// Inserts `text` at clipped position `at`, splitting lines at each
    /// newline. Returns the position just past the inserted text.
    pub fn insert(&mut self, at: Position, text: &str) -> Position {
        let index = at.line_index();
        let mut segments = text.split('\n');

        let tail = self.lines[index].text.split_off(at.char_index());
        if let Some(first) = segments.next() {
            self.lines[index].text.extend(first.chars());
        }

        let new_lines: Vec<Line> = segments.map(|s| Line::new(s.chars().collect())).collect();
        let added = new_lines.len();
        self.lines.splice(index + 1..index + 1, new_lines);

        let last = &mut self.lines[index + added].text;
        let end = Position::new((index + added + 1) as isize, last.len() as isize);
        last.extend(tail);
        end
    }

    /// Removes the text between two clipped positions, `begin < end`,
    /// joining the first and last lines. Returns the removed text.
    pub fn delete(&mut self, begin: Position, end: Position) -> String {
        let removed = self.text_between(begin, end);
        let (first, last) = (begin.line_index(), end.line_index());

        if first == last {
            self.lines[first]
                .text
                .drain(begin.char_index()..end.char_index());
        } else {
            let tail = self.lines[last].text.split_off(end.char_index());
            let head = &mut self.lines[first].text;
            head.truncate(begin.char_index());
            head.extend(tail);
            self.lines.drain(first + 1..=last);
        }
        removed
    }

    /// Returns the whole content, lines joined with `'\n'`.
    pub fn content(&self) -> String {
        self.text_between(Position::new(1, 0), self.end())
    }
}

impl Default for LineStore {
    fn default() -> Self {
        Self::new()
    }
}
