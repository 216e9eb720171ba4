// Chunk: docs/chunks/text_buffer - Logical positions

use std::fmt;

/// Position in the buffer as (line, character).
///
/// Lines are 1-indexed and characters are 0-indexed code point offsets.
/// Fields are signed so callers can pass out-of-range values; every buffer
/// operation clips positions before using them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: isize,
    pub ch: isize,
}

impl Position {
    pub const fn new(line: isize, ch: isize) -> Self {
        Self { line, ch }
    }

    /// The sentinel returned for marks that were never set.
    pub const UNSET: Position = Position::new(0, 0);

    /// Returns the 0-based line index. Only meaningful on a clipped position.
    pub(crate) fn line_index(self) -> usize {
        (self.line.max(1) - 1) as usize
    }

    /// Returns the character offset as an index. Only meaningful on a clipped
    /// position.
    pub(crate) fn char_index(self) -> usize {
        self.ch.max(0) as usize
    }

    /// Returns the position just past `text` if it were inserted here.
    pub fn advanced_over(self, text: &str) -> Position {
        let mut end = self;
        for (i, segment) in text.split('\n').enumerate() {
            let len = segment.chars().count() as isize;
            if i == 0 {
                end.ch += len;
            } else {
                end.line += 1;
                end.ch = len;
            }
        }
        end
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Compare by line first, then by character
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.ch.cmp(&other.ch),
            ord => ord,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.ch)
    }
}
