// Chunk: docs/chunks/line_wrap_rendering - Wrapped, tagged display lines and reflow

//! Display lines and incremental reflow.
//!
//! Every logical line owns a contiguous run of one or more [`DisplayLine`]s in
//! the [`DisplayCache`]. A run is built by expanding tabs, splitting the
//! expanded text with the syntax rules, then greedily packing fragments into
//! rows of `cols` columns:
//!
//! ```text
//! "package main" at 8 cols, rule tags words containing 'i':
//!   row 0: ["package "]          fragment fits exactly
//!   row 1: ["main"] (continuation)
//! "func main() {":
//!   row 2: ["func ", "mai"]      "main" overflows, prefix fills the row
//!   row 3: ["n", "() {"] (cont.) remainder keeps its tag
//! ```
//!
//! Reflow replaces exactly the runs of the requested lines and shifts the
//! anchors of the lines after them. Nothing else in the cache is touched.

use std::ops::Range;

use gridpad_syntax::{Fragment, Syntax};

use crate::line_store::LineStore;
use crate::tabs;

/// One row of wrapped, tagged text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayLine {
    pub fragments: Vec<Fragment>,
    /// True when this row wraps from the previous row of the same logical
    /// line.
    pub continuation: bool,
}

impl DisplayLine {
    fn continued() -> Self {
        Self {
            fragments: Vec::new(),
            continuation: true,
        }
    }

    /// Returns the row's expanded text.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    /// Returns the row's width in columns.
    pub fn width(&self) -> usize {
        self.fragments.iter().map(Fragment::char_count).sum()
    }
}

/// Global layout settings a reflow needs.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub cols: usize,
    pub tab_width: usize,
    pub syntax: &'a Syntax,
}

/// Builds the display run for one line of raw text.
///
/// The result always holds at least one display line; an empty line yields a
/// single row with one empty, untagged fragment.
pub fn layout_line(text: &[char], layout: &Layout<'_>) -> Vec<DisplayLine> {
    let cols = layout.cols.max(1);
    let expanded = tabs::expand(text.iter().copied(), layout.tab_width);

    let mut run = Vec::new();
    let mut current = DisplayLine::default();
    let mut col = 0;

    for fragment in layout.syntax.split(&expanded) {
        let mut rest = fragment.text.as_str();
        loop {
            let len = rest.chars().count();
            if col + len <= cols {
                current.fragments.push(Fragment::new(rest, fragment.tag));
                col += len;
                break;
            }

            let room = cols - col;
            if room > 0 {
                let split = rest
                    .char_indices()
                    .nth(room)
                    .map_or(rest.len(), |(byte, _)| byte);
                current.fragments.push(Fragment::new(&rest[..split], fragment.tag));
                rest = &rest[split..];
            }
            run.push(std::mem::replace(&mut current, DisplayLine::continued()));
            col = 0;
        }
    }

    if current.fragments.is_empty() {
        current.fragments.push(Fragment::default());
    }
    run.push(current);
    run
}

/// The display lines of a whole buffer, in order.
#[derive(Debug, Clone, Default)]
pub struct DisplayCache {
    lines: Vec<DisplayLine>,
}

impl DisplayCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of display lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns the display line at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&DisplayLine> {
        self.lines.get(index)
    }

    /// Returns the display lines belonging to the 0-based logical line `index`.
    #[cfg(test)]
    fn run(&self, lines: &LineStore, index: usize) -> &[DisplayLine] {
        let start = lines.line(index).anchor();
        let end = lines.get(index + 1).map_or(self.lines.len(), |l| l.anchor());
        &self.lines[start..end]
    }

    /// Recomputes the display runs of the 0-based logical lines in `range`.
    ///
    /// The anchor of `range.start` and of the first line after the range must
    /// be current; anchors inside the range are reassigned. Lines removed
    /// since the last reflow have their runs absorbed into the run of the
    /// line before them, and freshly inserted lines start with empty runs.
    pub fn reflow(&mut self, lines: &mut LineStore, range: Range<usize>, layout: &Layout<'_>) {
        if range.is_empty() {
            return;
        }
        let start = lines.line(range.start).anchor();
        let old_end = lines.get(range.end).map_or(self.lines.len(), |l| l.anchor());

        let mut rebuilt = Vec::new();
        for index in range.clone() {
            lines.set_anchor(index, start + rebuilt.len());
            rebuilt.extend(layout_line(lines.line(index).text(), layout));
        }

        let delta = rebuilt.len() as isize - (old_end - start) as isize;
        self.lines.splice(start..old_end, rebuilt);
        lines.shift_anchors(range.end, delta);
    }
}
