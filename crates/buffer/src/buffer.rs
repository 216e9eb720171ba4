// Chunk: docs/chunks/text_buffer - Locked buffer facade

//! The thread-safe [`Buffer`].
//!
//! All state lives behind one [`parking_lot::Mutex`]. Each public method
//! takes the lock once, works against the unlocked [`Document`] and
//! [`UndoManager`], and releases it on return. Nothing called while the lock
//! is held tries to take it again.

use gridpad_syntax::Syntax;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::config::BufferConfig;
use crate::display::DisplayLine;
use crate::document::Document;
use crate::marks::MarkId;
use crate::types::Position;
use crate::undo::{Operation, UndoManager};

struct Inner {
    doc: Document,
    history: UndoManager,
    /// Content hash at the last `reset_modified`.
    checksum: [u8; 32],
}

impl Inner {
    fn checksum(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.doc.lines.content().as_bytes());
        hasher.finalize().into()
    }

    fn place_marks(&mut self, landed: Option<Position>, ids: &[MarkId]) -> bool {
        match landed {
            Some(pos) => {
                self.doc.marks.set(pos, ids);
                true
            }
            None => false,
        }
    }
}

/// An editable text with wrapped display lines, marks and undo history.
///
/// Positions passed in are clipped, never rejected. Share a buffer between
/// threads with `Arc<Buffer>`.
///
/// # Example
///
/// ```
/// use gridpad_buffer::{Buffer, Position};
///
/// let buffer = Buffer::new();
/// let end = buffer.insert(Position::new(1, 0), "hello\nworld");
/// assert_eq!(end, Position::new(2, 5));
///
/// buffer.delete(Position::new(1, 5), Position::new(2, 0));
/// assert_eq!(buffer.text(), "helloworld");
///
/// assert!(buffer.undo(&[]));
/// assert_eq!(buffer.text(), "hello\nworld");
/// ```
pub struct Buffer {
    inner: Mutex<Inner>,
}

impl Buffer {
    /// Creates an empty buffer with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Creates an empty buffer laid out with `config`.
    pub fn with_config(config: BufferConfig) -> Self {
        let mut inner = Inner {
            doc: Document::new(config),
            history: UndoManager::new(),
            checksum: [0; 32],
        };
        inner.checksum = inner.checksum();
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Creates a buffer holding `text`, with empty history and not modified.
    pub fn from_text(text: &str) -> Self {
        let buffer = Self::new();
        {
            let mut inner = buffer.inner.lock();
            inner.doc.insert(Position::new(1, 0), text);
            inner.checksum = inner.checksum();
        }
        buffer
    }

    /// Inserts `text` at `pos` (clipped) and returns the position just past
    /// it. Empty text changes nothing and is not recorded.
    pub fn insert(&self, pos: Position, text: &str) -> Position {
        let mut inner = self.inner.lock();
        let (start, end) = inner.doc.insert(pos, text);
        if start != end {
            inner.history.record(Operation::insert(start, text));
        }
        end
    }

    /// Removes `[begin, end)` (clipped) and returns the removed text. An
    /// empty or inverted range changes nothing.
    pub fn delete(&self, begin: Position, end: Position) -> String {
        let mut inner = self.inner.lock();
        match inner.doc.delete(begin, end) {
            Some((begin, _, removed)) => {
                inner.history.record(Operation::delete(begin, removed.as_str()));
                removed
            }
            None => String::new(),
        }
    }

    /// Returns the text in `[begin, end)` (clipped).
    pub fn get(&self, begin: Position, end: Position) -> String {
        self.inner.lock().doc.get(begin, end)
    }

    /// Returns the position after the last character.
    pub fn end(&self) -> Position {
        self.inner.lock().doc.lines.end()
    }

    /// Returns the whole content, lines joined with `'\n'`.
    pub fn text(&self) -> String {
        self.inner.lock().doc.lines.content()
    }

    pub fn line_count(&self) -> usize {
        self.inner.lock().doc.lines.len()
    }

    /// Returns `pos` clamped into the buffer.
    pub fn clip(&self, pos: Position) -> Position {
        self.inner.lock().doc.clip(pos)
    }

    pub fn config(&self) -> BufferConfig {
        self.inner.lock().doc.config
    }

    /// Replaces the whole layout configuration.
    pub fn set_config(&self, config: BufferConfig) {
        self.inner.lock().doc.set_config(config);
    }

    /// Sets the visible area. `cols` is raised to at least 1.
    pub fn set_size(&self, cols: usize, rows: usize) {
        let mut inner = self.inner.lock();
        let config = BufferConfig {
            cols,
            rows,
            ..inner.doc.config
        };
        inner.doc.set_config(config);
    }

    /// Sets the tab width. Raised to at least 1.
    pub fn set_tab_width(&self, tab_width: usize) {
        let mut inner = self.inner.lock();
        let config = BufferConfig {
            tab_width,
            ..inner.doc.config
        };
        inner.doc.set_config(config);
    }

    /// Replaces the syntax rules and retags every line.
    pub fn set_syntax(&self, syntax: Syntax) {
        self.inner.lock().doc.set_syntax(syntax);
    }

    /// Returns exactly `rows` display lines from the scroll offset, padded
    /// with empty lines past the end of the content.
    pub fn display_lines(&self) -> Vec<DisplayLine> {
        self.inner.lock().doc.visible_lines()
    }

    /// Returns the total number of display lines.
    pub fn display_line_count(&self) -> usize {
        self.inner.lock().doc.display.len()
    }

    /// Scrolls by `delta` display lines, clamped to the content.
    pub fn scroll(&self, delta: isize) {
        self.inner.lock().doc.scroll_by(delta);
    }

    /// Returns the index of the first visible display line.
    pub fn scroll_offset(&self) -> usize {
        self.inner.lock().doc.scroll
    }

    /// Returns how far the view is scrolled, from `0.0` to `1.0`, or `-1.0`
    /// when the whole content fits.
    pub fn scroll_fraction(&self) -> f64 {
        self.inner.lock().doc.scroll_fraction()
    }

    /// Stores `pos` (clipped) under each of `ids`.
    pub fn set_mark(&self, pos: Position, ids: &[MarkId]) {
        let mut inner = self.inner.lock();
        let pos = inner.doc.clip(pos);
        inner.doc.marks.set(pos, ids);
    }

    /// Returns the mark stored under `id`, or [`Position::UNSET`] if it was
    /// never set.
    pub fn mark(&self, id: MarkId) -> Position {
        self.inner.lock().doc.marks.get(id)
    }

    /// Reverts the most recent group of edits and moves `ids` to where the
    /// last reverted edit lands. Returns false when there is nothing to undo.
    pub fn undo(&self, ids: &[MarkId]) -> bool {
        let mut inner = self.inner.lock();
        let Inner { doc, history, .. } = &mut *inner;
        let landed = history.undo(doc);
        trace!(?landed, "undo");
        inner.place_marks(landed, ids)
    }

    /// Re-applies the most recently undone group and moves `ids` to where the
    /// last re-applied edit lands. Returns false when there is nothing to redo.
    pub fn redo(&self, ids: &[MarkId]) -> bool {
        let mut inner = self.inner.lock();
        let Inner { doc, history, .. } = &mut *inner;
        let landed = history.redo(doc);
        trace!(?landed, "redo");
        inner.place_marks(landed, ids)
    }

    /// Ends the current undo group.
    pub fn separate(&self) {
        self.inner.lock().history.separate();
    }

    /// Drops all undo and redo history.
    pub fn reset_undo(&self) {
        self.inner.lock().history.reset();
        debug!("undo history reset");
    }

    pub fn can_undo(&self) -> bool {
        self.inner.lock().history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.inner.lock().history.can_redo()
    }

    /// Returns true if the content differs from the last baseline.
    ///
    /// Hashes the whole content on every call.
    pub fn modified(&self) -> bool {
        let inner = self.inner.lock();
        inner.checksum() != inner.checksum
    }

    /// Makes the current content the unmodified baseline.
    pub fn reset_modified(&self) {
        let mut inner = self.inner.lock();
        inner.checksum = inner.checksum();
    }

    /// Moves `pos` by `count` characters, counting line breaks as one.
    pub fn shift_index(&self, pos: Position, count: isize) -> Position {
        self.inner.lock().doc.shift_index(pos, count)
    }

    /// Returns the screen cell `(col, row)` of `pos`, relative to the scroll
    /// offset.
    pub fn coords_from_index(&self, pos: Position) -> (isize, isize) {
        self.inner.lock().doc.coords_from_index(pos)
    }

    /// Returns the position under screen cell `(col, row)`.
    pub fn index_from_coords(&self, col: isize, row: isize) -> Position {
        self.inner.lock().doc.index_from_coords(col, row)
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Buffer")
            .field("lines", &inner.doc.lines.len())
            .field("display_lines", &inner.doc.display.len())
            .field("config", &inner.doc.config)
            .finish()
    }
}
