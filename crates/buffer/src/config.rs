// Chunk: docs/chunks/buffer_config - Display size and tab width settings

use serde::{Deserialize, Serialize};

/// Layout configuration for a [`Buffer`](crate::Buffer).
///
/// Missing fields take their defaults when deserialized, so a front end can
/// load a partial settings document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Visible columns; display lines wrap at this width.
    pub cols: usize,
    /// Visible rows returned by `display_lines`.
    pub rows: usize,
    /// Columns between tab stops.
    pub tab_width: usize,
}

impl BufferConfig {
    pub const DEFAULT_COLS: usize = 80;
    pub const DEFAULT_ROWS: usize = 24;
    pub const DEFAULT_TAB_WIDTH: usize = 8;

    /// Returns a copy with `cols` and `tab_width` raised to at least 1.
    pub fn clamped(self) -> Self {
        Self {
            cols: self.cols.max(1),
            rows: self.rows,
            tab_width: self.tab_width.max(1),
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            cols: Self::DEFAULT_COLS,
            rows: Self::DEFAULT_ROWS,
            tab_width: Self::DEFAULT_TAB_WIDTH,
        }
    }
}
