// Chunk: docs/chunks/marks - Named positions that follow edits

//! Mark tracking.
//!
//! A mark is a position stored under a caller-chosen id. Every insert and
//! delete, including those replayed by undo and redo, adjusts every stored
//! mark so it keeps pointing at the same text.

use std::collections::HashMap;

use crate::types::Position;

/// Identifier of a mark.
pub type MarkId = usize;

#[derive(Debug, Clone, Default)]
pub struct MarkTable {
    marks: HashMap<MarkId, Position>,
}

impl MarkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `pos` under each of `ids`, overwriting earlier values.
    ///
    /// `pos` must already be clipped.
    pub fn set(&mut self, pos: Position, ids: &[MarkId]) {
        for &id in ids {
            self.marks.insert(id, pos);
        }
    }

    /// Returns the mark stored under `id`, or [`Position::UNSET`].
    pub fn get(&self, id: MarkId) -> Position {
        self.marks.get(&id).copied().unwrap_or(Position::UNSET)
    }

    /// Adjusts every mark for text inserted at `start` that now ends at `end`.
    pub fn adjust_insert(&mut self, start: Position, end: Position) {
        let added_lines = end.line - start.line;
        for v in self.marks.values_mut() {
            if v.line == start.line && v.ch >= start.ch {
                if added_lines == 0 {
                    v.ch += end.ch - start.ch;
                } else {
                    v.ch = end.ch + (v.ch - start.ch);
                    v.line += added_lines;
                }
            } else if v.line > start.line {
                v.line += added_lines;
            }
        }
    }

    /// Adjusts every mark for the removal of `[begin, end)`.
    pub fn adjust_delete(&mut self, begin: Position, end: Position) {
        for v in self.marks.values_mut() {
            if *v < begin {
                continue;
            }
            if v.line < end.line || (v.line == end.line && v.ch <= end.ch) {
                *v = begin;
            } else if v.line == end.line {
                v.line = begin.line;
                v.ch += begin.ch - end.ch;
            } else {
                v.line -= end.line - begin.line;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(marks: &[(MarkId, Position)]) -> MarkTable {
        let mut table = MarkTable::new();
        for &(id, pos) in marks {
            table.set(pos, &[id]);
        }
        table
    }

    #[test]
    fn test_unset_mark_is_sentinel() {
        let table = MarkTable::new();
        assert_eq!(table.get(42), Position::UNSET);
    }

    #[test]
    fn test_set_overwrites_every_id() {
        let mut table = MarkTable::new();
        table.set(Position::new(1, 1), &[1, 2]);
        table.set(Position::new(3, 0), &[2]);
        assert_eq!(table.get(1), Position::new(1, 1));
        assert_eq!(table.get(2), Position::new(3, 0));
        assert_eq!(table.marks.len(), 2);
    }

    #[test]
    fn test_insert_before_mark_on_same_line() {
        let mut table = table(&[(0, Position::new(1, 4))]);
        table.adjust_insert(Position::new(1, 1), Position::new(1, 3));
        assert_eq!(table.get(0), Position::new(1, 6));
    }

    #[test]
    fn test_insert_at_mark_moves_it() {
        let mut table = table(&[(0, Position::new(1, 0))]);
        table.adjust_insert(Position::new(1, 0), Position::new(1, 5));
        assert_eq!(table.get(0), Position::new(1, 5));
    }

    #[test]
    fn test_insert_after_mark_leaves_it() {
        let mut table = table(&[(0, Position::new(1, 2))]);
        table.adjust_insert(Position::new(1, 3), Position::new(2, 1));
        assert_eq!(table.get(0), Position::new(1, 2));
    }

    #[test]
    fn test_multi_line_insert_keeps_offset() {
        let mut table = table(&[(0, Position::new(2, 5)), (1, Position::new(2, 3))]);
        table.adjust_insert(Position::new(2, 3), Position::new(4, 2));
        assert_eq!(table.get(0), Position::new(4, 4));
        assert_eq!(table.get(1), Position::new(4, 2));
    }

    #[test]
    fn test_insert_shifts_later_lines() {
        let mut table = table(&[(0, Position::new(3, 7))]);
        table.adjust_insert(Position::new(1, 0), Position::new(2, 0));
        assert_eq!(table.get(0), Position::new(4, 7));
    }

    #[test]
    fn test_delete_before_mark_unchanged() {
        let mut table = table(&[(0, Position::new(1, 1))]);
        table.adjust_delete(Position::new(1, 2), Position::new(2, 0));
        assert_eq!(table.get(0), Position::new(1, 1));
    }

    #[test]
    fn test_delete_containing_mark_collapses() {
        let mut table = table(&[(0, Position::new(2, 1)), (1, Position::new(3, 2))]);
        table.adjust_delete(Position::new(1, 3), Position::new(3, 2));
        assert_eq!(table.get(0), Position::new(1, 3));
        assert_eq!(table.get(1), Position::new(1, 3));
    }

    #[test]
    fn test_delete_shifts_tail_of_end_line() {
        let mut table = table(&[(0, Position::new(3, 5))]);
        table.adjust_delete(Position::new(1, 3), Position::new(3, 2));
        assert_eq!(table.get(0), Position::new(1, 6));
    }

    #[test]
    fn test_delete_shifts_later_lines_up() {
        let mut table = table(&[(0, Position::new(5, 1))]);
        table.adjust_delete(Position::new(1, 3), Position::new(3, 2));
        assert_eq!(table.get(0), Position::new(3, 1));
    }
}
