// Chunk: docs/chunks/undo_history - Grouped, merging undo and redo stacks

//! Undo and redo history.
//!
//! The [`UndoManager`] keeps two stacks of [`Entry`] values. Edits made by the
//! user are recorded as [`Operation`]s on the undo stack; a recorded edit
//! that continues the one below it (typing a word, holding backspace) is
//! merged into it instead of pushed. [`Entry::Separator`] splits the history
//! into groups that undo and redo as one unit.
//!
//! Replaying goes through the [`EditTarget`] seam, so the manager never owns
//! or locks the text it edits.

use crate::types::Position;

/// The text primitives undo and redo replay against.
///
/// Implementations must apply the same mark adjustments and reflow as a
/// user edit, and must not record anything in the history.
pub trait EditTarget {
    /// Inserts `text` at `at` and returns the position just past it.
    fn insert(&mut self, at: Position, text: &str) -> Position;

    /// Removes `[start, end)` and returns the removed text.
    fn delete(&mut self, start: Position, end: Position) -> String;
}

/// A recorded edit.
///
/// For both kinds `end` is `start` advanced over `text`: an insert occupies
/// `[start, end)` after it is applied, a delete occupied it before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Insert {
        start: Position,
        end: Position,
        text: String,
    },
    Delete {
        start: Position,
        end: Position,
        text: String,
    },
}

impl Operation {
    pub fn insert(start: Position, text: impl Into<String>) -> Self {
        let text = text.into();
        Operation::Insert {
            start,
            end: start.advanced_over(&text),
            text,
        }
    }

    pub fn delete(start: Position, text: impl Into<String>) -> Self {
        let text = text.into();
        Operation::Delete {
            start,
            end: start.advanced_over(&text),
            text,
        }
    }

    /// Folds `next` into `self` when both are the same kind and touch.
    ///
    /// Returns `next` back unchanged when they cannot be merged.
    fn merge(&mut self, next: Operation) -> Result<(), Operation> {
        let merged = match (&mut *self, &next) {
            (
                Operation::Insert { start, end, text },
                Operation::Insert {
                    start: new_start,
                    end: new_end,
                    text: new_text,
                },
            ) => {
                if *end == *new_start {
                    text.push_str(new_text);
                    *end = *new_end;
                    true
                } else if *start == *new_start {
                    // The existing text now starts where the new one ends.
                    *end = new_end.advanced_over(text);
                    text.insert_str(0, new_text);
                    true
                } else {
                    false
                }
            }
            (
                Operation::Delete { start, end, text },
                Operation::Delete {
                    start: new_start,
                    end: new_end,
                    text: new_text,
                },
            ) => {
                if *new_end == *start {
                    *start = *new_start;
                    text.insert_str(0, new_text);
                    true
                } else if *new_start == *start {
                    *end = end.advanced_over(new_text);
                    text.push_str(new_text);
                    true
                } else {
                    false
                }
            }
            _ => false,
        };
        if merged {
            Ok(())
        } else {
            Err(next)
        }
    }

    /// Applies the inverse of this operation. Returns where the text ends up:
    /// the start of a removed insert, or the end of a restored delete.
    fn revert<T: EditTarget + ?Sized>(&self, target: &mut T) -> Position {
        match self {
            Operation::Insert { start, end, .. } => {
                target.delete(*start, *end);
                *start
            }
            Operation::Delete { start, text, .. } => target.insert(*start, text),
        }
    }

    /// Applies this operation as recorded. Returns the end of a re-inserted
    /// text, or the start of a re-deleted one.
    fn apply<T: EditTarget + ?Sized>(&self, target: &mut T) -> Position {
        match self {
            Operation::Insert { start, text, .. } => target.insert(*start, text),
            Operation::Delete { start, end, .. } => {
                target.delete(*start, *end);
                *start
            }
        }
    }
}

/// An entry on either history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Op(Operation),
    Separator,
}

#[derive(Debug, Clone, Default)]
pub struct UndoManager {
    undo: Vec<Entry>,
    redo: Vec<Entry>,
}

impl UndoManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a user edit, merging it into the previous one when they touch.
    ///
    /// Clears the redo stack.
    pub fn record(&mut self, op: Operation) {
        self.redo.clear();
        let op = match self.undo.last_mut() {
            Some(Entry::Op(top)) => match top.merge(op) {
                Ok(()) => return,
                Err(op) => op,
            },
            _ => op,
        };
        self.undo.push(Entry::Op(op));
    }

    /// Closes the current group. Does nothing when the history is empty or
    /// already ends with a separator.
    pub fn separate(&mut self) {
        if matches!(self.undo.last(), Some(Entry::Op(_))) {
            self.undo.push(Entry::Separator);
        }
    }

    /// Reverts the most recent group. Returns the position of the last
    /// operation reverted, or `None` when nothing was undone.
    pub fn undo<T: EditTarget + ?Sized>(&mut self, target: &mut T) -> Option<Position> {
        replay(&mut self.undo, &mut self.redo, |op| op.revert(&mut *target))
    }

    /// Re-applies the most recently undone group. Returns the position of the
    /// last operation re-applied, or `None` when nothing was redone.
    pub fn redo<T: EditTarget + ?Sized>(&mut self, target: &mut T) -> Option<Position> {
        replay(&mut self.redo, &mut self.undo, |op| op.apply(&mut *target))
    }

    /// Drops all history.
    pub fn reset(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Returns true if the undo stack holds at least one operation.
    pub fn can_undo(&self) -> bool {
        has_operation(&self.undo)
    }

    /// Returns true if the redo stack holds at least one operation.
    pub fn can_redo(&self) -> bool {
        has_operation(&self.redo)
    }
}

/// Moves one group from `from` to `to`, running `step` on each operation.
///
/// Separators seen before the first operation are carried over; the first
/// separator after an operation is carried over and ends the group.
fn replay(
    from: &mut Vec<Entry>,
    to: &mut Vec<Entry>,
    mut step: impl FnMut(&Operation) -> Position,
) -> Option<Position> {
    let mut landed = None;
    while let Some(entry) = from.pop() {
        match entry {
            Entry::Separator => {
                to.push(Entry::Separator);
                if landed.is_some() {
                    break;
                }
            }
            Entry::Op(op) => {
                landed = Some(step(&op));
                to.push(Entry::Op(op));
            }
        }
    }
    landed
}

fn has_operation(stack: &[Entry]) -> bool {
    stack.iter().any(|entry| matches!(entry, Entry::Op(_)))
}
