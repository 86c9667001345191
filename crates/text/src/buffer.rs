use std::cmp::Ordering;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::history::{Action, History};
use crate::index;
use crate::marks::Marks;
use crate::store::LineStore;
use crate::{Position, Result};

/// Shared, thread-safe text buffer.
///
/// Content, marks and history sit behind one lock, so a mutation and the
/// history entry describing it become visible to other callers together.
#[derive(Debug, Default)]
pub struct Buffer {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    lines: LineStore,
    marks: Marks,
    history: History,
}

impl Buffer {
    /// Create an empty buffer: one empty line, no marks, no history
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                lines: LineStore::new(),
                marks: Marks::default(),
                history: History::new(),
            }),
        }
    }

    /// Create a buffer holding `text`, with an empty history
    pub fn with_text(text: &str) -> Self {
        let buffer = Self::new();
        buffer.write().insert(Position::start(), text, false);
        buffer
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve an index expression to a position
    pub fn index(&self, expr: &str) -> Result<Position> {
        self.read().resolve(expr)
    }

    /// Order two index expressions by the positions they resolve to
    pub fn compare(&self, a: &str, b: &str) -> Result<Ordering> {
        let state = self.read();
        Ok(state.resolve(a)?.cmp(&state.resolve(b)?))
    }

    /// Text between two indices. A reversed range gives an empty string.
    pub fn get(&self, start: &str, end: &str) -> Result<String> {
        let state = self.read();
        let (start, end) = (state.resolve(start)?, state.resolve(end)?);
        Ok(state.lines.slice(start, end))
    }

    /// Number of lines; an empty buffer has one
    pub fn num_lines(&self) -> usize {
        self.read().lines.num_lines()
    }

    /// Insert `text` at `index`, recording it for undo
    pub fn insert(&self, index: &str, text: &str) -> Result<()> {
        let mut state = self.write();
        let at = state.resolve(index)?;
        state.insert(at, text, true);
        Ok(())
    }

    /// Insert without touching the undo or redo stacks
    pub fn insert_no_undo(&self, index: &str, text: &str) -> Result<()> {
        let mut state = self.write();
        let at = state.resolve(index)?;
        state.insert(at, text, false);
        Ok(())
    }

    /// Delete the text between two indices, recording it for undo.
    ///
    /// Returns the removed text. Equal or reversed indices remove nothing.
    pub fn delete(&self, start: &str, end: &str) -> Result<String> {
        let mut state = self.write();
        let (start, end) = (state.resolve(start)?, state.resolve(end)?);
        Ok(state.delete(start, end, true))
    }

    /// Delete without touching the undo or redo stacks
    pub fn delete_no_undo(&self, start: &str, end: &str) -> Result<String> {
        let mut state = self.write();
        let (start, end) = (state.resolve(start)?, state.resolve(end)?);
        Ok(state.delete(start, end, false))
    }

    /// Delete `start..end`, then insert `text` at `start`.
    ///
    /// This leaves two undo entries, not one.
    pub fn replace(&self, start: &str, end: &str, text: &str) -> Result<()> {
        let mut state = self.write();
        let (from, to) = (state.resolve(start)?, state.resolve(end)?);
        state.delete(from, to, true);
        let at = state.resolve(start)?;
        state.insert(at, text, true);
        Ok(())
    }

    /// Set mark `name` to the position of `index`
    pub fn mark_set(&self, name: &str, index: &str) -> Result<()> {
        let mut state = self.write();
        let pos = state.resolve(index)?;
        state.marks.set(name, pos)
    }

    /// Remove a mark. Returns whether it existed.
    pub fn mark_unset(&self, name: &str) -> bool {
        self.write().marks.unset(name)
    }

    /// Names of all set marks, sorted
    pub fn mark_names(&self) -> Vec<String> {
        self.read().marks.names()
    }

    /// Undo the most recent group of edits.
    ///
    /// `marks` are moved to where the undone edit took place. Returns
    /// `false` when there was nothing to undo.
    pub fn undo(&self, marks: &[&str]) -> Result<bool> {
        self.write().undo(marks)
    }

    /// Redo the most recently undone group of edits.
    ///
    /// `marks` are moved to the end of a redone insertion, or to the start of
    /// a redone deletion. Returns `false` when there was nothing to redo.
    pub fn redo(&self, marks: &[&str]) -> Result<bool> {
        self.write().redo(marks)
    }

    /// Close the current undo group
    pub fn separator(&self) {
        self.write().history.separator();
    }

    /// Forget all undo and redo history
    pub fn edit_reset(&self) {
        self.write().history.clear();
    }

    pub fn can_undo(&self) -> bool {
        self.read().history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.read().history.can_redo()
    }
}

impl State {
    fn resolve(&self, expr: &str) -> Result<Position> {
        index::resolve(&self.lines, &self.marks, expr)
    }

    fn insert(&mut self, at: Position, text: &str, record: bool) {
        if text.is_empty() {
            return;
        }
        self.lines.insert(at, text);
        let end = at.advanced_over(text);
        self.marks.adjust_for_insert(at, end);
        if record {
            self.history.record_insert(at, end, text);
        }
    }

    fn delete(&mut self, start: Position, end: Position, record: bool) -> String {
        if end <= start {
            return String::new();
        }
        let removed = self.lines.remove(start, end);
        self.marks.adjust_for_delete(start, end);
        if record {
            self.history.record_delete(start, end, &removed);
        }
        removed
    }

    fn relocate(&mut self, marks: &[&str], pos: Position) -> Result<()> {
        for name in marks {
            self.marks.set(name, pos)?;
        }
        Ok(())
    }

    fn undo(&mut self, marks: &[&str]) -> Result<bool> {
        marks.iter().try_for_each(|name| Marks::check_name(name))?;
        let mut undone = 0;
        while let Some(action) = self.history.pop_undo() {
            if action.is_separator() {
                if undone > 0 {
                    self.history.push_undo(action);
                    break;
                }
                self.history.push_redo(action);
                continue;
            }

            let target = match &action {
                Action::Insert { start, end, .. } => {
                    let (from, to) = (self.resolve(start)?, self.resolve(end)?);
                    self.delete(from, to, false);
                    from
                }
                Action::Delete { start, text, .. } => {
                    let at = self.resolve(start)?;
                    self.insert(at, text, false);
                    at
                }
                Action::Separator => continue,
            };
            self.relocate(marks, target)?;
            self.history.push_redo(action);
            undone += 1;
        }
        Ok(undone > 0)
    }

    fn redo(&mut self, marks: &[&str]) -> Result<bool> {
        marks.iter().try_for_each(|name| Marks::check_name(name))?;
        let mut redone = 0;
        while let Some(action) = self.history.pop_redo() {
            if action.is_separator() {
                if redone > 0 {
                    self.history.push_redo(action);
                    break;
                }
                self.history.push_undo(action);
                continue;
            }

            let target = match &action {
                Action::Insert { start, end, text } => {
                    let at = self.resolve(start)?;
                    self.insert(at, text, false);
                    self.resolve(end)?
                }
                Action::Delete { start, end, .. } => {
                    let (from, to) = (self.resolve(start)?, self.resolve(end)?);
                    self.delete(from, to, false);
                    from
                }
                Action::Separator => continue,
            };
            self.relocate(marks, target)?;
            self.history.push_undo(action);
            redone += 1;
        }
        Ok(redone > 0)
    }
}
