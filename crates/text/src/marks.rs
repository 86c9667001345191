//! Named positions that follow the text through edits.

use std::collections::HashMap;

use crate::{Position, Result, TextError};

#[derive(Debug, Clone, Default)]
pub(crate) struct Marks {
    positions: HashMap<String, Position>,
}

impl Marks {
    pub(crate) fn get(&self, name: &str) -> Option<Position> {
        self.positions.get(name).copied()
    }

    /// Mark names must be non-empty and free of whitespace
    pub(crate) fn check_name(name: &str) -> Result<()> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(TextError::InvalidMarkName(name.to_string()));
        }
        Ok(())
    }

    pub(crate) fn set(&mut self, name: &str, pos: Position) -> Result<()> {
        Self::check_name(name)?;
        self.positions.insert(name.to_string(), pos);
        Ok(())
    }

    pub(crate) fn unset(&mut self, name: &str) -> bool {
        self.positions.remove(name).is_some()
    }

    /// Mark names in sorted order
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.positions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Shift marks after `text` was inserted at `start`, ending at `end`.
    ///
    /// A mark exactly at `start` moves along with the inserted text.
    pub(crate) fn adjust_for_insert(&mut self, start: Position, end: Position) {
        for pos in self.positions.values_mut() {
            if *pos < start {
                continue;
            }
            if pos.row == start.row {
                *pos = Position::new(end.row, end.column + (pos.column - start.column));
            } else {
                pos.row += end.row - start.row;
            }
        }
    }

    /// Shift marks after the range `[start, end)` was removed.
    pub(crate) fn adjust_for_delete(&mut self, start: Position, end: Position) {
        for pos in self.positions.values_mut() {
            if *pos <= start {
                continue;
            }
            if *pos < end {
                *pos = start;
            } else if pos.row == end.row {
                *pos = Position::new(start.row, start.column + (pos.column - end.column));
            } else {
                pos.row -= end.row - start.row;
            }
        }
    }
}
