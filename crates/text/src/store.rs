//! Line store backed by a rope.
//!
//! The rope is built without CR or Unicode line breaks, so `\n` is the only
//! separator and rope lines map one-to-one onto buffer rows.

use ropey::Rope;

use crate::Position;

/// Ordered lines of text. Always holds at least one (possibly empty) line.
#[derive(Debug, Clone)]
pub(crate) struct LineStore {
    rope: Rope,
}

impl Default for LineStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LineStore {
    pub(crate) fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Number of rows
    pub(crate) fn num_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Length of a row in characters, newline excluded
    pub(crate) fn line_len(&self, row: usize) -> usize {
        let line = self.rope.line(row - 1);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Position just past the last character
    pub(crate) fn end(&self) -> Position {
        let last = self.num_lines();
        Position::new(last, self.line_len(last))
    }

    fn char_idx(&self, pos: Position) -> usize {
        self.rope.line_to_char(pos.row - 1) + pos.column
    }

    /// Text between two positions; empty when `end` is not after `start`
    pub(crate) fn slice(&self, start: Position, end: Position) -> String {
        if end <= start {
            return String::new();
        }
        self.rope
            .slice(self.char_idx(start)..self.char_idx(end))
            .to_string()
    }

    pub(crate) fn insert(&mut self, at: Position, text: &str) {
        let idx = self.char_idx(at);
        self.rope.insert(idx, text);
    }

    /// Remove the text between two positions and return it
    pub(crate) fn remove(&mut self, start: Position, end: Position) -> String {
        let removed = self.slice(start, end);
        if !removed.is_empty() {
            let range = self.char_idx(start)..self.char_idx(end);
            self.rope.remove(range);
        }
        removed
    }
}
