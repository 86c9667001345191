use crate::Position;

/// Entry of the undo or redo stack.
///
/// Indices are kept in their `row.column` string form and resolved again
/// when the entry is replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    /// `text` was inserted at `start` and now ends at `end`
    Insert {
        start: String,
        end: String,
        text: String,
    },
    /// `text` was removed from `start..end`
    Delete {
        start: String,
        end: String,
        text: String,
    },
    /// Boundary between two undo groups
    Separator,
}

impl Action {
    pub(crate) fn is_separator(&self) -> bool {
        matches!(self, Action::Separator)
    }
}

/// Undo and redo stacks. The last element of each vector is the top.
#[derive(Debug, Clone, Default)]
pub(crate) struct History {
    undo_stack: Vec<Action>,
    redo_stack: Vec<Action>,
}

impl History {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record an insertion of `text` spanning `start..end`.
    ///
    /// Typing that continues the previous insertion, or that lands at the
    /// same start, extends the top entry instead of pushing a new one.
    pub(crate) fn record_insert(&mut self, start: Position, end: Position, text: &str) {
        self.redo_stack.clear();

        let sp = start.to_string();
        if let Some(Action::Insert {
            start: top_start,
            end: top_end,
            text: top_text,
        }) = self.undo_stack.last_mut()
        {
            if *top_end == sp {
                top_text.push_str(text);
                *top_end = end.to_string();
                return;
            }
            if *top_start == sp {
                top_text.insert_str(0, text);
                *top_end = start.advanced_over(top_text).to_string();
                return;
            }
        }

        self.undo_stack.push(Action::Insert {
            start: sp,
            end: end.to_string(),
            text: text.to_string(),
        });
    }

    /// Record removal of `text` from `start..end`.
    ///
    /// Repeated forward deletes (same start) and repeated backspaces (this
    /// range ends where the previous one started) extend the top entry.
    pub(crate) fn record_delete(&mut self, start: Position, end: Position, text: &str) {
        self.redo_stack.clear();

        let sp = start.to_string();
        let ep = end.to_string();
        if let Some(Action::Delete {
            start: top_start,
            end: top_end,
            text: top_text,
        }) = self.undo_stack.last_mut()
        {
            if *top_start == sp {
                top_text.push_str(text);
                *top_end = start.advanced_over(top_text).to_string();
                return;
            }
            if *top_start == ep {
                top_text.insert_str(0, text);
                *top_start = sp;
                *top_end = start.advanced_over(top_text).to_string();
                return;
            }
        }

        self.undo_stack.push(Action::Delete {
            start: sp,
            end: ep,
            text: text.to_string(),
        });
    }

    /// Close the current undo group. Does nothing on an empty stack or when
    /// the group is already closed.
    pub(crate) fn separator(&mut self) {
        match self.undo_stack.last() {
            None | Some(Action::Separator) => {}
            Some(_) => self.undo_stack.push(Action::Separator),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub(crate) fn pop_undo(&mut self) -> Option<Action> {
        self.undo_stack.pop()
    }

    pub(crate) fn push_undo(&mut self, action: Action) {
        self.undo_stack.push(action);
    }

    pub(crate) fn pop_redo(&mut self) -> Option<Action> {
        self.redo_stack.pop()
    }

    pub(crate) fn push_redo(&mut self, action: Action) {
        self.redo_stack.push(action);
    }

    pub(crate) fn can_undo(&self) -> bool {
        self.undo_stack.iter().any(|a| !a.is_separator())
    }

    pub(crate) fn can_redo(&self) -> bool {
        self.redo_stack.iter().any(|a| !a.is_separator())
    }

    #[cfg(test)]
    fn undo_top(&self) -> Option<&Action> {
        self.undo_stack.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(start: &str, end: &str, text: &str) -> Action {
        Action::Insert {
            start: start.to_string(),
            end: end.to_string(),
            text: text.to_string(),
        }
    }

    fn delete(start: &str, end: &str, text: &str) -> Action {
        Action::Delete {
            start: start.to_string(),
            end: end.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_merge_typing() {
        let mut history = History::new();
        history.record_insert(Position::new(1, 0), Position::new(1, 1), "h");
        history.record_insert(Position::new(1, 1), Position::new(1, 2), "e");
        history.record_insert(Position::new(1, 2), Position::new(2, 0), "\n");

        assert_eq!(history.undo_stack.len(), 1);
        assert_eq!(history.undo_top(), Some(&insert("1.0", "2.0", "he\n")));
    }

    #[test]
    fn test_merge_insert_at_same_start() {
        let mut history = History::new();
        history.record_insert(Position::new(1, 0), Position::new(1, 5), "there");
        history.record_insert(Position::new(1, 0), Position::new(1, 6), "hello ");

        assert_eq!(history.undo_top(), Some(&insert("1.0", "1.11", "hello there")));
    }

    #[test]
    fn test_separated_inserts_do_not_merge() {
        let mut history = History::new();
        history.record_insert(Position::new(1, 0), Position::new(1, 1), "a");
        history.separator();
        history.record_insert(Position::new(1, 1), Position::new(1, 2), "b");

        assert_eq!(history.undo_stack.len(), 3);
    }

    #[test]
    fn test_merge_forward_deletes() {
        let mut history = History::new();
        history.record_delete(Position::new(1, 2), Position::new(1, 3), "c");
        history.record_delete(Position::new(1, 2), Position::new(2, 0), "\n");

        assert_eq!(history.undo_top(), Some(&delete("1.2", "2.0", "c\n")));
    }

    #[test]
    fn test_merge_backspaces() {
        let mut history = History::new();
        history.record_delete(Position::new(2, 0), Position::new(2, 1), "x");
        history.record_delete(Position::new(1, 3), Position::new(2, 0), "\n");
        history.record_delete(Position::new(1, 2), Position::new(1, 3), "l");

        assert_eq!(history.undo_top(), Some(&delete("1.2", "2.1", "l\nx")));
    }

    #[test]
    fn test_insert_and_delete_do_not_merge() {
        let mut history = History::new();
        history.record_insert(Position::new(1, 0), Position::new(1, 3), "abc");
        history.record_delete(Position::new(1, 0), Position::new(1, 3), "abc");

        assert_eq!(history.undo_stack.len(), 2);
    }

    #[test]
    fn test_separator_is_idempotent() {
        let mut history = History::new();
        history.separator();
        assert!(history.undo_top().is_none());

        history.record_insert(Position::new(1, 0), Position::new(1, 1), "a");
        history.separator();
        history.separator();
        assert_eq!(history.undo_stack.len(), 2);
        assert!(history.can_undo());
    }

    #[test]
    fn test_recording_clears_redo() {
        let mut history = History::new();
        history.push_redo(insert("1.0", "1.1", "a"));
        assert!(history.can_redo());

        history.record_delete(Position::new(1, 0), Position::new(1, 1), "b");
        assert!(!history.can_redo());
    }
}
