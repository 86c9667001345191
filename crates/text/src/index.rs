//! Index expression resolution.
//!
//! An expression is a base followed by any number of signed character
//! offsets, separated by whitespace: `"end"`, `"c"`, `"3.end"`, `"2.4 +1 -3"`.
//! Offsets count the newline between two rows as one character.

use crate::marks::Marks;
use crate::store::LineStore;
use crate::{Position, Result, TextError};

/// Resolve `expr` to a position within `store`.
pub(crate) fn resolve(store: &LineStore, marks: &Marks, expr: &str) -> Result<Position> {
    let mut words = expr.split_whitespace();
    let base = words
        .next()
        .ok_or_else(|| TextError::InvalidIndex(expr.to_string()))?;

    let mut pos = resolve_base(store, marks, base, expr)?;
    for word in words {
        let offset: i64 = word
            .parse()
            .map_err(|_| TextError::InvalidIndex(expr.to_string()))?;
        pos = apply_offset(store, pos, offset);
    }
    Ok(pos)
}

fn resolve_base(store: &LineStore, marks: &Marks, word: &str, expr: &str) -> Result<Position> {
    if word == "end" {
        return Ok(store.end());
    }
    if let Some(pos) = marks.get(word) {
        return Ok(pos);
    }
    match word.split_once('.') {
        Some((row, column)) => parse_row_column(store, row, column)
            .ok_or_else(|| TextError::InvalidIndex(expr.to_string())),
        None => Err(TextError::UnknownMark(word.to_string())),
    }
}

enum Column {
    End,
    At(usize),
}

/// Parse and clamp `row.column`. Returns `None` when either part is malformed.
fn parse_row_column(store: &LineStore, row: &str, column: &str) -> Option<Position> {
    let row: i64 = row.parse().ok()?;
    let column = match column {
        "end" => Column::End,
        digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            // Anything too large for usize still clamps to the line end
            Column::At(digits.parse().unwrap_or(usize::MAX))
        }
        _ => return None,
    };

    if row < 1 {
        return Some(Position::start());
    }
    let row = usize::try_from(row).unwrap_or(usize::MAX);
    if row > store.num_lines() {
        return Some(store.end());
    }

    let len = store.line_len(row);
    let column = match column {
        Column::End => len,
        Column::At(column) => column.min(len),
    };
    Some(Position::new(row, column))
}

/// Move `pos` by `offset` characters, clamping at either end of the buffer.
pub(crate) fn apply_offset(store: &LineStore, mut pos: Position, offset: i64) -> Position {
    let mut remaining = usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX);

    if offset >= 0 {
        let mut len = store.line_len(pos.row);
        while pos.column.saturating_add(remaining) > len && pos.row < store.num_lines() {
            remaining -= len - pos.column + 1;
            pos.row += 1;
            pos.column = 0;
            len = store.line_len(pos.row);
        }
        pos.column = pos.column.saturating_add(remaining).min(len);
    } else {
        while remaining > pos.column && pos.row > 1 {
            remaining -= pos.column + 1;
            pos.row -= 1;
            pos.column = store.line_len(pos.row);
        }
        pos.column = pos.column.saturating_sub(remaining);
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(text: &str) -> (LineStore, Marks) {
        let mut store = LineStore::new();
        store.insert(Position::start(), text);
        (store, Marks::default())
    }

    fn at(store: &LineStore, marks: &Marks, expr: &str) -> Position {
        resolve(store, marks, expr).unwrap()
    }

    #[test]
    fn test_end() {
        let (store, marks) = setup("hello\nworld!");
        assert_eq!(at(&store, &marks, "end"), Position::new(2, 6));
    }

    #[test]
    fn test_row_column_clamping() {
        let (store, marks) = setup("hello\nworld");
        assert_eq!(at(&store, &marks, "0.0"), Position::new(1, 0));
        assert_eq!(at(&store, &marks, "-3.4"), Position::new(1, 0));
        assert_eq!(at(&store, &marks, "1.3"), Position::new(1, 3));
        assert_eq!(at(&store, &marks, "1.9"), Position::new(1, 5));
        assert_eq!(at(&store, &marks, "1.end"), Position::new(1, 5));
        assert_eq!(at(&store, &marks, "5.0"), Position::new(2, 5));
        assert_eq!(at(&store, &marks, "1.99999999999999999999999"), Position::new(1, 5));
    }

    #[test]
    fn test_offsets_cross_lines() {
        let (store, marks) = setup("hello\nworld");
        assert_eq!(at(&store, &marks, "1.0 -5"), Position::new(1, 0));
        assert_eq!(at(&store, &marks, "1.0 +3"), Position::new(1, 3));
        assert_eq!(at(&store, &marks, "1.0 +6"), Position::new(2, 0));
        assert_eq!(at(&store, &marks, "2.0 -1"), Position::new(1, 5));
        assert_eq!(at(&store, &marks, "2.0 +9"), Position::new(2, 5));
        assert_eq!(at(&store, &marks, "1.2 +4 -4"), Position::new(1, 2));
        assert_eq!(at(&store, &marks, "1.1 3"), Position::new(1, 4));
    }

    #[test]
    fn test_offsets_over_empty_lines() {
        let (store, marks) = setup("a\n\n\nb");
        assert_eq!(at(&store, &marks, "1.0 +2"), Position::new(2, 0));
        assert_eq!(at(&store, &marks, "1.0 +4"), Position::new(4, 0));
        assert_eq!(at(&store, &marks, "end -2"), Position::new(3, 0));
    }

    #[test]
    fn test_marks() {
        let (store, mut marks) = setup("hello\nworld");
        marks.set("c", Position::new(2, 1)).unwrap();
        assert_eq!(at(&store, &marks, "c"), Position::new(2, 1));
        assert_eq!(at(&store, &marks, "c -2"), Position::new(1, 5));
    }

    #[test]
    fn test_mark_named_like_a_number() {
        let (store, mut marks) = setup("hello");
        marks.set("1", Position::new(1, 4)).unwrap();
        assert_eq!(at(&store, &marks, "1"), Position::new(1, 4));
    }

    #[test]
    fn test_errors() {
        let (store, marks) = setup("hello");
        assert_eq!(
            resolve(&store, &marks, "bad"),
            Err(TextError::UnknownMark("bad".to_string()))
        );
        assert_eq!(
            resolve(&store, &marks, "1.bad"),
            Err(TextError::InvalidIndex("1.bad".to_string()))
        );
        assert_eq!(
            resolve(&store, &marks, "x.1"),
            Err(TextError::InvalidIndex("x.1".to_string()))
        );
        assert_eq!(
            resolve(&store, &marks, "1.0 +x"),
            Err(TextError::InvalidIndex("1.0 +x".to_string()))
        );
        assert_eq!(
            resolve(&store, &marks, "1."),
            Err(TextError::InvalidIndex("1.".to_string()))
        );
        assert_eq!(
            resolve(&store, &marks, ".3"),
            Err(TextError::InvalidIndex(".3".to_string()))
        );
        assert_eq!(
            resolve(&store, &marks, "  "),
            Err(TextError::InvalidIndex("  ".to_string()))
        );
    }
}
