//! Cursor motion helpers over a single line of text.

use zygote_tabs::columns;

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Column after the word (or run of punctuation) at `column` and the
/// whitespace that follows it.
pub(crate) fn word_right(line: &[char], column: usize) -> usize {
    let len = line.len();
    let mut column = column.min(len);
    if column == len {
        return len;
    }

    let word = is_word_char(line[column]);
    while column < len && !line[column].is_whitespace() && is_word_char(line[column]) == word {
        column += 1;
    }
    while column < len && line[column].is_whitespace() {
        column += 1;
    }
    column
}

/// Start of the word (or run of punctuation) before `column`, skipping any
/// whitespace in between.
pub(crate) fn word_left(line: &[char], column: usize) -> usize {
    let mut column = column.min(line.len());
    while column > 0 && line[column - 1].is_whitespace() {
        column -= 1;
    }
    if column == 0 {
        return 0;
    }

    let word = is_word_char(line[column - 1]);
    while column > 0
        && !line[column - 1].is_whitespace()
        && is_word_char(line[column - 1]) == word
    {
        column -= 1;
    }
    column
}

/// Character count of `text` up to display column `goal`, never splitting a
/// tab.
pub(crate) fn column_at_display(text: &str, goal: usize, tab_width: usize) -> usize {
    for (i, (byte, _)) in text.char_indices().enumerate() {
        let next_byte = text[byte..]
            .chars()
            .next()
            .map_or(byte, |ch| byte + ch.len_utf8());
        if columns(&text[..next_byte], tab_width) > goal {
            return i;
        }
    }
    text.chars().count()
}

/// Display column of character `column` in `text`.
pub(crate) fn display_column(text: &str, column: usize, tab_width: usize) -> usize {
    let end = text
        .char_indices()
        .nth(column)
        .map_or(text.len(), |(byte, _)| byte);
    columns(&text[..end], tab_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_word_right() {
        let line = chars("foo bar, baz");
        assert_eq!(word_right(&line, 0), 4);
        assert_eq!(word_right(&line, 4), 7);
        assert_eq!(word_right(&line, 7), 9);
        assert_eq!(word_right(&line, 9), 12);
        assert_eq!(word_right(&line, 12), 12);
    }

    #[test]
    fn test_word_left() {
        let line = chars("foo bar, baz");
        assert_eq!(word_left(&line, 12), 9);
        assert_eq!(word_left(&line, 9), 7);
        assert_eq!(word_left(&line, 7), 4);
        assert_eq!(word_left(&line, 4), 0);
        assert_eq!(word_left(&line, 0), 0);
    }

    #[test]
    fn test_word_motion_with_unicode() {
        let line = chars("héllo wörld");
        assert_eq!(word_right(&line, 0), 6);
        assert_eq!(word_left(&line, 11), 6);
    }

    #[test]
    fn test_column_at_display() {
        assert_eq!(column_at_display("hello", 3, 8), 3);
        assert_eq!(column_at_display("hello", 9, 8), 5);
        assert_eq!(column_at_display("\thello", 4, 8), 0);
        assert_eq!(column_at_display("\thello", 8, 8), 1);
        assert_eq!(column_at_display("ab\tc", 5, 4), 2);
    }

    #[test]
    fn test_display_column() {
        assert_eq!(display_column("\tx", 1, 8), 8);
        assert_eq!(display_column("\tx", 2, 8), 9);
        assert_eq!(display_column("abc", 9, 8), 3);
    }
}
