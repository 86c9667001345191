use std::fmt;

/// Location in a buffer.
///
/// Rows start at 1, columns at 0. The column counts characters, not bytes,
/// and never includes the line's newline. Positions order by row, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    /// Create a position from row and column
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// First position of any buffer (`1.0`)
    pub const fn start() -> Self {
        Self::new(1, 0)
    }

    /// Position reached after typing `text` at this position.
    ///
    /// Each newline moves to column 0 of the following row.
    pub fn advanced_over(self, text: &str) -> Self {
        match text.rfind('\n') {
            None => Self::new(self.row, self.column + text.chars().count()),
            Some(last_newline) => Self::new(
                self.row + text.matches('\n').count(),
                text[last_newline + 1..].chars().count(),
            ),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.row, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_index_form() {
        assert_eq!(Position::new(3, 7).to_string(), "3.7");
        assert_eq!(Position::start().to_string(), "1.0");
    }

    #[test]
    fn test_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 0));
        assert!(Position::new(2, 1) > Position::new(2, 0));
        assert_eq!(Position::new(4, 4).max(Position::new(4, 2)), Position::new(4, 4));
    }

    #[test]
    fn test_advanced_over_single_line() {
        assert_eq!(Position::new(2, 3).advanced_over("abc"), Position::new(2, 6));
        assert_eq!(Position::new(2, 3).advanced_over(""), Position::new(2, 3));
    }

    #[test]
    fn test_advanced_over_counts_chars() {
        assert_eq!(Position::new(1, 0).advanced_over("héllo"), Position::new(1, 5));
    }

    #[test]
    fn test_advanced_over_newlines() {
        assert_eq!(Position::new(1, 4).advanced_over("a\nbc"), Position::new(2, 2));
        assert_eq!(Position::new(1, 4).advanced_over("\n\n"), Position::new(3, 0));
    }
}
