//! Tab expansion for display.
//!
//! Every character other than a tab occupies one column. A tab advances to
//! the next multiple of the tab width. A width of 0 is treated as 1.

/// Replace each tab in `text` with spaces up to the next tab stop.
pub fn expand(text: &str, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut expanded = String::with_capacity(text.len());
    let mut column = 0;

    for ch in text.chars() {
        if ch == '\t' {
            let width = tab_width - column % tab_width;
            expanded.extend(std::iter::repeat(' ').take(width));
            column += width;
        } else {
            expanded.push(ch);
            column += 1;
        }
    }
    expanded
}

/// Number of columns `text` occupies once expanded.
pub fn columns(text: &str, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    text.chars().fold(0, |column, ch| {
        if ch == '\t' {
            column + tab_width - column % tab_width
        } else {
            column + 1
        }
    })
}
