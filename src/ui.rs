//! Screen rendering: the text area above a one-line status bar.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use zygote_tabs::expand;
use zygote_text::Position;

use crate::editor::{display_column, Editor, Surface, CURSOR};

/// Width reserved for the cursor position on the status line
const POSITION_WIDTH: u16 = 13;
/// Width reserved for the scroll percentage on the status line
const PERCENT_WIDTH: u16 = 4;

pub fn draw(frame: &mut Frame, editor: &mut Editor) {
    let [text_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    editor.set_page_height(text_area.height as usize);
    if !editor.modes().view {
        let result = editor.reveal_cursor();
        editor.report(result);
    }

    render_text(frame, text_area, editor);
    if editor.focus() == Surface::Prompt {
        render_prompt(frame, status_area, editor);
    } else {
        render_status(frame, status_area, editor);
    }
}

fn selection_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::Blue)
}

fn line_text(editor: &Editor, surface: Surface, row: usize) -> String {
    editor
        .buffer(surface)
        .get(&format!("{row}.0"), &format!("{row}.end"))
        .unwrap_or_default()
}

/// Row `row` with tabs expanded and the part inside `selection` highlighted.
fn styled_line(
    text: &str,
    row: usize,
    selection: Option<(Position, Position)>,
    tab_width: usize,
) -> Line<'static> {
    let expanded = expand(text, tab_width);
    let Some((start, end)) = selection else {
        return Line::raw(expanded);
    };
    if row < start.row || row > end.row {
        return Line::raw(expanded);
    }

    let width = expanded.chars().count();
    let from = if row == start.row {
        display_column(text, start.column, tab_width)
    } else {
        0
    };
    let to = if row == end.row {
        display_column(text, end.column, tab_width)
    } else {
        width
    };
    highlight(&expanded, from, to)
}

/// Split tab-free `text` into plain, selected and plain spans at character
/// columns `from..to`.
fn highlight(text: &str, from: usize, to: usize) -> Line<'static> {
    let before: String = text.chars().take(from).collect();
    let selected: String = text.chars().skip(from).take(to.saturating_sub(from)).collect();
    let after: String = text.chars().skip(to.max(from)).collect();
    Line::from(vec![
        Span::raw(before),
        Span::styled(selected, selection_style()),
        Span::raw(after),
    ])
}

fn render_text(frame: &mut Frame, area: Rect, editor: &Editor) {
    let surface = editor.displayed();
    let buffer = editor.buffer(surface);
    let top = editor.scroll(surface);
    let tab_width = editor.tab_width();
    let selection = if editor.modes().select {
        editor.selection(surface).ok()
    } else {
        None
    };

    let last = (top + area.height as usize).min(buffer.num_lines());
    let lines: Vec<Line> = (top + 1..=last)
        .map(|row| styled_line(&line_text(editor, surface, row), row, selection, tab_width))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);

    if editor.focus() == Surface::Prompt {
        return;
    }
    let Ok(cursor) = buffer.index(CURSOR) else {
        return;
    };
    if cursor.row <= top || cursor.row > last {
        return;
    }
    let column = display_column(&line_text(editor, surface, cursor.row), cursor.column, tab_width);
    if column < area.width as usize {
        frame.set_cursor_position((
            area.x + column as u16,
            area.y + (cursor.row - top - 1) as u16,
        ));
    }
}

fn render_prompt(frame: &mut Frame, area: Rect, editor: &Editor) {
    let label = editor.prompt_kind().label();
    let tab_width = editor.tab_width();
    let text = line_text(editor, Surface::Prompt, 1);
    let selection = if editor.modes().select {
        editor.selection(Surface::Prompt).ok()
    } else {
        None
    };

    let mut line = styled_line(&text, 1, selection, tab_width);
    line.spans.insert(0, Span::styled(label, Style::default().add_modifier(Modifier::BOLD)));
    frame.render_widget(Paragraph::new(line), area);

    if let Ok(cursor) = editor.buffer(Surface::Prompt).index(CURSOR) {
        let column = label.chars().count() + display_column(&text, cursor.column, tab_width);
        if column < area.width as usize {
            frame.set_cursor_position((area.x + column as u16, area.y));
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, editor: &Editor) {
    if let Some(status) = editor.status() {
        let style = if status.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(status.text.clone()).style(style), area);
        return;
    }

    let surface = editor.displayed();
    let buffer = editor.buffer(surface);
    let position = buffer.index(CURSOR).map_or_else(
        |_| String::new(),
        |cursor| {
            let text = line_text(editor, surface, cursor.row);
            position_label(cursor, display_column(&text, cursor.column, editor.tab_width()))
        },
    );
    let percent = scroll_percent(editor.scroll(surface), editor.page_height(), buffer.num_lines());

    let [modes_area, position_area, percent_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(POSITION_WIDTH),
        Constraint::Length(PERCENT_WIDTH),
    ])
    .areas(area);
    frame.render_widget(Paragraph::new(editor.modes().describe()), modes_area);
    frame.render_widget(Paragraph::new(position), position_area);
    frame.render_widget(Paragraph::new(percent), percent_area);
}

/// `line,column`, followed by `-display` when tabs push the display column
/// elsewhere.
pub fn position_label(cursor: Position, display: usize) -> String {
    if display == cursor.column {
        format!("{},{}", cursor.row, cursor.column)
    } else {
        format!("{},{}-{}", cursor.row, cursor.column, display)
    }
}

/// How far the view has scrolled: `All` when every row fits, otherwise a
/// percentage that reaches 100 when the last row is on screen.
pub fn scroll_percent(top: usize, height: usize, total: usize) -> String {
    if total == 0 {
        return "All".to_string();
    }
    let first = top as f64 / total as f64;
    let last = (top + height).min(total) as f64 / total as f64;
    if first == 0.0 && last >= 1.0 {
        return "All".to_string();
    }
    let fraction = first / (1.0 - (last - first));
    format!("{}%", (fraction * 100.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use zygote_text::Buffer;

    fn label(buffer: &Buffer, expr: &str) -> String {
        let cursor = buffer.index(expr).unwrap();
        let text = buffer
            .get(&format!("{}.0", cursor.row), &format!("{}.end", cursor.row))
            .unwrap();
        position_label(cursor, display_column(&text, cursor.column, 8))
    }

    #[test]
    fn test_position_label() {
        let buffer = Buffer::with_text("func main() {\n\tprintln(\"hello\")\n}\n");
        assert_eq!(label(&buffer, "1.end"), "1,13");
        assert_eq!(label(&buffer, "2.end"), "2,17-24");
        assert_eq!(label(&buffer, "2.0"), "2,0");
        assert_eq!(label(&buffer, "end"), "4,0");
    }

    #[test]
    fn test_position_label_empty_buffer() {
        assert_eq!(label(&Buffer::new(), "end"), "1,0");
    }

    #[test]
    fn test_scroll_percent() {
        assert_eq!(scroll_percent(0, 10, 5), "All");
        assert_eq!(scroll_percent(0, 5, 10), "0%");
        assert_eq!(scroll_percent(2, 1, 4), "66%");
        assert_eq!(scroll_percent(2, 2, 4), "100%");
    }

    #[test]
    fn test_highlight_splits_at_columns() {
        let line = highlight("hello world", 2, 7);
        let parts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["he", "llo w", "orld"]);
        assert_eq!(line.spans[1].style, selection_style());
    }

    #[test]
    fn test_styled_line_expands_tabs_inside_selection() {
        let selection = Some((Position::new(1, 1), Position::new(2, 0)));
        let line = styled_line("a\tb", 1, selection, 4);
        let parts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["a", "   b", ""]);

        let outside = styled_line("x", 3, selection, 4);
        assert_eq!(outside.spans.len(), 1);
    }

    #[test]
    fn test_draw_shows_text_and_status() {
        let mut editor = Editor::new(8).unwrap();
        for key in ["h", "i"] {
            editor.handle_key(key);
        }

        let mut terminal = Terminal::new(TestBackend::new(30, 4)).unwrap();
        terminal.draw(|frame| draw(frame, &mut editor)).unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String { (0..30).map(|x| buffer[(x, y)].symbol()).collect() };
        assert!(row(0).starts_with("hi"));
        assert!(row(3).contains("1,2"));
        assert!(row(3).ends_with("All "));
    }
}
