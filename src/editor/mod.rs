//! Editor state and the commands bound to keys.
//!
//! The editor owns three buffers: the main text, the single-line prompt and
//! the read-only manual. Each carries a cursor mark and a selection mark.

mod motion;
mod prompt;
mod registers;

pub use prompt::PromptKind;

use std::cmp::Ordering;
use std::path::Path;

use anyhow::{bail, Context, Result};
use zygote_text::{Buffer, Position};

use crate::manual::MANUAL;
use registers::Registers;

pub(crate) use motion::display_column;

/// Cursor mark, present in every buffer
pub const CURSOR: &str = "c";
/// Selection anchor, present in every buffer
pub const SELECTION: &str = "s";

const MAX_EXECUTE_DEPTH: usize = 16;
const GREETING: &str = "Zygote, alpha version. Press M-m to view the manual.";

/// Which buffer receives keys or is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Main,
    Prompt,
    Manual,
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Modes {
    pub manual: bool,
    pub select: bool,
    pub view: bool,
    pub word: bool,
}

impl Modes {
    /// Status line summary, empty when no mode is on
    pub fn describe(&self) -> String {
        let active: Vec<&str> = [
            (self.manual, "manual (M-m)"),
            (self.select, "select (M-s)"),
            (self.view, "view (M-v)"),
            (self.word, "word (M-w)"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();

        if active.is_empty() {
            String::new()
        } else {
            format!("Modes: {}", active.join(", "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

pub struct Editor {
    main: Buffer,
    prompt: Buffer,
    manual: Buffer,
    focus: Surface,
    prompt_kind: PromptKind,
    modes: Modes,
    registers: Registers,
    filename: String,
    tab_width: usize,
    status: Option<Status>,
    modified: bool,
    main_scroll: usize,
    manual_scroll: usize,
    page_height: usize,
    /// Display column kept across consecutive line moves
    goal_column: Option<usize>,
    pending_register: char,
    execute_depth: usize,
    should_quit: bool,
}

fn surface_buffer(text: &str, cursor: &str) -> Result<Buffer> {
    let buffer = Buffer::with_text(text);
    buffer.mark_set(CURSOR, cursor)?;
    buffer.mark_set(SELECTION, CURSOR)?;
    Ok(buffer)
}

fn line_bounds(row: usize) -> (String, String) {
    (format!("{row}.0"), format!("{row}.end"))
}

impl Editor {
    pub fn new(tab_width: usize) -> Result<Self> {
        Ok(Self {
            main: surface_buffer("", "end")?,
            prompt: surface_buffer("", "end")?,
            manual: surface_buffer(MANUAL, "1.0")?,
            focus: Surface::Main,
            prompt_kind: PromptKind::Open,
            modes: Modes::default(),
            registers: Registers::default(),
            filename: String::new(),
            tab_width: tab_width.max(1),
            status: Some(Status {
                text: GREETING.to_string(),
                is_error: false,
            }),
            modified: false,
            main_scroll: 0,
            manual_scroll: 0,
            page_height: 1,
            goal_column: None,
            pending_register: ' ',
            execute_depth: 0,
            should_quit: false,
        })
    }

    pub fn buffer(&self, surface: Surface) -> &Buffer {
        match surface {
            Surface::Main => &self.main,
            Surface::Prompt => &self.prompt,
            Surface::Manual => &self.manual,
        }
    }

    fn focused(&self) -> &Buffer {
        self.buffer(self.focus)
    }

    pub fn focus(&self) -> Surface {
        self.focus
    }

    /// Surface shown in the text area
    pub fn displayed(&self) -> Surface {
        if self.modes.manual {
            Surface::Manual
        } else {
            Surface::Main
        }
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn prompt_kind(&self) -> PromptKind {
        self.prompt_kind
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// First visible row (zero-based) of a scrollable surface
    pub fn scroll(&self, surface: Surface) -> usize {
        match surface {
            Surface::Manual => self.manual_scroll,
            _ => self.main_scroll,
        }
    }

    fn scroll_mut(&mut self, surface: Surface) -> &mut usize {
        match surface {
            Surface::Manual => &mut self.manual_scroll,
            _ => &mut self.main_scroll,
        }
    }

    pub fn page_height(&self) -> usize {
        self.page_height
    }

    pub fn set_page_height(&mut self, height: usize) {
        self.page_height = height.max(1);
    }

    /// Scroll the displayed surface so that its cursor row is visible.
    pub fn reveal_cursor(&mut self) -> Result<()> {
        let surface = self.displayed();
        let row = self.buffer(surface).index(CURSOR)?.row - 1;
        let height = self.page_height;
        let top = self.scroll_mut(surface);
        if row < *top {
            *top = row;
        } else if row >= *top + height {
            *top = row + 1 - height;
        }
        Ok(())
    }

    fn status_normal(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            is_error: false,
        });
    }

    fn status_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            is_error: true,
        });
    }

    /// Show a failed command on the status line and in the log.
    pub fn report(&mut self, result: Result<()>) {
        if let Err(err) = result {
            let message = format!("{:#}", err);
            zygote_logger::error(message.clone());
            self.status_error(message);
        }
    }

    /// Handle one key string such as `"a"`, `"<C-s>"` or `"<PgDn>"`.
    pub fn handle_key(&mut self, key: &str) {
        self.status = None;
        let result = self.dispatch(key);
        self.report(result);
    }

    fn dispatch(&mut self, key: &str) -> Result<()> {
        let mut separate = false;
        let mut keep_goal = false;

        match key {
            "<Up>" | "<Down>" | "<PgUp>" | "<PgDn>" => {
                let page = self.page_height.saturating_sub(1).max(1) as i64;
                let delta = match key {
                    "<Up>" => -1,
                    "<Down>" => 1,
                    "<PgUp>" => -page,
                    _ => page,
                };
                if self.modes.view && self.focus != Surface::Prompt {
                    self.scroll_by(delta);
                } else {
                    self.change_line(delta)?;
                    separate = true;
                    keep_goal = true;
                }
            }
            "<Left>" => {
                self.move_cursor(Motion::Left, self.modes.word)?;
                separate = true;
            }
            "<Right>" => {
                self.move_cursor(Motion::Right, self.modes.word)?;
                separate = true;
            }
            "<Home>" | "<C-a>" => {
                self.move_to_line_edge("0")?;
                separate = true;
            }
            "<End>" | "<C-e>" => {
                self.move_to_line_edge("end")?;
                separate = true;
            }
            "<Backspace>" | "<C-h>" => self.delete_motion(Motion::Left, self.modes.word)?,
            "<Delete>" => self.delete_motion(Motion::Right, self.modes.word)?,
            "<C-w>" => self.delete_motion(Motion::Left, true)?,
            "<Enter>" | "<C-m>" | "<C-j>" => self.type_char('\n')?,
            "<Tab>" | "<C-i>" => self.type_char('\t')?,
            "<Space>" => self.type_char(' ')?,
            "<C-c>" | "<Esc>" => self.cancel(),
            "<C-o>" => self.begin_open()?,
            "<C-p>" => self.open_prompt(PromptKind::Put)?,
            "<C-q>" => self.quit()?,
            "<C-r>" => self.redo()?,
            "<C-s>" => self.save_file(true)?,
            "<C-t>" => self.open_prompt(PromptKind::WriteWhich)?,
            "<C-u>" => self.undo()?,
            "<C-x>" => self.open_prompt(PromptKind::Execute)?,
            "<C-y>" => self.open_prompt(PromptKind::Yank)?,
            "<M-m>" => self.toggle_manual(),
            "<M-s>" => self.toggle_select()?,
            "<M-v>" => self.modes.view = !self.modes.view,
            "<M-w>" => self.modes.word = !self.modes.word,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => self.type_char(ch)?,
                    _ => bail!("Unbound key: {}", key),
                }
            }
        }

        if !keep_goal {
            self.goal_column = None;
        }
        if separate && self.focus == Surface::Main {
            self.main.separator();
        }
        Ok(())
    }

    fn editable(&self) -> bool {
        self.focus != Surface::Manual
    }

    fn touch(&mut self) {
        if self.focus == Surface::Main {
            self.modified = true;
        }
    }

    fn cursor_row(&self) -> Result<usize> {
        Ok(self.focused().index(CURSOR)?.row)
    }

    fn move_to_line_edge(&mut self, column: &str) -> Result<()> {
        let row = self.cursor_row()?;
        self.focused().mark_set(CURSOR, &format!("{row}.{column}"))?;
        Ok(())
    }

    fn move_cursor(&mut self, motion: Motion, by_word: bool) -> Result<()> {
        let buffer = self.focused();
        if !by_word {
            let step = match motion {
                Motion::Left => "-1",
                Motion::Right => "+1",
            };
            buffer.mark_set(CURSOR, &format!("{CURSOR} {step}"))?;
            return Ok(());
        }

        let pos = buffer.index(CURSOR)?;
        let (line_start, line_end) = line_bounds(pos.row);
        let line: Vec<char> = buffer.get(&line_start, &line_end)?.chars().collect();
        let single_line = self.focus == Surface::Prompt;

        let target = match motion {
            Motion::Right if pos.column >= line.len() => {
                if single_line {
                    return Ok(());
                }
                format!("{}.0", pos.row + 1)
            }
            Motion::Left if pos.column == 0 => {
                if single_line || pos.row == 1 {
                    return Ok(());
                }
                format!("{}.end", pos.row - 1)
            }
            Motion::Right => format!("{}.{}", pos.row, motion::word_right(&line, pos.column)),
            Motion::Left => format!("{}.{}", pos.row, motion::word_left(&line, pos.column)),
        };
        buffer.mark_set(CURSOR, &target)?;
        Ok(())
    }

    fn change_line(&mut self, delta: i64) -> Result<()> {
        if self.focus == Surface::Prompt {
            return Ok(());
        }

        let buffer = self.focused();
        let pos = buffer.index(CURSOR)?;
        let before = buffer.get(&format!("{}.0", pos.row), CURSOR)?;
        let column = zygote_tabs::columns(&before, self.tab_width);
        let goal = self.goal_column.map_or(column, |goal| goal.max(column));

        let last = buffer.num_lines() as i64;
        let row = (pos.row as i64).saturating_add(delta).clamp(1, last) as usize;
        let (line_start, line_end) = line_bounds(row);
        let line = buffer.get(&line_start, &line_end)?;
        let target = motion::column_at_display(&line, goal, self.tab_width);
        buffer.mark_set(CURSOR, &format!("{row}.{target}"))?;

        self.goal_column = Some(goal);
        Ok(())
    }

    fn scroll_by(&mut self, delta: i64) {
        let surface = self.displayed();
        let last = self.buffer(surface).num_lines() as i64 - 1;
        let top = self.scroll_mut(surface);
        *top = (*top as i64).saturating_add(delta).clamp(0, last.max(0)) as usize;
    }

    /// Selection marks ordered so that the first does not come after the second
    fn ordered_marks(&self) -> Result<(&'static str, &'static str)> {
        Ok(match self.focused().compare(SELECTION, CURSOR)? {
            Ordering::Greater => (CURSOR, SELECTION),
            _ => (SELECTION, CURSOR),
        })
    }

    /// Ordered selection bounds of a surface
    pub fn selection(&self, surface: Surface) -> Result<(Position, Position)> {
        let buffer = self.buffer(surface);
        let a = buffer.index(SELECTION)?;
        let b = buffer.index(CURSOR)?;
        Ok(if a <= b { (a, b) } else { (b, a) })
    }

    /// Selected text, or the character under the cursor when nothing is
    /// selected
    fn selected_text(&self) -> Result<String> {
        let buffer = self.focused();
        let collapsed = buffer.compare(SELECTION, CURSOR)? == Ordering::Equal;
        if self.modes.select && !collapsed {
            let (from, to) = self.ordered_marks()?;
            Ok(buffer.get(from, to)?)
        } else {
            Ok(buffer.get(CURSOR, &format!("{CURSOR} +1"))?)
        }
    }

    fn insert_at_cursor(&mut self, text: &str) -> Result<()> {
        if !self.editable() {
            return Ok(());
        }

        let buffer = self.focused();
        let anchored = buffer.compare(SELECTION, CURSOR)? == Ordering::Equal;
        let start = buffer.index(CURSOR)?;
        buffer.insert(CURSOR, text)?;
        // The selection anchor stays in front of typed text
        if anchored {
            buffer.mark_set(SELECTION, &start.to_string())?;
        }

        self.touch();
        Ok(())
    }

    fn delete_motion(&mut self, motion: Motion, by_word: bool) -> Result<()> {
        if !self.editable() {
            return Ok(());
        }

        let collapsed = self.focused().compare(SELECTION, CURSOR)? == Ordering::Equal;
        if !self.modes.select || collapsed {
            self.focused().mark_set(SELECTION, CURSOR)?;
            self.move_cursor(motion, by_word)?;
        }

        let (from, to) = self.ordered_marks()?;
        let removed = self.focused().delete(from, to)?;
        if !removed.is_empty() {
            self.registers.set('D', removed);
            self.touch();
        }
        Ok(())
    }

    fn type_char(&mut self, ch: char) -> Result<()> {
        if self.focus == Surface::Prompt {
            let kind = self.prompt_kind;
            if kind.is_confirmation() {
                return self.confirm(ch);
            }
            if kind.takes_register() {
                return self.choose_register(ch);
            }
            if ch == '\n' {
                return self.submit_prompt();
            }
        }

        let mut text = ch.to_string();
        if ch == '\n' && self.editable() {
            text.push_str(&self.auto_indent()?);
        }
        self.insert_at_cursor(&text)
    }

    /// Leading whitespace of the cursor line, for the line about to be
    /// opened. A line holding nothing but whitespace is emptied.
    fn auto_indent(&self) -> Result<String> {
        let buffer = self.focused();
        let line_start = format!("{}.0", buffer.index(CURSOR)?.row);
        let before = buffer.get(&line_start, CURSOR)?;
        let indent: String = before
            .chars()
            .take_while(|ch| *ch == ' ' || *ch == '\t')
            .collect();
        if !before.is_empty() && indent.len() == before.len() {
            buffer.delete(&line_start, CURSOR)?;
        }
        Ok(indent)
    }

    fn open_prompt(&mut self, kind: PromptKind) -> Result<()> {
        self.prompt.delete("1.0", "end")?;
        self.prompt_kind = kind;
        self.focus = Surface::Prompt;
        Ok(())
    }

    fn close_prompt(&mut self) {
        self.focus = self.displayed();
    }

    fn cancel(&mut self) {
        if self.focus == Surface::Prompt {
            self.close_prompt();
            self.status_normal("Cancelled.");
        }
    }

    fn confirm(&mut self, ch: char) -> Result<()> {
        match ch {
            'y' => match self.prompt_kind {
                PromptKind::OpenConfirm => self.open_prompt(PromptKind::Open)?,
                PromptKind::SaveConfirm => {
                    self.close_prompt();
                    self.save_file(true)?;
                }
                PromptKind::QuitConfirm => self.should_quit = true,
                _ => {}
            },
            'n' => self.close_prompt(),
            _ => {}
        }
        Ok(())
    }

    fn choose_register(&mut self, name: char) -> Result<()> {
        let kind = self.prompt_kind;
        self.pending_register = name;
        self.close_prompt();

        match kind {
            PromptKind::Put => {
                let text = self.register(name)?;
                self.insert_at_cursor(&text)?;
            }
            PromptKind::WriteWhich => self.open_prompt(PromptKind::Write)?,
            PromptKind::Execute => {
                let keys = self.register(name)?;
                self.execute(&keys)?;
            }
            PromptKind::Yank => {
                let text = self.selected_text()?;
                self.set_register(name, text)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn submit_prompt(&mut self) -> Result<()> {
        let text = self.prompt.get("1.0", "end")?;
        let kind = self.prompt_kind;
        self.close_prompt();

        match kind {
            PromptKind::Open => self.open_file(&text)?,
            PromptKind::Save => {
                self.filename = text;
                self.save_file(false)?;
            }
            PromptKind::Write => self.set_register(self.pending_register, text)?,
            _ => {}
        }
        Ok(())
    }

    /// Current value of a register.
    pub fn register(&self, name: char) -> Result<String> {
        Ok(match name {
            'C' => self.focused().index(CURSOR)?.column.to_string(),
            'F' => self.filename.clone(),
            'L' => self.cursor_row()?.to_string(),
            'T' => self.tab_width.to_string(),
            _ => self.registers.get(name),
        })
    }

    /// Store a value into a register, applying the side effects of the
    /// special ones.
    pub fn set_register(&mut self, name: char, value: String) -> Result<()> {
        match name {
            'C' => bail!("Register C is read-only"),
            'F' => self.filename = value,
            'L' => {
                let row: i64 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Not a line number: {:?}", value))?;
                let column = self.focused().index(CURSOR)?.column;
                self.focused()
                    .mark_set(CURSOR, &format!("{}.{}", row.max(0), column))?;
            }
            'T' => {
                let width: i64 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Not a tab width: {:?}", value))?;
                self.tab_width = width.max(1) as usize;
            }
            _ => self.registers.set(name, value),
        }
        Ok(())
    }

    /// Replay the keys spelled out in `input`.
    fn execute(&mut self, input: &str) -> Result<()> {
        if self.execute_depth >= MAX_EXECUTE_DEPTH {
            bail!("Register execution nested too deeply");
        }
        zygote_logger::debug(format!("Executing keys: {:?}", input));

        self.execute_depth += 1;
        let mut result = Ok(());
        for key in zygote_keyboard::split_keys(input) {
            result = self.dispatch(&key);
            if result.is_err() || self.should_quit {
                break;
            }
        }
        self.execute_depth -= 1;
        result
    }

    fn toggle_manual(&mut self) {
        if self.focus != Surface::Prompt {
            self.modes.manual = !self.modes.manual;
            self.close_prompt();
        }
    }

    fn toggle_select(&mut self) -> Result<()> {
        self.modes.select = !self.modes.select;
        for buffer in [&self.main, &self.prompt, &self.manual] {
            buffer.mark_set(SELECTION, CURSOR)?;
        }
        Ok(())
    }

    fn undo(&mut self) -> Result<()> {
        if self.focus != Surface::Main {
            return Ok(());
        }
        if self.main.undo(&[CURSOR])? {
            self.modified = true;
        } else {
            self.status_error("Nothing to undo.");
        }
        Ok(())
    }

    fn redo(&mut self) -> Result<()> {
        if self.focus != Surface::Main {
            return Ok(());
        }
        if self.main.redo(&[CURSOR])? {
            self.modified = true;
        } else {
            self.status_error("Nothing to redo.");
        }
        Ok(())
    }

    fn begin_open(&mut self) -> Result<()> {
        if self.modified {
            self.open_prompt(PromptKind::OpenConfirm)
        } else {
            self.open_prompt(PromptKind::Open)
        }
    }

    fn quit(&mut self) -> Result<()> {
        if self.modified {
            self.open_prompt(PromptKind::QuitConfirm)
        } else {
            self.should_quit = true;
            Ok(())
        }
    }

    /// Open the file named on the command line. A path that does not exist
    /// yet becomes the save target of an empty buffer.
    pub fn open_initial(&mut self, path: &str) -> Result<()> {
        if Path::new(path).exists() {
            self.open_file(path)
        } else {
            self.filename = path.to_string();
            self.status_normal(format!("New file \"{}\".", path));
            Ok(())
        }
    }

    /// Replace the main buffer with the contents of `path`.
    pub fn open_file(&mut self, path: &str) -> Result<()> {
        let bytes = std::fs::read(path).with_context(|| format!("Failed to open {}", path))?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                zygote_logger::warn(format!("Refusing to open {}: {}", path, err));
                bail!("{} is not valid UTF-8", path);
            }
        };

        self.main.delete("1.0", "end")?;
        self.main.insert("1.0", &text)?;
        self.main.mark_set(CURSOR, "1.0")?;
        self.main.mark_set(SELECTION, CURSOR)?;
        self.main.edit_reset();

        self.filename = path.to_string();
        self.modified = false;
        self.main_scroll = 0;
        zygote_logger::info(format!("Opened {}", path));
        self.status_normal(format!("Opened \"{}\".", path));
        Ok(())
    }

    /// Write the main buffer to the current filename, with a final newline.
    ///
    /// Without a filename the user is asked for one. An existing file is only
    /// replaced when `overwrite` is set or the user confirms.
    fn save_file(&mut self, overwrite: bool) -> Result<()> {
        if self.focus != Surface::Main {
            return Ok(());
        }
        if self.filename.is_empty() {
            return self.open_prompt(PromptKind::Save);
        }
        if !overwrite && Path::new(&self.filename).exists() {
            return self.open_prompt(PromptKind::SaveConfirm);
        }

        let mut text = self.main.get("1.0", "end")?;
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        std::fs::write(&self.filename, text)
            .with_context(|| format!("Failed to save {}", self.filename))?;

        self.modified = false;
        zygote_logger::info(format!("Saved {}", self.filename));
        self.status_normal(format!("Saved \"{}\".", self.filename));
        Ok(())
    }
}
