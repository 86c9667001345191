//! Text of the built-in manual, shown with M-m.

pub const MANUAL: &str = "\
Zygote manual

Press M-m again to leave the manual. Keys written as C-x mean Control and x
held together; M-x means Alt (Meta) and x.

Files
  C-o  open a file
  C-s  save; the first save asks for a filename
  C-q  quit; unsaved changes are confirmed first
  C-c  cancel the prompt (Esc works too)

Moving
  Arrows       move by character or line
  PgUp, PgDn   move by page
  C-a, Home    start of line
  C-e, End     end of line

Editing
  C-h, Backspace  delete backward
  Delete          delete forward
  C-w             delete the word before the cursor
  C-u             undo
  C-r             redo
  Enter           new line, keeping the indentation of the current one

Registers
Registers are named by a single character and hold text.
  C-p  put the contents of a register at the cursor
  C-y  yank the selection (or the character under the cursor)
  C-t  type new contents into a register
  C-x  execute a register as a sequence of keys

Keys inside an executed register are written like <C-s>, <Enter> or
<Space>. Write \\< for a literal less-than sign.

Some registers have a special meaning:
  C  cursor column (read-only)
  D  text removed by the last delete
  F  filename
  L  cursor line; writing it moves the cursor
  T  tab width

Modes
  M-m  manual
  M-s  select: text between the anchor and the cursor is selected
  M-v  view: arrows and page keys scroll instead of moving the cursor
  M-w  word: motion and deletion work on words

Configuration
Settings are read from zygote/config.toml in the user configuration
directory. The file is created with defaults on first run.
";
