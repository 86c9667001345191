//! Keyboard event naming.
//!
//! Key events are turned into short strings so that bindings, and the key
//! sequences stored in registers, share one representation: printable
//! characters stand for themselves, other keys and chords use forms such as
//! `<Enter>`, `<C-s>` and `<M-w>`.

use std::sync::OnceLock;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use regex::Regex;

/// Name of a key event, or `None` for keys that have no binding form
pub fn key_string(key: KeyEvent) -> Option<String> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let name = match key.code {
        KeyCode::Char(ch) if ctrl || alt => {
            let ch = if ctrl { ch.to_ascii_lowercase() } else { ch };
            let prefix = match (ctrl, alt) {
                (true, true) => "C-M-",
                (true, false) => "C-",
                _ => "M-",
            };
            return Some(format!("<{}{}>", prefix, ch));
        }
        KeyCode::Char(' ') => "Space",
        KeyCode::Char(ch) => return Some(ch.to_string()),
        KeyCode::Up => "Up",
        KeyCode::Down => "Down",
        KeyCode::Left => "Left",
        KeyCode::Right => "Right",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PgUp",
        KeyCode::PageDown => "PgDn",
        KeyCode::Insert => "Insert",
        KeyCode::Delete => "Delete",
        KeyCode::Backspace => "Backspace",
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        KeyCode::Esc => "Esc",
        KeyCode::F(n) => return Some(format!("<F{}>", n)),
        _ => return None,
    };
    Some(format!("<{}>", name))
}

/// Matcher for a leading `<...>` key form. `None` only if the pattern fails
/// to compile, in which case every character is taken literally.
fn form_regex() -> Option<&'static Regex> {
    static FORM: OnceLock<Option<Regex>> = OnceLock::new();
    FORM.get_or_init(|| Regex::new(r"^<[^<>]+?>").ok()).as_ref()
}

/// Split recorded input into key strings.
///
/// `<...>` forms become single keys; `\<` stands for a literal `<`.
pub fn split_keys(input: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut rest = input;

    while let Some(ch) = rest.chars().next() {
        if rest.starts_with("\\<") {
            keys.push("<".to_string());
            rest = &rest[2..];
        } else if let Some(form) = form_regex().and_then(|re| re.find(rest)) {
            keys.push(form.as_str().to_string());
            rest = &rest[form.end()..];
        } else {
            keys.push(ch.to_string());
            rest = &rest[ch.len_utf8()..];
        }
    }
    keys
}
