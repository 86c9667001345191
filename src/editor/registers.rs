use std::collections::HashMap;

/// Plain text registers, identified by a single character.
///
/// Registers with editor-defined meaning (cursor line, filename, ...) are
/// answered by the editor itself and never stored here.
#[derive(Debug, Default)]
pub(crate) struct Registers {
    values: HashMap<char, String>,
}

impl Registers {
    /// Value of a register; unset registers are empty
    pub(crate) fn get(&self, name: char) -> String {
        self.values.get(&name).cloned().unwrap_or_default()
    }

    pub(crate) fn set(&mut self, name: char, value: String) {
        self.values.insert(name, value);
    }
}
