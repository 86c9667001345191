/// What the prompt line is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    OpenConfirm,
    Put,
    QuitConfirm,
    Save,
    SaveConfirm,
    Write,
    WriteWhich,
    Execute,
    Yank,
}

impl PromptKind {
    /// Text shown before the prompt input
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Open => "Open file: ",
            PromptKind::OpenConfirm | PromptKind::QuitConfirm => {
                "Abandon unsaved changes? (y/n): "
            }
            PromptKind::Put => "Put from register: ",
            PromptKind::Save => "Save as: ",
            PromptKind::SaveConfirm => "Overwrite file? (y/n): ",
            PromptKind::Write => "Write: ",
            PromptKind::WriteWhich => "Write into register: ",
            PromptKind::Execute => "Execute from register: ",
            PromptKind::Yank => "Yank into register: ",
        }
    }

    /// Answered with a single `y` or `n`
    pub(crate) fn is_confirmation(self) -> bool {
        matches!(
            self,
            PromptKind::OpenConfirm | PromptKind::QuitConfirm | PromptKind::SaveConfirm
        )
    }

    /// Answered with a single register name
    pub(crate) fn takes_register(self) -> bool {
        matches!(
            self,
            PromptKind::Put | PromptKind::WriteWhich | PromptKind::Execute | PromptKind::Yank
        )
    }
}
