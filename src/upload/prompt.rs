/// Modal dialogs the upload workflow asks the UI to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// The check passed; import or cancel.
    ConfirmImport,
    /// The check failed; acknowledging reloads the view.
    InvalidFile,
    Imported,
    AlreadyExists,
    /// The delete succeeded; acknowledging reloads the view.
    ReferentialEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Accept,
    Decline,
}

/// A prompt as rendered: a title plus one or two labelled actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub title: &'static str,
    pub accept_label: &'static str,
    pub decline_label: Option<&'static str>,
}

impl PromptKind {
    pub fn prompt(self) -> Prompt {
        let (title, accept_label, decline_label) = match self {
            PromptKind::ConfirmImport => (
                "Valid file, proceed with import?",
                "Start import",
                Some("Cancel import"),
            ),
            PromptKind::InvalidFile => ("Invalid file", "Close", None),
            PromptKind::Imported => ("Format referential imported", "Close", None),
            PromptKind::AlreadyExists => ("Format referential already exists", "Close", None),
            PromptKind::ReferentialEmpty => ("Format referential now empty", "Close", None),
        };
        Prompt {
            kind: self,
            title,
            accept_label,
            decline_label,
        }
    }
}
