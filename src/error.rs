use crate::upload::WorkflowPhase;
use serde::Serialize;
use thiserror::Error;

/// User-facing presentation of an error, rendered inline by the console.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPresentation {
    pub title: String,
    pub message: String,
    pub action: Option<String>,
}

/// Console-wide error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    // ── Remote ────────────────────────────────────────────────────────────────
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Invalid response shape: {0}")]
    InvalidResponseShape(String),

    // ── Upload slot ───────────────────────────────────────────────────────────
    #[error("Upload slot already holds an unresolved file")]
    QueueFull,

    #[error("No file selected")]
    NoCandidate,

    #[error("{operation} is not allowed while the workflow is {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: WorkflowPhase,
    },

    #[error("No prompt is awaiting an answer")]
    NoPendingPrompt,

    // ── Local ─────────────────────────────────────────────────────────────────
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ConsoleError::TransportFailure(format!("status {}", status.as_u16())),
            None => ConsoleError::TransportFailure(err.to_string()),
        }
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        ConsoleError::Io(err.to_string())
    }
}

impl ConsoleError {
    /// Converts the error into a presentation for the UI.
    /// Raw transport details are never shown.
    pub fn to_presentation(&self) -> ErrorPresentation {
        match self {
            ConsoleError::TransportFailure(_) => ErrorPresentation {
                title: "Server Unreachable".into(),
                message: "The archive server did not accept the request.".into(),
                action: Some("Check the connection and retry".into()),
            },

            ConsoleError::InvalidResponseShape(_) => ErrorPresentation {
                title: "No Result".into(),
                message: "The server answer did not match a single entry.".into(),
                action: None,
            },

            ConsoleError::QueueFull => ErrorPresentation {
                title: "File Already Selected".into(),
                message: "A file is already waiting to be checked or imported.".into(),
                action: Some("Finish or reload before choosing another file".into()),
            },

            ConsoleError::NoCandidate => ErrorPresentation {
                title: "No File".into(),
                message: "Choose a referential file first.".into(),
                action: Some("Select a file".into()),
            },

            ConsoleError::InvalidPhase { operation, .. } => ErrorPresentation {
                title: "Action Unavailable".into(),
                message: format!("Cannot {} right now.", operation),
                action: Some("Wait for the current step to finish".into()),
            },

            ConsoleError::NoPendingPrompt => ErrorPresentation {
                title: "Nothing To Confirm".into(),
                message: "There is no open dialog to answer.".into(),
                action: None,
            },

            ConsoleError::Io(msg) => ErrorPresentation {
                title: "File Unreadable".into(),
                message: format!("The selected file could not be read: {}", msg),
                action: Some("Choose another file".into()),
            },

            ConsoleError::Config(msg) => ErrorPresentation {
                title: "Configuration Error".into(),
                message: msg.clone(),
                action: Some("Fix referential-console.toml and restart".into()),
            },
        }
    }
}
