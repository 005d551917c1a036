use super::worker::WorkerUpdate;
use crate::error::ErrorPresentation;
use crate::lifecycle::{LifecycleType, LifecycleView};
use crate::upload::{Prompt, UploadTarget, WorkflowEvent, WorkflowPhase};
use std::sync::mpsc::Receiver;

const MAX_ACTIVITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
}

/// UI-side mirror of the worker state, updated from its channels.
pub struct ConsoleState {
    pub phase: WorkflowPhase,
    pub selected_file: Option<SelectedFile>,
    pub prompt: Option<Prompt>,
    pub busy: bool,
    pub error: Option<ErrorPresentation>,
    pub activity: Vec<String>,
    pub show_activity: bool,
    pub lifecycle_kind: LifecycleType,
    pub lifecycle_id: String,
    pub lifecycle_title: String,
    pub lifecycle: Option<LifecycleView>,
    pub event_receiver: Option<Receiver<WorkflowEvent>>,
    pub update_receiver: Option<Receiver<WorkerUpdate>>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            phase: WorkflowPhase::Idle,
            selected_file: None,
            prompt: None,
            busy: false,
            error: None,
            activity: Vec::new(),
            show_activity: false,
            lifecycle_kind: LifecycleType::Unit,
            lifecycle_id: String::new(),
            lifecycle_title: String::new(),
            lifecycle: None,
            event_receiver: None,
            update_receiver: None,
        }
    }
}

impl ConsoleState {
    pub fn apply_event(&mut self, event: WorkflowEvent) {
        match event {
            WorkflowEvent::PhaseChanged { from, to } => {
                self.phase = to;
                self.log(format!("{:?} → {:?}", from, to));
            }
            WorkflowEvent::Selected { file_name, size } => {
                self.error = None;
                self.log(format!("Selected {}", file_name));
                self.selected_file = Some(SelectedFile {
                    name: file_name,
                    size,
                });
            }
            WorkflowEvent::Dispatched { target, file_name } => {
                let endpoint = match target {
                    UploadTarget::Check => "check",
                    UploadTarget::Commit => "import",
                };
                self.log(format!("Sent {} to {}", file_name, endpoint));
            }
            WorkflowEvent::Prompt(prompt) => {
                self.log(prompt.title.to_string());
                self.prompt = Some(prompt);
            }
            WorkflowEvent::ViewReloaded => {
                self.selected_file = None;
                self.error = None;
                self.log("View reloaded".to_string());
            }
        }
    }

    pub fn apply_update(&mut self, update: WorkerUpdate) {
        match update {
            WorkerUpdate::Busy(busy) => self.busy = busy,
            WorkerUpdate::Error(err) => self.error = Some(err.to_presentation()),
            WorkerUpdate::Lifecycle { kind, id, result } => {
                if let Some(view) = self.lifecycle.as_mut() {
                    if view.kind == kind && view.id == id {
                        view.apply(result);
                    }
                }
            }
        }
    }

    /// Check is offered only from Idle with a file and no open dialog.
    pub fn can_submit(&self) -> bool {
        self.phase == WorkflowPhase::Idle
            && self.selected_file.is_some()
            && self.prompt.is_none()
            && !self.busy
    }

    pub fn can_delete(&self) -> bool {
        self.prompt.is_none() && !self.busy
    }

    /// Reload is held back while a dialog is open so it cannot race the answer.
    pub fn can_reload(&self) -> bool {
        self.prompt.is_none() && !self.busy
    }

    pub fn phase_text(&self) -> &'static str {
        match self.phase {
            WorkflowPhase::Idle => "Ready",
            WorkflowPhase::Checking => "Checking file…",
            WorkflowPhase::AwaitingConfirmation => "Waiting for confirmation",
            WorkflowPhase::Committing => "Importing…",
            WorkflowPhase::Deleting => "Deleting referential…",
            WorkflowPhase::Done => "Import complete",
            WorkflowPhase::Rejected => "File rejected",
        }
    }

    fn log(&mut self, line: String) {
        self.activity.push(line);
        if self.activity.len() > MAX_ACTIVITY {
            self.activity.remove(0);
        }
    }
}
