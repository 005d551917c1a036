//! Check → confirm → import sequencing for a single referential file.
//!
//! The workflow owns one upload slot and one phase. Every remote failure is
//! turned into a prompt; only calls made from the wrong phase (or with an
//! empty slot) come back as errors.

use crate::error::ConsoleError;
use crate::upload::prompt::{Prompt, PromptChoice, PromptKind};
use crate::upload::service::ReferentialService;
use crate::upload::types::{ItemStatus, UploadItem, UploadTarget, WorkflowPhase};
use std::sync::mpsc::Sender;
use tracing::{info, warn};

/// Notifications for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    PhaseChanged {
        from: WorkflowPhase,
        to: WorkflowPhase,
    },
    Selected {
        file_name: String,
        size: u64,
    },
    Dispatched {
        target: UploadTarget,
        file_name: String,
    },
    Prompt(Prompt),
    ViewReloaded,
}

pub struct UploadWorkflow<S> {
    service: S,
    events: Sender<WorkflowEvent>,
    phase: WorkflowPhase,
    slot: Option<UploadItem>,
    pending_prompt: Option<PromptKind>,
    committed: bool,
}

impl<S: ReferentialService> UploadWorkflow<S> {
    pub fn new(service: S, events: Sender<WorkflowEvent>) -> Self {
        Self {
            service,
            events,
            phase: WorkflowPhase::Idle,
            slot: None,
            pending_prompt: None,
            committed: false,
        }
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn current_item(&self) -> Option<&UploadItem> {
        self.slot.as_ref()
    }

    pub fn pending_prompt(&self) -> Option<Prompt> {
        self.pending_prompt.map(PromptKind::prompt)
    }

    /// Set once an import has been dispatched; cleared by a reload.
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Puts a file in the upload slot, replacing a resolved one.
    pub fn select_candidate(&mut self, item: UploadItem) -> Result<(), ConsoleError> {
        if !matches!(self.phase, WorkflowPhase::Idle | WorkflowPhase::Done) {
            warn!(phase = ?self.phase, rejected = %item.file_name, "selection out of phase");
            return Err(ConsoleError::InvalidPhase {
                operation: "select a file",
                phase: self.phase,
            });
        }
        if let Some(current) = &self.slot {
            if !current.status.is_resolved() {
                warn!(held = %current.file_name, rejected = %item.file_name, "upload slot is full");
                return Err(ConsoleError::QueueFull);
            }
        }

        if self.phase == WorkflowPhase::Done {
            self.transition(WorkflowPhase::Idle);
        }

        info!(file = %item.file_name, bytes = item.size(), "file selected");
        self.emit(WorkflowEvent::Selected {
            file_name: item.file_name.clone(),
            size: item.size(),
        });
        self.slot = Some(UploadItem {
            target: UploadTarget::Check,
            status: ItemStatus::Queued,
            ..item
        });
        Ok(())
    }

    /// Sends the selected file to the check endpoint.
    pub async fn submit_for_validation(&mut self) -> Result<(), ConsoleError> {
        self.require_phase("submit for validation", WorkflowPhase::Idle)?;
        if self.slot.is_none() {
            return Err(ConsoleError::NoCandidate);
        }

        self.transition(WorkflowPhase::Checking);
        match self.dispatch(UploadTarget::Check).await {
            Ok(()) => {
                self.set_status(ItemStatus::Queued);
                self.transition(WorkflowPhase::AwaitingConfirmation);
                self.show(PromptKind::ConfirmImport);
            }
            Err(err) => {
                warn!(error = %err, "format check rejected the file");
                self.set_status(ItemStatus::Failed);
                self.transition(WorkflowPhase::Rejected);
                self.show(PromptKind::InvalidFile);
            }
        }
        Ok(())
    }

    /// Re-sends the checked file to the import endpoint.
    pub async fn commit(&mut self) -> Result<(), ConsoleError> {
        self.require_phase("import", WorkflowPhase::AwaitingConfirmation)?;
        if self.slot.is_none() {
            return Err(ConsoleError::NoCandidate);
        }
        self.dismiss(PromptKind::ConfirmImport);

        self.committed = true;
        self.transition(WorkflowPhase::Committing);
        match self.dispatch(UploadTarget::Commit).await {
            Ok(()) => {
                self.set_status(ItemStatus::Succeeded);
                self.transition(WorkflowPhase::Done);
                self.show(PromptKind::Imported);
            }
            Err(err) => {
                // Phase stays Committing and the file stays in the slot until a reload.
                warn!(error = %err, "format import refused");
                self.set_status(ItemStatus::Failed);
                self.show(PromptKind::AlreadyExists);
            }
        }
        Ok(())
    }

    /// Drops the checked file without importing it.
    pub fn cancel(&mut self) -> Result<(), ConsoleError> {
        self.require_phase("cancel the import", WorkflowPhase::AwaitingConfirmation)?;
        self.dismiss(PromptKind::ConfirmImport);
        info!("import canceled");
        self.reload_view();
        Ok(())
    }

    /// Deletes the active referential with a blocking call, then reloads.
    /// The reload happens on both outcomes; only success raises a prompt.
    pub fn delete_active(&mut self) {
        self.transition(WorkflowPhase::Deleting);
        match self.service.delete() {
            Ok(()) => {
                info!("format referential deleted");
                self.show(PromptKind::ReferentialEmpty);
            }
            Err(err) => warn!(error = %err, "format referential delete failed"),
        }
        self.reload_view();
    }

    /// Clears the slot and the committed flag and returns to Idle.
    /// The import confirmation refers to the slot and is dropped with it;
    /// any other pending prompt stays open.
    pub fn reload_view(&mut self) {
        self.dismiss(PromptKind::ConfirmImport);
        self.slot = None;
        self.committed = false;
        self.transition(WorkflowPhase::Idle);
        self.emit(WorkflowEvent::ViewReloaded);
    }

    pub async fn answer_prompt(&mut self, choice: PromptChoice) -> Result<(), ConsoleError> {
        let kind = self.pending_prompt.take().ok_or(ConsoleError::NoPendingPrompt)?;
        match (kind, choice) {
            (PromptKind::ConfirmImport, PromptChoice::Accept) => self.commit().await,
            (PromptKind::ConfirmImport, PromptChoice::Decline) => self.cancel(),
            (PromptKind::InvalidFile | PromptKind::ReferentialEmpty, _) => {
                self.reload_view();
                Ok(())
            }
            (PromptKind::Imported | PromptKind::AlreadyExists, _) => Ok(()),
        }
    }

    async fn dispatch(&mut self, target: UploadTarget) -> Result<(), ConsoleError> {
        let item = match self.slot.as_mut() {
            Some(item) => item,
            None => return Err(ConsoleError::NoCandidate),
        };
        item.target = target;
        item.status = ItemStatus::InFlight;

        info!(file = %item.file_name, ?target, "dispatching");
        let _ = self.events.send(WorkflowEvent::Dispatched {
            target,
            file_name: item.file_name.clone(),
        });
        self.service.send(item).await
    }

    fn require_phase(
        &self,
        operation: &'static str,
        expected: WorkflowPhase,
    ) -> Result<(), ConsoleError> {
        if self.phase != expected {
            warn!(operation, phase = ?self.phase, "operation invoked out of phase");
            return Err(ConsoleError::InvalidPhase {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn set_status(&mut self, status: ItemStatus) {
        if let Some(item) = self.slot.as_mut() {
            item.status = status;
        }
    }

    fn transition(&mut self, to: WorkflowPhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        info!(?from, ?to, "phase changed");
        self.emit(WorkflowEvent::PhaseChanged { from, to });
    }

    fn show(&mut self, kind: PromptKind) {
        self.pending_prompt = Some(kind);
        self.emit(WorkflowEvent::Prompt(kind.prompt()));
    }

    fn dismiss(&mut self, kind: PromptKind) {
        if self.pending_prompt == Some(kind) {
            self.pending_prompt = None;
        }
    }

    fn emit(&self, event: WorkflowEvent) {
        // The UI may already be gone during shutdown.
        let _ = self.events.send(event);
    }
}
