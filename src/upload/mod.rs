mod prompt;
mod service;
mod types;
mod workflow;

pub use prompt::{Prompt, PromptChoice, PromptKind};
pub use service::HttpReferentialService;
pub use types::{format_size, UploadItem, UploadTarget, WorkflowPhase};
pub use workflow::{UploadWorkflow, WorkflowEvent};
