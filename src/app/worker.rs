use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::lifecycle::{HttpLifecycleSource, LifecycleFetcher, LifecycleResult, LifecycleType};
use crate::upload::{
    HttpReferentialService, PromptChoice, UploadItem, UploadWorkflow, WorkflowEvent,
};
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

/// Requests from the UI thread. Handled one at a time, in order.
#[derive(Debug)]
pub enum Command {
    SelectFile(PathBuf),
    Submit,
    Answer(PromptChoice),
    Delete,
    Reload,
    FetchLifecycle { kind: LifecycleType, id: String },
}

#[derive(Debug)]
pub enum WorkerUpdate {
    Busy(bool),
    Error(ConsoleError),
    Lifecycle {
        kind: LifecycleType,
        id: String,
        result: LifecycleResult,
    },
}

/// Starts the background thread that owns the runtime, the upload workflow
/// and the lifecycle fetcher.
pub fn spawn(
    config: ConsoleConfig,
    repaint: egui::Context,
    commands: Receiver<Command>,
    events: Sender<WorkflowEvent>,
    updates: Sender<WorkerUpdate>,
) {
    std::thread::spawn(move || {
        let runtime = match Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = %e, "failed to start async runtime");
                let _ = updates.send(WorkerUpdate::Error(e.into()));
                repaint.request_repaint();
                return;
            }
        };

        // Built outside `block_on`: the service holds a blocking client.
        let service = match config
            .format_endpoints()
            .and_then(HttpReferentialService::new)
        {
            Ok(service) => service,
            Err(e) => {
                error!(error = %e, "failed to build format client");
                let _ = updates.send(WorkerUpdate::Error(e));
                repaint.request_repaint();
                return;
            }
        };
        let source = match HttpLifecycleSource::new(config) {
            Ok(source) => source,
            Err(e) => {
                error!(error = %e, "failed to build lifecycle client");
                let _ = updates.send(WorkerUpdate::Error(e));
                repaint.request_repaint();
                return;
            }
        };

        let mut workflow = UploadWorkflow::new(service, events);
        let fetcher = LifecycleFetcher::new(source);
        info!("console worker ready");

        while let Ok(command) = commands.recv() {
            let _ = updates.send(WorkerUpdate::Busy(true));

            let outcome = match command {
                Command::SelectFile(path) => UploadItem::from_path(&path)
                    .and_then(|item| workflow.select_candidate(item)),
                Command::Submit => runtime.block_on(workflow.submit_for_validation()),
                Command::Answer(choice) => runtime.block_on(workflow.answer_prompt(choice)),
                Command::Delete => {
                    workflow.delete_active();
                    Ok(())
                }
                Command::Reload => {
                    workflow.reload_view();
                    Ok(())
                }
                Command::FetchLifecycle { kind, id } => {
                    let result = runtime.block_on(fetcher.fetch_details(kind, &id));
                    let _ = updates.send(WorkerUpdate::Lifecycle { kind, id, result });
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                warn!(error = %e, "command rejected");
                let _ = updates.send(WorkerUpdate::Error(e));
            }
            debug!(
                phase = ?workflow.phase(),
                committed = workflow.is_committed(),
                prompt = ?workflow.pending_prompt().map(|p| p.kind),
                file = ?workflow.current_item().map(|item| item.file_name.as_str()),
                "command handled"
            );
            let _ = updates.send(WorkerUpdate::Busy(false));
            repaint.request_repaint();
        }

        info!("console worker stopped");
    });
}
