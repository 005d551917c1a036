mod state;
mod ui;
mod worker;

use crate::config::ConsoleConfig;
use crate::lifecycle::{
    load_field_config, load_translations, LifecycleFieldConfig, LifecycleView, Translations,
};
use crate::upload::PromptChoice;
use eframe::{egui, App};
use state::ConsoleState;
use std::path::PathBuf;
use std::sync::mpsc::{self as std_mpsc, Sender};
use tracing::{info, warn};
use worker::Command;

pub struct ReferentialConsole {
    state: ConsoleState,
    commands: Sender<Command>,
    field_config: LifecycleFieldConfig,
    translations: Translations,
}

impl ReferentialConsole {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ConsoleConfig) -> Self {
        info!(server = %config.server_url, "initializing format referential console");

        let field_config = load_field_config(config.lifecycle_fields.as_deref());
        let translations = load_translations(config.translations.as_deref());

        let (command_sender, command_receiver) = std_mpsc::channel();
        let (event_sender, event_receiver) = std_mpsc::channel();
        let (update_sender, update_receiver) = std_mpsc::channel();
        worker::spawn(
            config,
            cc.egui_ctx.clone(),
            command_receiver,
            event_sender,
            update_sender,
        );

        let state = ConsoleState {
            event_receiver: Some(event_receiver),
            update_receiver: Some(update_receiver),
            ..ConsoleState::default()
        };

        Self {
            state,
            commands: command_sender,
            field_config,
            translations,
        }
    }

    fn send(&mut self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("console worker is gone");
            self.state.error = Some(
                crate::error::ConsoleError::Io("background worker stopped".to_string())
                    .to_presentation(),
            );
        }
    }

    pub fn choose_file(&mut self, path: PathBuf) {
        self.send(Command::SelectFile(path));
    }

    pub fn submit(&mut self) {
        self.state.error = None;
        self.send(Command::Submit);
    }

    pub fn answer(&mut self, choice: PromptChoice) {
        self.state.prompt = None;
        self.send(Command::Answer(choice));
    }

    pub fn delete_referential(&mut self) {
        self.state.error = None;
        self.send(Command::Delete);
    }

    pub fn reload(&mut self) {
        self.send(Command::Reload);
    }

    /// Opens the lifecycle view for the entered id and fetches its events.
    pub fn open_lifecycle(&mut self) {
        let id = self.state.lifecycle_id.trim().to_string();
        if id.is_empty() {
            return;
        }
        let kind = self.state.lifecycle_kind;
        let view = LifecycleView::new(kind, id.clone(), self.state.lifecycle_title.trim())
            .with_columns(&self.field_config, &self.translations);
        self.state.lifecycle = Some(view);
        self.send(Command::FetchLifecycle { kind, id });
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        let mut had_updates = false;

        if let Some(receiver) = &self.state.event_receiver {
            let events: Vec<_> = receiver.try_iter().collect();
            had_updates |= !events.is_empty();
            for event in events {
                self.state.apply_event(event);
            }
        }

        if let Some(receiver) = &self.state.update_receiver {
            let updates: Vec<_> = receiver.try_iter().collect();
            had_updates |= !updates.is_empty();
            for update in updates {
                self.state.apply_update(update);
            }
        }

        if had_updates {
            ctx.request_repaint();
        }
    }
}

impl App for ReferentialConsole {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
