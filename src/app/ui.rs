use super::ReferentialConsole;
use crate::lifecycle::{LifecycleType, LifecycleView};
use crate::upload::{format_size, PromptChoice};
use eframe::egui::{self, Align, Color32, RichText};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const ERROR_RED: Color32 = Color32::from_rgb(220, 50, 50);
const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

impl ReferentialConsole {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let footer_height = 40.0;
            let content_height = ui.available_height() - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Format Referential");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Check, import or delete the file format referential")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_upload(ui);

                    ui.add_space(20.0);
                    ui.separator();
                    ui.add_space(10.0);
                    self.render_lifecycle(ui);

                    ui.add_space(10.0);
                    self.render_activity(ui);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(10.0);
                self.render_footer(ui);
            });
        });

        self.render_prompt(ctx);
    }

    fn render_upload(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                let can_choose = self.state.prompt.is_none() && !self.state.busy;
                if ui
                    .add_enabled(can_choose, egui::Button::new("📁 Select File"))
                    .clicked()
                {
                    if let Some(path) = FileDialog::new()
                        .add_filter("Referential", &["xml"])
                        .pick_file()
                    {
                        self.choose_file(path);
                    }
                }
                match &self.state.selected_file {
                    Some(file) => {
                        ui.label(format!("Selected: {} ({})", file.name, format_size(file.size)));
                    }
                    None => {
                        ui.label("No file selected");
                    }
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Status:");
                ui.colored_label(ACCENT, self.state.phase_text());
                if self.state.busy {
                    ui.spinner();
                }
            });
        });

        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            let check = egui::Button::new("✔ Check File").min_size(egui::vec2(200.0, 40.0));
            if ui.add_enabled(self.state.can_submit(), check).clicked() {
                self.submit();
            }

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        self.state.can_delete(),
                        egui::Button::new("🗑 Delete Referential"),
                    )
                    .clicked()
                {
                    self.delete_referential();
                }
                if ui
                    .add_enabled(
                        self.state.can_reload(),
                        egui::Button::new("🔄 Reload"),
                    )
                    .clicked()
                {
                    self.reload();
                }
            });
        });
    }

    fn render_lifecycle(&mut self, ui: &mut egui::Ui) {
        ui.heading("Lifecycle");
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            egui::ComboBox::from_id_source("lifecycle_kind")
                .selected_text(self.state.lifecycle_kind.display())
                .show_ui(ui, |ui| {
                    for kind in [LifecycleType::Unit, LifecycleType::ObjectGroup] {
                        ui.selectable_value(&mut self.state.lifecycle_kind, kind, kind.display());
                    }
                });
            ui.add(
                egui::TextEdit::singleline(&mut self.state.lifecycle_id)
                    .hint_text("Identifier")
                    .desired_width(220.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.state.lifecycle_title)
                    .hint_text("Title")
                    .desired_width(160.0),
            );
            let can_fetch = !self.state.busy && !self.state.lifecycle_id.trim().is_empty();
            if ui
                .add_enabled(can_fetch, egui::Button::new("🔍 Show"))
                .clicked()
            {
                self.open_lifecycle();
            }
        });

        if let Some(view) = self.state.lifecycle.as_mut() {
            ui.add_space(10.0);
            render_lifecycle_view(ui, view);
        }
    }

    fn render_activity(&mut self, ui: &mut egui::Ui) {
        if self.state.activity.is_empty() {
            return;
        }
        if ui
            .button(if self.state.show_activity {
                "Hide Activity"
            } else {
                "Show Activity"
            })
            .clicked()
        {
            self.state.show_activity = !self.state.show_activity;
        }

        if self.state.show_activity {
            egui::ScrollArea::vertical()
                .id_source("activity")
                .max_height(150.0)
                .show(ui, |ui| {
                    egui::Frame::none()
                        .fill(ui.style().visuals.extreme_bg_color)
                        .show(ui, |ui| {
                            for line in &self.state.activity {
                                ui.label(RichText::new(line).monospace());
                            }
                        });
                });
        }
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        if let Some(error) = &self.state.error {
            ui.vertical_centered(|ui| {
                ui.colored_label(ERROR_RED, format!("{}: {}", error.title, error.message));
                if let Some(action) = &error.action {
                    ui.label(RichText::new(action).small());
                }
            });
        }
    }

    fn render_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.state.prompt.clone() else {
            return;
        };

        let mut choice = None;
        egui::Window::new(prompt.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button(prompt.accept_label).clicked() {
                        choice = Some(PromptChoice::Accept);
                    }
                    if let Some(decline) = prompt.decline_label {
                        if ui.button(decline).clicked() {
                            choice = Some(PromptChoice::Decline);
                        }
                    }
                });
            });

        if let Some(choice) = choice {
            self.answer(choice);
        }
    }
}

fn render_lifecycle_view(ui: &mut egui::Ui, view: &mut LifecycleView) {
    ui.label(format!(
        "{} {} {}",
        view.kind.display(),
        view.id,
        if view.title.is_empty() {
            String::new()
        } else {
            format!("– {}", view.title)
        }
    ));

    if !view.is_loaded() {
        ui.spinner();
        return;
    }
    if !view.show_result() {
        ui.colored_label(ERROR_RED, "No lifecycle found for this identifier");
        return;
    }

    if !view.custom_fields.is_empty() {
        let custom: Vec<(String, String, bool)> = view
            .custom_fields
            .iter()
            .map(|c| (c.id.clone(), c.label.clone(), view.selected_custom.contains(&c.id)))
            .collect();
        ui.horizontal_wrapped(|ui| {
            ui.label("Columns:");
            for (id, label, selected) in custom {
                let mut on = selected;
                if ui.checkbox(&mut on, label).changed() {
                    view.toggle_custom(&id);
                }
            }
        });
    }

    let columns: Vec<(String, String)> = view
        .displayed_columns()
        .into_iter()
        .map(|c| (c.id.clone(), c.label.clone()))
        .collect();

    egui::ScrollArea::horizontal()
        .id_source("lifecycle_grid_scroll")
        .show(ui, |ui| {
            egui::Grid::new("lifecycle_grid")
                .striped(true)
                .show(ui, |ui| {
                    for (_, label) in &columns {
                        ui.label(RichText::new(label).strong());
                    }
                    ui.end_row();
                    for event in view.page() {
                        for (id, _) in &columns {
                            ui.label(event.display(id));
                        }
                        ui.end_row();
                    }
                });
        });

    ui.add_space(8.0);
    render_pager(ui, view);
}

fn render_pager(ui: &mut egui::Ui, view: &mut LifecycleView) {
    let total = view.events().len();
    let current = view.pagination.current_page();
    let page_count = view.pagination.page_count(total);
    let visible = view.pagination.visible_pages(total);

    ui.horizontal(|ui| {
        let mut page_size = view.pagination.page_size();
        egui::ComboBox::from_id_source("page_size")
            .selected_text(format!("{} / page", page_size))
            .show_ui(ui, |ui| {
                for size in PAGE_SIZES {
                    ui.selectable_value(&mut page_size, size, size.to_string());
                }
            });
        if page_size != view.pagination.page_size() {
            view.pagination.set_page_size(page_size);
        }

        if ui.add_enabled(current > 1, egui::Button::new("‹")).clicked() {
            view.pagination.set_page(current - 1);
        }
        for page in visible {
            if ui
                .selectable_label(page == current, page.to_string())
                .clicked()
            {
                view.pagination.set_page(page);
            }
        }
        if ui
            .add_enabled(current < page_count, egui::Button::new("›"))
            .clicked()
        {
            view.pagination.set_page(current + 1);
        }

        ui.label(format!("{} events", total));
    });
}
