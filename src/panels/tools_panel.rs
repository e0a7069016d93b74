use egui::{Button, Color32, RichText, Slider};

use crate::app::RedactApp;
use crate::command::{Command, Intensity, OperationHistory, ToolKind};

pub fn tools_panel(app: &mut RedactApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active_tool = app.store.tool();
            for kind in ToolKind::ALL {
                if ui.selectable_label(active_tool == kind, kind.label()).clicked() && active_tool != kind {
                    log::info!("Tool selected from UI: {}", kind.label());
                    let _ = app.dispatch(Command::SetTool(kind));
                }
            }

            let mut intensity = app.store.intensity().get();
            let slider = ui.add(Slider::new(&mut intensity, Intensity::MIN..=Intensity::MAX).text("Intensity"));
            if slider.changed() {
                let _ = app.dispatch(Command::SetIntensity(Intensity::saturating(i64::from(intensity))));
            }
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                if ui.add_enabled(app.store.can_undo(), Button::new("Undo")).clicked() {
                    let _ = app.dispatch(Command::Undo);
                }
                if ui.add_enabled(app.store.can_redo(), Button::new("Redo")).clicked() {
                    let _ = app.dispatch(Command::Redo);
                }
            });

            let has_source = app.store.source().is_some();
            let has_edits = !app.store.history().is_empty();
            ui.add_enabled_ui(has_source, |ui| {
                if ui.button("Change Image").clicked() {
                    app.unload();
                }
                if ui.add_enabled(has_edits, Button::new("Clear All Edits")).clicked() {
                    let _ = app.dispatch(Command::ClearEdits);
                }
                // Export writes to the file system, which the web build doesn't have
                #[cfg(not(target_arch = "wasm32"))]
                if ui.button("Download Result").clicked() {
                    app.download();
                }
                if ui.button("Copy Replay Log").clicked() {
                    app.copy_replay_log(ctx);
                }
            });
            ui.separator();

            history_list(ui, app.store.history());

            if let Some(status) = app.status() {
                ui.separator();
                let color = if status.is_error {
                    Color32::LIGHT_RED
                } else {
                    ui.visuals().text_color()
                };
                ui.label(RichText::new(&status.text).color(color));
            }
        });
}

/// Every operation in the log, with the redo-able tail greyed out
fn history_list(ui: &mut egui::Ui, history: &OperationHistory) {
    let cursor = history
        .cursor()
        .map_or_else(|| "none".to_owned(), |index| (index + 1).to_string());
    ui.label(format!("Operations: {} (at {})", history.len(), cursor));

    egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
        egui::Grid::new("operation_history_grid")
            .num_columns(3)
            .spacing([16.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.strong("#");
                ui.strong("Tool");
                ui.strong("Region");
                ui.end_row();

                let active = history.active().len();
                for (index, op) in history.operations().iter().enumerate() {
                    let style = |text: String| {
                        if index < active {
                            RichText::new(text)
                        } else {
                            RichText::new(text).weak().strikethrough()
                        }
                    };
                    let marker = if history.cursor() == Some(index) { " ▶" } else { "" };
                    let rect = op.rect();

                    ui.label(style(format!("{}{}", index + 1, marker)));
                    ui.label(style(format!("{} {}", op.kind().label(), op.intensity().get())));
                    ui.label(style(format!(
                        "{:.0},{:.0} {:.0}×{:.0}",
                        rect.x, rect.y, rect.width, rect.height
                    )));
                    ui.end_row();
                }
            });
    });
}
