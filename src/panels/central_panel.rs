use egui::{Color32, Pos2, Rect, Response, Sense};

use crate::app::RedactApp;
use crate::geometry::viewport::{fit_rect, screen_to_source, source_per_point};
use crate::renderer::LiveSelection;
use crate::texture_manager::RenderKey;
use crate::tools::{SelectionState, Tool};

pub fn central_panel(app: &mut RedactApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(size) = app.store.source().map(|source| [source.width(), source.height()]) else {
            empty_state(app, ui);
            return;
        };

        let canvas = fit_rect(ui.available_rect_before_wrap(), size);
        let response = ui.allocate_rect(canvas, Sense::drag());
        handle_pointer(app, ui, &response, canvas, size);

        let live = app.select_tool.live_rect().map(|rect| LiveSelection {
            rect,
            source_per_point: source_per_point(canvas, size),
        });
        let key = RenderKey {
            version: app.store.version(),
            live,
        };

        let RedactApp {
            store,
            renderer,
            textures,
            ..
        } = app;
        let Some(source) = store.source() else {
            return;
        };
        let texture = textures.get_or_update(key, ctx, || {
            renderer.render(source, store.history(), live.as_ref())
        });

        match texture {
            Ok(id) => {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                ui.painter().image(id, canvas, uv, Color32::WHITE);
            }
            Err(err) => log::error!("Failed to show image: {}", err),
        }
    });
}

/// Feed drag events to the selection tool and dispatch whatever it commits
fn handle_pointer(app: &mut RedactApp, ui: &egui::Ui, response: &Response, canvas: Rect, size: [u32; 2]) {
    let to_source = |pos: Pos2| screen_to_source(pos.clamp(canvas.min, canvas.max), canvas, size);

    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.select_tool.cancel();
    }

    let mut command = None;
    if response.drag_started() {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        if let Some(pos) = origin {
            command = app.select_tool.on_pointer_down(to_source(pos), &app.store);
        }
    }

    if response.dragged() && app.select_tool.is_dragging() {
        if let Some(pos) = response.interact_pointer_pos() {
            command = if canvas.contains(pos) {
                app.select_tool.on_pointer_move(to_source(pos), &app.store)
            } else {
                // Leaving the canvas ends the gesture
                app.select_tool.on_pointer_up(to_source(pos), &app.store)
            };
        }
    }

    if response.drag_stopped() {
        let last = match app.select_tool.state() {
            SelectionState::Dragging { current, .. } => Some(current),
            SelectionState::Idle => None,
        };
        if let Some(pos) = response.interact_pointer_pos().map(to_source).or(last) {
            command = app.select_tool.on_pointer_up(pos, &app.store);
        }
    }

    if let Some(command) = command {
        let _ = app.dispatch(command);
    }
}

fn empty_state(app: &mut RedactApp, ui: &mut egui::Ui) {
    let limit_mb = app.store.config().max_source_bytes / (1024 * 1024);

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);

        if app.is_loading() {
            ui.spinner();
            ui.label("Decoding image…");
            return;
        }

        ui.heading("Drop an image here");
        ui.label(format!("JPEG, PNG and other common formats, up to {} MB", limit_mb));
        ui.add_space(12.0);

        #[cfg(not(target_arch = "wasm32"))]
        ui.horizontal(|ui| {
            let field = ui.add(egui::TextEdit::singleline(&mut app.open_path).hint_text("/path/to/image.png"));
            let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Open").clicked() || submitted {
                app.open_typed_path();
            }
        });
    });
}
