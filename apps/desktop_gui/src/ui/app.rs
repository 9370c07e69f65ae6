use std::{collections::HashMap, fs, time::Duration};

use client_core::{MapError, MapSession};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    catalog,
    domain::{MapId, StyleCategory, StyleDescriptor},
};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{events::UiEvent, orchestration::dispatch_backend_command},
    media::PreviewImage,
    ui::{
        map_view::{show_canvas, CanvasInput},
        style_picker::show_style_picker,
    },
};

const THUMBNAIL_SIZE: f32 = 32.0;
const AI_DISCLAIMER: &str = "Note: These maps are AI-generated and inspired by real city topology. \
While they aim for accuracy, they remain artistic interpretations and may not be 100% faithful \
to the real-world terrain.";

pub struct MapMakerApp {
    session: MapSession,
    city_input: String,
    active_category: StyleCategory,
    selected_style_id: &'static str,
    textures: HashMap<MapId, egui::TextureHandle>,
    status: String,
    backend_ready: bool,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

impl MapMakerApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let default_style = catalog::default_style();
        Self {
            session: MapSession::new(),
            city_input: String::new(),
            active_category: default_style.category,
            selected_style_id: default_style.id,
            textures: HashMap::new(),
            status: String::new(),
            backend_ready: true,
            cmd_tx,
            ui_rx,
        }
    }

    fn selected_style(&self) -> &'static StyleDescriptor {
        catalog::find(self.selected_style_id).unwrap_or_else(catalog::default_style)
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::BackendUnavailable(message) => {
                    self.backend_ready = false;
                    self.status = message;
                }
                UiEvent::GenerationFinished {
                    ticket,
                    outcome,
                    preview,
                } => {
                    if let Ok(map) = self.session.complete_generation(ticket, outcome) {
                        match preview {
                            Some(preview) => self.upload_texture(ctx, map.id, preview),
                            None => {
                                self.status = "Map received but it could not be displayed.".into()
                            }
                        }
                    }
                    self.prune_textures();
                }
            }
        }
    }

    fn upload_texture(&mut self, ctx: &egui::Context, id: MapId, preview: PreviewImage) {
        let color_image = egui::ColorImage::from_rgba_unmultiplied(preview.size, &preview.rgba);
        let texture = ctx.load_texture(
            format!("generated-map:{id}"),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        self.textures.insert(id, texture);
    }

    /// Drops textures for maps that fell out of history.
    fn prune_textures(&mut self) {
        let history = self.session.history();
        self.textures.retain(|id, _| history.get(*id).is_some());
    }

    fn trigger_generate(&mut self) {
        let style = self.selected_style();
        let ticket = match self.session.begin_generation(&self.city_input, style) {
            Ok(ticket) => ticket,
            Err(MapError::Busy) => return,
            Err(err) => {
                tracing::debug!("generation not started: {err}");
                return;
            }
        };

        let cmd = BackendCommand::Generate {
            ticket,
            city_name: self.city_input.trim().to_string(),
            style,
        };
        if let Err(BackendCommand::Generate { ticket, .. }) =
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status)
        {
            let _ = self
                .session
                .complete_generation(ticket, Err(MapError::transport(self.status.clone())));
        }
    }

    fn save_current_map(&mut self) {
        let Some(export) = self.session.download() else {
            return;
        };
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&export.file_name)
            .add_filter("PNG image", &["png"])
            .save_file()
        {
            match fs::write(&path, &export.bytes) {
                Ok(()) => self.status = format!("Saved map to {}", path.display()),
                Err(err) => self.status = format!("Failed to save map: {err}"),
            }
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("MAP MAKER").strong().italics());
                ui.separator();

                let busy = self.session.is_busy();
                let input = ui.add(
                    egui::TextEdit::singleline(&mut self.city_input)
                        .hint_text("Search city...")
                        .desired_width(280.0),
                );
                let submitted =
                    input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                let generate = ui.add_enabled(
                    !busy && self.backend_ready,
                    egui::Button::new(if busy { "Generating..." } else { "Generate" }),
                );
                if busy {
                    ui.spinner();
                }
                if generate.clicked() || submitted {
                    self.trigger_generate();
                }
            });
            ui.add_space(2.0);
            if show_style_picker(ui, &mut self.active_category, &mut self.selected_style_id) {
                self.session.clear_error();
            }
            ui.add_space(4.0);
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(error) = self.session.last_error() {
                    ui.colored_label(ui.visuals().error_fg_color, &error.message);
                    if ui.small_button("Dismiss").clicked() {
                        self.session.clear_error();
                    }
                } else if !self.status.is_empty() {
                    ui.label(&self.status);
                }
            });
        });
    }

    fn show_map_area(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let busy = self.session.is_busy();
            let current = self.session.current().cloned();
            let texture = current
                .as_ref()
                .and_then(|map| self.textures.get(&map.id))
                .filter(|_| !busy);
            let interactive = current.is_some() && !busy;

            let (canvas, inputs) =
                show_canvas(ui, texture, self.session.viewport().transform(), interactive);
            for input in inputs {
                match input {
                    CanvasInput::DragStart(p) => self.session.begin_drag(p),
                    CanvasInput::DragMove(p) => self.session.continue_drag(p),
                    CanvasInput::DragEnd => self.session.end_drag(),
                    CanvasInput::Wheel(delta_y) => self.session.wheel(delta_y),
                }
            }

            let painter = ui.painter_at(canvas);
            if let Some(message) = self.session.loading_message() {
                painter.text(
                    canvas.center(),
                    egui::Align2::CENTER_CENTER,
                    message.to_uppercase(),
                    egui::FontId::proportional(18.0),
                    ui.visuals().strong_text_color(),
                );
                if let Some((city, style)) = self.session.pending_request() {
                    painter.text(
                        canvas.center() + egui::vec2(0.0, 28.0),
                        egui::Align2::CENTER_CENTER,
                        format!("{city} · {} {}", style.icon, style.name),
                        egui::FontId::proportional(14.0),
                        ui.visuals().weak_text_color(),
                    );
                }
                return;
            }

            let Some(map) = current else {
                painter.text(
                    canvas.center(),
                    egui::Align2::CENTER_CENTER,
                    "CARTOGRAPHY STUDIO\nEnter a city to generate its artistic metropolitan grid.",
                    egui::FontId::proportional(16.0),
                    ui.visuals().weak_text_color(),
                );
                return;
            };

            let controls = egui::Rect::from_min_size(
                canvas.right_top() + egui::vec2(-48.0, 12.0),
                egui::vec2(36.0, 100.0),
            );
            ui.scope_builder(egui::UiBuilder::new().max_rect(controls), |ui| {
                if ui.button("+").on_hover_text("Zoom in").clicked() {
                    self.session.zoom_in();
                }
                if ui.button("-").on_hover_text("Zoom out").clicked() {
                    self.session.zoom_out();
                }
                if ui.button("⟲").on_hover_text("Reset view").clicked() {
                    self.session.reset_view();
                }
            });

            let caption = egui::Rect::from_min_size(
                canvas.left_bottom() + egui::vec2(12.0, -150.0),
                egui::vec2(320.0, 138.0),
            );
            ui.scope_builder(egui::UiBuilder::new().max_rect(caption), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(&map.city_name).heading().strong());
                    ui.label(format!("{} {}", map.style.icon, map.style.name));
                    ui.separator();
                    ui.label(egui::RichText::new(AI_DISCLAIMER).small().italics());
                });
            });

            let actions = egui::Rect::from_min_size(
                canvas.right_bottom() + egui::vec2(-232.0, -84.0),
                egui::vec2(220.0, 72.0),
            );
            let mut selected: Option<MapId> = None;
            ui.scope_builder(egui::UiBuilder::new().max_rect(actions), |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    if ui.button("⬇ Download").clicked() {
                        self.save_current_map();
                    }
                    ui.horizontal(|ui| {
                        for entry in self.session.history_thumbnails() {
                            let Some(texture) = self.textures.get(&entry.id) else {
                                continue;
                            };
                            let thumb = egui::Image::new((
                                texture.id(),
                                egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE),
                            ));
                            let hover = format!("{} · {}", entry.city_name, entry.style.name);
                            if ui
                                .add(egui::Button::image(thumb))
                                .on_hover_text(hover)
                                .clicked()
                            {
                                selected = Some(entry.id);
                            }
                        }
                    });
                });
            });
            if let Some(id) = selected {
                self.session.select_from_history(id);
            }
        });
    }
}

impl eframe::App for MapMakerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_map_area(ctx);

        if self.session.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(250));
        } else {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }
}
