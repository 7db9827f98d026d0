// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the playback controller, the annotation store and
//! the ephemeral UI state, wires the panels together and dispatches
//! the action enums the UI components return.

use crate::config::{AppConfig, BackendConfig};
use crate::models::filter::FilterState;
use crate::playback::element::ClockElement;
use crate::playback::PlaybackController;
use crate::store::backend::PersistenceBackend;
use crate::store::local::LocalBackend;
use crate::store::remote::RemoteBackend;
use crate::store::AnnotationStore;
use crate::ui::annotation_form::{self, AnnotationForm, FormAction};
use crate::ui::controls::{self, ControlsAction};
use crate::ui::filter_bar::{self, FilterAction};
use crate::ui::marker_list::{self, EditDraft, MarkerListAction};
use crate::ui::timeline::{self, TimelineAction};
use crate::util::time::format_time;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

const VIDEO_SURFACE_HEIGHT: f32 = 240.0;

/// Main application state.
pub struct CourtsideApp {
    config: AppConfig,

    /// Playback controller wrapping the attached media element
    playback: PlaybackController,

    /// Annotation collection and its backend synchronization
    store: AnnotationStore,

    /// Active category / event-type filters
    filter: FilterState,

    /// Pending add-annotation form selections
    form: AnnotationForm,

    /// In-progress marker edit, if any
    editing: Option<EditDraft>,

    /// Marker last clicked on the timeline
    selected_marker: Option<Uuid>,

    /// Import/export failure shown in the error line
    io_error: Option<String>,
}

impl CourtsideApp {
    pub fn new(config: AppConfig) -> Self {
        let backend: Arc<dyn PersistenceBackend> = match &config.backend {
            BackendConfig::Local { path } => {
                log::info!("Using local marker file {}", path.display());
                Arc::new(LocalBackend::new(path.clone()))
            }
            BackendConfig::Remote { base_url, api_key } => {
                log::info!("Using remote annotation store at {}", base_url);
                Arc::new(RemoteBackend::new(base_url.clone(), api_key.clone()))
            }
        };

        let mut store = AnnotationStore::new(backend);
        store.load();

        let mut playback = PlaybackController::new();
        playback.attach(Box::new(ClockElement::new(config.duration_seconds)));

        let form = AnnotationForm::new(&config.taxonomy);

        Self {
            config,
            playback,
            store,
            filter: FilterState::default(),
            form,
            editing: None,
            selected_marker: None,
            io_error: None,
        }
    }

    /// Build a draft from the form at the current playback time and
    /// hand it to the store.
    fn submit_annotation(&mut self) {
        let state = self.playback.state();
        let time = state.current_time.clamp(0.0, state.duration.max(0.0));
        let draft = self.form.draft(time);
        match self.store.add(draft) {
            Ok(()) => {
                // Only the note field resets; selectors keep their values
                // for rapid repeat tagging.
                self.form.note.clear();
            }
            Err(e) => {
                log::error!("Rejected annotation: {}", e);
                self.io_error = Some(e.to_string());
            }
        }
    }

    /// Export the full marker collection to a file chosen by extension.
    fn export_markers(&mut self, path: PathBuf) {
        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => {
                crate::io::serialization::export_yaml(self.store.annotations(), &path)
            }
            Some("json") => crate::io::serialization::export_json(self.store.annotations(), &path),
            _ => {
                log::error!("Unsupported file extension: {:?}", extension);
                return;
            }
        };

        match result {
            Ok(_) => log::info!("Exported markers to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export markers: {}", e);
                self.io_error = Some(e.to_string());
            }
        }
    }

    /// Import a marker collection, replacing the current one. All or
    /// nothing: a parse failure or rejected snapshot leaves the
    /// existing collection untouched.
    fn import_markers(&mut self, path: PathBuf) {
        let extension = path.extension().and_then(|s| s.to_str());
        let parsed = match extension {
            Some("yaml") | Some("yml") => crate::io::serialization::import_yaml(&path),
            Some("json") => crate::io::serialization::import_json(&path),
            _ => {
                log::error!("Unsupported file extension: {:?}", extension);
                return;
            }
        };

        match parsed {
            Ok(annotations) => {
                let count = annotations.len();
                match self.store.replace_all(annotations) {
                    Ok(()) => log::info!("Imported {} markers from {}", count, path.display()),
                    Err(e) => {
                        log::error!("Failed to apply imported markers: {}", e);
                        self.io_error = Some(e.to_string());
                    }
                }
            }
            Err(e) => {
                log::error!("Failed to import markers: {}", e);
                self.io_error = Some(format!("Import failed: {}", e));
            }
        }
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let snapshot = self.store.supports_snapshot();
                    ui.add_enabled_ui(snapshot, |ui| {
                        if ui.button("Import Markers...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("Markers", &["json", "yaml", "yml"])
                                .pick_file()
                            {
                                self.import_markers(path);
                            }
                            ui.close_menu();
                        }
                        ui.menu_button("Export Markers", |ui| {
                            if ui.button("Export as JSON...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("markers.json")
                                    .save_file()
                                {
                                    self.export_markers(path);
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export as YAML...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("YAML", &["yaml", "yml"])
                                    .set_file_name("markers.yaml")
                                    .save_file()
                                {
                                    self.export_markers(path);
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Reload Annotations").clicked() {
                        self.store.load();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }

    /// Placeholder video surface: the match clock and a large overlay
    /// play button while paused. Returns true when the overlay was
    /// clicked.
    fn show_video_surface(&self, ui: &mut egui::Ui) -> bool {
        let state = self.playback.state();
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), VIDEO_SURFACE_HEIGHT),
            egui::Sense::hover(),
        );

        ui.painter()
            .rect_filled(rect, egui::Rounding::same(8.0), egui::Color32::from_gray(18));
        ui.painter().text(
            rect.center() - egui::vec2(0.0, 24.0),
            egui::Align2::CENTER_CENTER,
            format_time(state.current_time),
            egui::FontId::monospace(44.0),
            egui::Color32::from_gray(210),
        );

        let mut toggled = false;
        if !state.playing {
            let button_rect =
                egui::Rect::from_center_size(rect.center() + egui::vec2(0.0, 48.0), egui::vec2(80.0, 40.0));
            if ui
                .put(button_rect, egui::Button::new(egui::RichText::new("▶").size(24.0)))
                .clicked()
            {
                toggled = true;
            }
        }
        toggled
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.playback.toggle_play();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
            self.playback.skip(-5.0);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
            self.playback.skip(5.0);
        }
    }
}

impl eframe::App for CourtsideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.playback.poll();
        self.store.poll();

        self.show_menu_bar(ctx);
        self.handle_keys(ctx);

        // Filter bar, with the store error line on the right.
        let filter_action = egui::TopBottomPanel::top("filter_bar")
            .show(ctx, |ui| {
                let action = filter_bar::show(
                    ui,
                    &mut self.filter,
                    self.store.annotations(),
                    &self.config.taxonomy.event_types,
                );
                let error = self
                    .io_error
                    .clone()
                    .or_else(|| self.store.last_error().map(str::to_string));
                if let Some(error) = error {
                    ui.horizontal(|ui| {
                        ui.colored_label(egui::Color32::LIGHT_RED, error);
                        if ui.small_button("Dismiss").clicked() {
                            self.io_error = None;
                            self.store.clear_error();
                        }
                    });
                }
                action
            })
            .inner;

        // Named cross-component reaction: a concrete event-type filter
        // is mirrored into the form's pending event type while the
        // form is on the Event category.
        if let FilterAction::EventTypeChanged(ty) = filter_action {
            if self.form.category == crate::models::annotation::Category::Event {
                self.form.event_type = ty;
            }
        }

        let visible = self.filter.visible(self.store.annotations());

        let (form_action, list_action) = egui::SidePanel::right("annotations")
            .default_width(300.0)
            .show(ctx, |ui| {
                let form_action = annotation_form::show(
                    ui,
                    &mut self.form,
                    &self.config.taxonomy,
                    self.playback.state().current_time,
                );
                ui.separator();
                if self.store.is_loading() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading annotations...");
                    });
                }
                let list_action = marker_list::show(
                    ui,
                    &visible,
                    &mut self.editing,
                    self.selected_marker,
                    &self.config.taxonomy,
                );
                (form_action, list_action)
            })
            .inner;

        let (overlay_toggled, controls_action, timeline_action) = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let overlay_toggled = self.show_video_surface(ui);
                ui.add_space(8.0);
                let controls_action = controls::show(ui, self.playback.state());
                ui.add_space(8.0);
                let timeline_action = timeline::show(ui, self.playback.state(), &visible);
                (overlay_toggled, controls_action, timeline_action)
            })
            .inner;

        drop(visible);

        if overlay_toggled {
            self.playback.toggle_play();
        }

        match controls_action {
            ControlsAction::TogglePlay => self.playback.toggle_play(),
            ControlsAction::Skip(delta) => self.playback.skip(delta),
            ControlsAction::SetRate(rate) => self.playback.set_rate(rate),
            ControlsAction::SetVolume(volume) => self.playback.set_volume(volume),
            ControlsAction::None => {}
        }

        match timeline_action {
            TimelineAction::Seek(time) => self.playback.seek_to(time),
            TimelineAction::MarkerClicked(id) => {
                self.selected_marker = Some(id);
                log::info!("Selected marker {}", id);
            }
            TimelineAction::None => {}
        }

        match form_action {
            FormAction::Submit => self.submit_annotation(),
            FormAction::None => {}
        }

        match list_action {
            MarkerListAction::Jump(time) => self.playback.seek_to(time),
            MarkerListAction::Delete(id) => {
                self.store.remove(id);
                if self.selected_marker == Some(id) {
                    self.selected_marker = None;
                }
                log::info!("Deleted annotation {}", id);
            }
            MarkerListAction::CommitEdit(id, patch) => {
                self.store.edit(id, patch);
                log::info!("Edited annotation {}", id);
            }
            MarkerListAction::None => {}
        }

        // Keep the clock and pending backend calls moving.
        if self.playback.state().playing {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }
    }
}
