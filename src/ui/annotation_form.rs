// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Add-annotation form.
//!
//! Category radio buttons plus the conditional fields for the chosen
//! category, driven by the injected taxonomy. Submitting builds a
//! draft stamped with the current playback time.

use crate::config::Taxonomy;
use crate::models::annotation::{AnnotationDraft, Category, NOTE_MAX_CHARS};
use crate::util::time::format_time;

/// Pending form selections. Lives in the app between frames.
pub struct AnnotationForm {
    pub category: Category,
    pub player_name: String,
    pub player_action: String,
    pub event_type: String,
    pub note: String,
}

impl AnnotationForm {
    pub fn new(taxonomy: &Taxonomy) -> Self {
        Self {
            category: Category::Player,
            player_name: taxonomy.player_names.first().cloned().unwrap_or_default(),
            player_action: taxonomy.player_actions.first().cloned().unwrap_or_default(),
            event_type: taxonomy.event_types.first().cloned().unwrap_or_default(),
            note: String::new(),
        }
    }

    /// Build the draft for the current selections at the given time.
    pub fn draft(&self, time_seconds: f64) -> AnnotationDraft {
        match self.category {
            Category::Player => AnnotationDraft::player(
                time_seconds,
                self.player_name.clone(),
                self.player_action.clone(),
            ),
            Category::Event => AnnotationDraft::event(time_seconds, self.event_type.clone()),
            Category::Note => AnnotationDraft::note(time_seconds, &self.note),
        }
    }
}

/// Result of form interaction.
pub enum FormAction {
    None,
    Submit,
}

pub fn show(
    ui: &mut egui::Ui,
    form: &mut AnnotationForm,
    taxonomy: &Taxonomy,
    current_time: f64,
) -> FormAction {
    let mut action = FormAction::None;

    ui.heading("New annotation");

    ui.horizontal(|ui| {
        for category in Category::ALL {
            ui.radio_value(&mut form.category, category, category.label());
        }
    });

    ui.label(
        egui::RichText::new(format!("Annotation time: {}", format_time(current_time)))
            .weak(),
    );

    match form.category {
        Category::Player => {
            egui::ComboBox::from_label("Player")
                .selected_text(form.player_name.clone())
                .show_ui(ui, |ui| {
                    for name in &taxonomy.player_names {
                        ui.selectable_value(&mut form.player_name, name.clone(), name);
                    }
                });
            egui::ComboBox::from_label("Action")
                .selected_text(form.player_action.clone())
                .show_ui(ui, |ui| {
                    for act in &taxonomy.player_actions {
                        ui.selectable_value(&mut form.player_action, act.clone(), act);
                    }
                });
        }
        Category::Event => {
            egui::ComboBox::from_label("Event type")
                .selected_text(form.event_type.clone())
                .show_ui(ui, |ui| {
                    for ty in &taxonomy.event_types {
                        ui.selectable_value(&mut form.event_type, ty.clone(), ty);
                    }
                });
        }
        Category::Note => {
            ui.add(
                egui::TextEdit::singleline(&mut form.note)
                    .hint_text("Add a note (max 255 chars)")
                    .char_limit(NOTE_MAX_CHARS)
                    .desired_width(f32::INFINITY),
            );
        }
    }

    if ui.button("Save annotation").clicked() {
        action = FormAction::Submit;
    }

    action
}
