// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Marker list panel.
//!
//! Shows the filtered annotations in time order with jump, in-place
//! edit and delete controls. Edits patch the conditional payload only;
//! the category and timestamp of a persisted marker never change.

use crate::config::Taxonomy;
use crate::models::annotation::{Annotation, AnnotationPatch, Category, NOTE_MAX_CHARS};
use crate::ui::timeline::marker_color;
use crate::util::time::format_time;
use uuid::Uuid;

/// In-progress edit of one marker's payload.
pub struct EditDraft {
    pub id: Uuid,
    pub category: Category,
    pub player_name: String,
    pub player_action: String,
    pub event_type: String,
    pub note: String,
}

impl EditDraft {
    pub fn for_annotation(ann: &Annotation) -> Self {
        Self {
            id: ann.id,
            category: ann.category,
            player_name: ann.player_name.clone().unwrap_or_default(),
            player_action: ann.action.clone().unwrap_or_default(),
            event_type: ann.event_type.clone().unwrap_or_default(),
            note: ann.note.clone().unwrap_or_default(),
        }
    }

    fn patch(&self) -> AnnotationPatch {
        match self.category {
            Category::Player => AnnotationPatch {
                player_name: Some(self.player_name.clone()),
                action: Some(self.player_action.clone()),
                ..Default::default()
            },
            Category::Event => AnnotationPatch {
                event_type: Some(self.event_type.clone()),
                ..Default::default()
            },
            Category::Note => AnnotationPatch {
                note: Some(self.note.clone()),
                ..Default::default()
            },
        }
    }
}

/// Result of marker list interaction.
pub enum MarkerListAction {
    None,
    Jump(f64),
    Delete(Uuid),
    CommitEdit(Uuid, AnnotationPatch),
}

pub fn show(
    ui: &mut egui::Ui,
    markers: &[&Annotation],
    editing: &mut Option<EditDraft>,
    selected: Option<Uuid>,
    taxonomy: &Taxonomy,
) -> MarkerListAction {
    let mut action = MarkerListAction::None;

    ui.heading("Annotations");
    if markers.is_empty() {
        ui.label(egui::RichText::new("No annotations yet").weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for ann in markers {
            let is_editing = editing.as_ref().is_some_and(|e| e.id == ann.id);
            if is_editing {
                let mut commit = false;
                let mut cancel = false;
                if let Some(draft) = editing.as_mut() {
                    show_edit_row(ui, draft, taxonomy, &mut commit, &mut cancel);
                }
                if commit {
                    if let Some(draft) = editing.take() {
                        action = MarkerListAction::CommitEdit(draft.id, draft.patch());
                    }
                } else if cancel {
                    *editing = None;
                }
            } else {
                show_row(ui, ann, selected, editing, &mut action);
            }
            ui.separator();
        }
    });

    action
}

fn show_row(
    ui: &mut egui::Ui,
    ann: &Annotation,
    selected: Option<Uuid>,
    editing: &mut Option<EditDraft>,
    action: &mut MarkerListAction,
) {
    ui.horizontal(|ui| {
        let time_text = egui::RichText::new(format_time(ann.time_seconds)).monospace();
        ui.label(if selected == Some(ann.id) {
            time_text.strong()
        } else {
            time_text.weak()
        });

        let swatch = egui::RichText::new("●").color(marker_color(ann.category));
        ui.label(swatch);

        ui.vertical(|ui| {
            ui.label(egui::RichText::new(ann.category.label()).strong());
            ui.label(egui::RichText::new(ann.summary()).weak());
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                *action = MarkerListAction::Delete(ann.id);
            }
            if ui.small_button("✏").on_hover_text("Edit").clicked() {
                *editing = Some(EditDraft::for_annotation(ann));
            }
            if ui.small_button("⏵").on_hover_text("Jump to time").clicked() {
                *action = MarkerListAction::Jump(ann.time_seconds);
            }
        });
    });
}

fn show_edit_row(
    ui: &mut egui::Ui,
    draft: &mut EditDraft,
    taxonomy: &Taxonomy,
    commit: &mut bool,
    cancel: &mut bool,
) {
    match draft.category {
        Category::Player => {
            egui::ComboBox::from_id_source(("edit_player", draft.id))
                .selected_text(draft.player_name.clone())
                .show_ui(ui, |ui| {
                    for name in &taxonomy.player_names {
                        ui.selectable_value(&mut draft.player_name, name.clone(), name);
                    }
                });
            egui::ComboBox::from_id_source(("edit_action", draft.id))
                .selected_text(draft.player_action.clone())
                .show_ui(ui, |ui| {
                    for act in &taxonomy.player_actions {
                        ui.selectable_value(&mut draft.player_action, act.clone(), act);
                    }
                });
        }
        Category::Event => {
            egui::ComboBox::from_id_source(("edit_event", draft.id))
                .selected_text(draft.event_type.clone())
                .show_ui(ui, |ui| {
                    for ty in &taxonomy.event_types {
                        ui.selectable_value(&mut draft.event_type, ty.clone(), ty);
                    }
                });
        }
        Category::Note => {
            ui.add(
                egui::TextEdit::singleline(&mut draft.note)
                    .char_limit(NOTE_MAX_CHARS)
                    .desired_width(f32::INFINITY),
            );
        }
    }

    ui.horizontal(|ui| {
        if ui.small_button("Save").clicked() {
            *commit = true;
        }
        if ui.small_button("Cancel").clicked() {
            *cancel = true;
        }
    });
}
