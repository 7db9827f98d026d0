// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Category and event-type filter controls.
//!
//! The event-type selector labels each type with its live count
//! across the whole collection. Changing the selected event type is
//! reported back to the app, which mirrors it into the annotation
//! form's pending event type (a deliberate, named cross-component
//! reaction).

use crate::models::annotation::{Annotation, Category};
use crate::models::filter::{count_by_event_type, FilterState, ALL_EVENT_TYPES};

/// Result of filter bar interaction.
pub enum FilterAction {
    None,
    EventTypeChanged(String),
}

pub fn show(
    ui: &mut egui::Ui,
    filter: &mut FilterState,
    annotations: &[Annotation],
    event_types: &[String],
) -> FilterAction {
    let mut action = FilterAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Show:");
        for category in Category::ALL {
            let mut checked = filter.category_filters.contains(&category);
            if ui.checkbox(&mut checked, category.label()).changed() {
                filter.toggle_category(category);
            }
        }

        ui.separator();

        ui.label("Filter events:");
        let counts = count_by_event_type(annotations, event_types);
        let previous = filter.event_type_filter.clone();
        egui::ComboBox::from_id_source("event_type_filter")
            .selected_text(filter.event_type_filter.clone())
            .show_ui(ui, |ui| {
                ui.selectable_value(
                    &mut filter.event_type_filter,
                    ALL_EVENT_TYPES.to_string(),
                    ALL_EVENT_TYPES,
                );
                for (ty, count) in &counts {
                    ui.selectable_value(
                        &mut filter.event_type_filter,
                        ty.clone(),
                        format!("{} ({})", ty, count),
                    );
                }
            });
        if filter.event_type_filter != previous && filter.event_type_filter != ALL_EVENT_TYPES {
            action = FilterAction::EventTypeChanged(filter.event_type_filter.clone());
        }
    });

    action
}
