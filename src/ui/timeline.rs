// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Timeline scrubber with annotation markers.
//!
//! Renders the progress bar, the per-category colored markers and the
//! current-time thumb, and resolves clicks and drags back to playback
//! times. Clicking directly on a marker selects it instead of seeking.

use crate::models::annotation::{Annotation, Category};
use crate::playback::PlaybackState;
use crate::util::mapping::{pixel_to_time, time_to_percent};
use crate::util::time::format_time;
use uuid::Uuid;

const BAR_HEIGHT: f32 = 16.0;
const MARKER_WIDTH: f32 = 3.0;
/// Pointer-to-marker distance, in pixels, that counts as a marker hit.
const MARKER_HIT_SLOP: f32 = 4.0;

/// Result of timeline interaction.
pub enum TimelineAction {
    None,
    Seek(f64),
    MarkerClicked(Uuid),
}

pub fn marker_color(category: Category) -> egui::Color32 {
    match category {
        Category::Player => egui::Color32::from_rgb(74, 222, 128),
        Category::Event => egui::Color32::from_rgb(250, 204, 21),
        Category::Note => egui::Color32::from_rgb(244, 114, 182),
    }
}

/// Display the timeline for the visible markers.
pub fn show(ui: &mut egui::Ui, state: &PlaybackState, markers: &[&Annotation]) -> TimelineAction {
    let mut action = TimelineAction::None;

    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(width, BAR_HEIGHT),
        egui::Sense::click_and_drag(),
    );

    let painter = ui.painter();
    painter.rect_filled(rect, egui::Rounding::same(4.0), egui::Color32::from_gray(60));

    // Progress fill up to the current time.
    let progress = time_to_percent(state.current_time, state.duration) as f32 / 100.0;
    if progress > 0.0 {
        let fill =
            egui::Rect::from_min_size(rect.min, egui::vec2(rect.width() * progress, rect.height()));
        painter.rect_filled(fill, egui::Rounding::same(4.0), egui::Color32::from_rgb(99, 102, 241));
    }

    let marker_x = |ann: &Annotation| -> f32 {
        let pct = time_to_percent(ann.time_seconds, state.duration) as f32 / 100.0;
        rect.min.x + rect.width() * pct
    };

    for ann in markers {
        let x = marker_x(ann);
        let marker_rect = egui::Rect::from_center_size(
            egui::pos2(x, rect.center().y),
            egui::vec2(MARKER_WIDTH, rect.height()),
        );
        painter.rect_filled(marker_rect, egui::Rounding::same(1.0), marker_color(ann.category));
    }

    // Current-time thumb on top of everything.
    let thumb_x = rect.min.x + rect.width() * progress;
    let thumb = egui::Rect::from_center_size(
        egui::pos2(thumb_x, rect.center().y),
        egui::vec2(2.0, rect.height()),
    );
    painter.rect_filled(thumb, egui::Rounding::same(1.0), egui::Color32::WHITE);

    let hit_marker = |pos: egui::Pos2| -> Option<usize> {
        markers
            .iter()
            .enumerate()
            .filter(|(_, ann)| (marker_x(ann) - pos.x).abs() <= MARKER_HIT_SLOP)
            .min_by(|(_, a), (_, b)| {
                let da = (marker_x(a) - pos.x).abs();
                let db = (marker_x(b) - pos.x).abs();
                da.total_cmp(&db)
            })
            .map(|(idx, _)| idx)
    };

    if let Some(pos) = response.hover_pos() {
        if let Some(ann) = hit_marker(pos).map(|idx| markers[idx]) {
            response.clone().on_hover_ui_at_pointer(|ui| {
                ui.label(egui::RichText::new(ann.category.label()).strong());
                ui.label(format!("Time: {}", format_time(ann.time_seconds)));
                ui.label(ann.summary());
            });
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some(ann) = hit_marker(pos).map(|idx| markers[idx]) {
                action = TimelineAction::MarkerClicked(ann.id);
            } else {
                action = TimelineAction::Seek(pixel_to_time(
                    pos.x as f64,
                    rect.min.x as f64,
                    rect.width() as f64,
                    state.duration,
                ));
            }
        }
    } else if response.dragged() {
        // Dragging scrubs even when the pointer leaves the bar; the
        // mapping clamps the result to the clip bounds.
        if let Some(pos) = response.interact_pointer_pos() {
            action = TimelineAction::Seek(pixel_to_time(
                pos.x as f64,
                rect.min.x as f64,
                rect.width() as f64,
                state.duration,
            ));
        }
    }

    action
}
