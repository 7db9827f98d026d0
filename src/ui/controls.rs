// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Transport controls.
//!
//! This module renders the playback control strip: skip buttons,
//! play/pause, speed selection, volume and the time readout.

use crate::playback::PlaybackState;
use crate::util::time::format_time;

/// Selectable playback rates.
const RATES: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Result of interaction with the control strip.
pub enum ControlsAction {
    None,
    TogglePlay,
    Skip(f64),
    SetRate(f64),
    SetVolume(f64),
}

/// Display the transport controls for the current playback state.
pub fn show(ui: &mut egui::Ui, state: &PlaybackState) -> ControlsAction {
    let mut action = ControlsAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("⏪ -10s").clicked() {
            action = ControlsAction::Skip(-10.0);
        }

        let play_label = if state.playing { "⏸ Pause" } else { "▶ Play" };
        if ui.button(play_label).clicked() {
            action = ControlsAction::TogglePlay;
        }

        if ui.button("+10s ⏩").clicked() {
            action = ControlsAction::Skip(10.0);
        }

        ui.separator();

        ui.label("Speed");
        let mut rate = state.playback_rate;
        egui::ComboBox::from_id_source("playback_rate")
            .selected_text(format!("{}x", rate))
            .show_ui(ui, |ui| {
                for r in RATES {
                    ui.selectable_value(&mut rate, r, format!("{}x", r));
                }
            });
        if rate != state.playback_rate {
            action = ControlsAction::SetRate(rate);
        }

        ui.separator();

        ui.label("Volume");
        let mut volume = state.volume;
        if ui
            .add(egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false))
            .changed()
        {
            action = ControlsAction::SetVolume(volume);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{} / {}",
                    format_time(state.current_time),
                    format_time(state.duration)
                ))
                .monospace(),
            );
        });
    });

    action
}
