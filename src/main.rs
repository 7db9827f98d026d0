// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Courtside - timestamped annotation and match review for sports footage.
//!
//! A desktop application for tagging moments in match footage: player
//! actions, game events and free-text notes, laid out on a scrubbable
//! timeline and persisted to a local marker file or a remote store.

mod app;
mod config;
mod io;
mod models;
mod playback;
mod store;
mod ui;
mod util;

use anyhow::Result;
use app::CourtsideApp;
use config::AppConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::from_env()?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Courtside - Match Review"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Courtside",
        options,
        Box::new(move |_cc| Ok(Box::new(CourtsideApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
