// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Playback time formatting.

/// Format a seconds value as `m:ss` for display.
///
/// NaN and negative inputs render as zero. Both components truncate
/// toward zero, so `59.9` is `0:59`, not `1:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
