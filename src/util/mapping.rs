// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Timeline coordinate transforms.
//!
//! This module converts between playback time and positions along the
//! horizontal timeline widget: a percentage for laying out markers and
//! the progress fill, and the inverse pixel-to-time mapping for
//! resolving seek clicks and drags.

/// Convert a playback time to a percentage position along the timeline.
///
/// Returns 0 for a non-positive duration; otherwise the result is
/// clamped to `[0, 100]` even for out-of-range times.
pub fn time_to_percent(time: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    (time / duration * 100.0).clamp(0.0, 100.0)
}

/// Resolve a pointer x-coordinate on the timeline to a playback time.
///
/// The raw offset `client_x - element_left` is clamped to
/// `[0, element_width]` before scaling, so the returned time stays
/// within `[0, duration]` even when a drag leaves the element bounds.
pub fn pixel_to_time(client_x: f64, element_left: f64, element_width: f64, duration: f64) -> f64 {
    if element_width <= 0.0 {
        return 0.0;
    }
    let x = (client_x - element_left).clamp(0.0, element_width);
    x / element_width * duration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_zero_duration_guard() {
        assert_eq!(time_to_percent(42.0, 0.0), 0.0);
        assert_eq!(time_to_percent(42.0, -1.0), 0.0);
    }

    #[test]
    fn test_percent_midpoint_and_clamp() {
        assert_eq!(time_to_percent(50.0, 100.0), 50.0);
        assert_eq!(time_to_percent(150.0, 100.0), 100.0);
        assert_eq!(time_to_percent(-5.0, 100.0), 0.0);
    }

    #[test]
    fn test_pixel_clamps_below_range() {
        assert_eq!(pixel_to_time(100.0, 200.0, 200.0, 60.0), 0.0);
    }

    #[test]
    fn test_pixel_clamps_above_range() {
        assert_eq!(pixel_to_time(500.0, 200.0, 200.0, 60.0), 60.0);
    }

    #[test]
    fn test_pixel_monotonic() {
        let mut last = 0.0;
        for px in 0..400 {
            let t = pixel_to_time(px as f64, 100.0, 200.0, 60.0);
            assert!(t >= last);
            last = t;
        }
    }

    #[test]
    fn test_pixel_percent_roundtrip() {
        let duration = 90.0;
        let t = pixel_to_time(250.0, 100.0, 200.0, duration);
        let pct = time_to_percent(t, duration);
        assert!((pct - 75.0).abs() < 1e-9);
    }
}
