// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Playback control.
//!
//! Thin wrapper issuing transport commands to the media element and
//! mirroring its event notifications into [`PlaybackState`]. Commands
//! issued before an element is attached are guarded no-ops. Observable
//! state follows element events, except that seeks mirror the new
//! position eagerly so the scrubber feels immediate, and rate/volume
//! mirror eagerly because the element contract has no events for them.

pub mod element;

use element::{MediaElement, PlaybackEvent};

/// Ephemeral playback state observed by the UI. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub duration: f64,
    pub current_time: f64,
    pub playing: bool,
    pub playback_rate: f64,
    pub volume: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            duration: 0.0,
            current_time: 0.0,
            playing: false,
            playback_rate: 1.0,
            volume: 1.0,
        }
    }
}

pub struct PlaybackController {
    element: Option<Box<dyn MediaElement>>,
    state: PlaybackState,
}

impl PlaybackController {
    /// Controller with no element attached; every command no-ops
    /// until [`attach`](Self::attach) is called.
    pub fn new() -> Self {
        Self {
            element: None,
            state: PlaybackState::default(),
        }
    }

    pub fn attach(&mut self, element: Box<dyn MediaElement>) {
        self.element = Some(element);
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Drain element events into the observable state. Call once per frame.
    pub fn poll(&mut self) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        for event in element.poll_events() {
            match event {
                PlaybackEvent::MetadataLoaded { duration } => {
                    log::info!("Media metadata loaded, duration {:.1}s", duration);
                    self.state.duration = duration;
                }
                PlaybackEvent::TimeUpdated { time } => self.state.current_time = time,
                PlaybackEvent::PlayStarted => self.state.playing = true,
                PlaybackEvent::PlayPaused => self.state.playing = false,
            }
        }
    }

    pub fn toggle_play(&mut self) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        if element.paused() {
            element.play();
        } else {
            element.pause();
        }
    }

    /// Seek relative to the current position; the target is clamped
    /// to the clip bounds.
    pub fn skip(&mut self, delta_seconds: f64) {
        let target = self.state.current_time + delta_seconds;
        self.seek_to(target);
    }

    pub fn seek_to(&mut self, time: f64) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        let target = time.clamp(0.0, element.duration());
        element.set_current_time(target);
        // Mirror eagerly; the next TimeUpdated confirms it.
        self.state.current_time = target;
    }

    pub fn set_rate(&mut self, rate: f64) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        element.set_playback_rate(rate);
        self.state.playback_rate = rate;
    }

    /// `volume` is expected in `[0, 1]`; out-of-range input is a
    /// caller error and is passed through unclamped.
    pub fn set_volume(&mut self, volume: f64) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        element.set_volume(volume);
        self.state.volume = volume;
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::element::ClockElement;

    #[test]
    fn test_commands_noop_without_element() {
        let mut controller = PlaybackController::new();
        controller.toggle_play();
        controller.skip(10.0);
        controller.seek_to(5.0);
        controller.set_rate(2.0);
        controller.set_volume(0.5);
        controller.poll();
        assert_eq!(*controller.state(), PlaybackState::default());
    }

    #[test]
    fn test_metadata_flows_into_state() {
        let mut controller = PlaybackController::new();
        controller.attach(Box::new(ClockElement::new(90.0)));
        controller.poll();
        assert_eq!(controller.state().duration, 90.0);
    }

    #[test]
    fn test_skip_clamps_and_mirrors_eagerly() {
        let mut controller = PlaybackController::new();
        controller.attach(Box::new(ClockElement::new(60.0)));
        controller.poll();

        controller.skip(-10.0);
        assert_eq!(controller.state().current_time, 0.0);

        controller.skip(100.0);
        // Mirrored before the next TimeUpdated arrives.
        assert_eq!(controller.state().current_time, 60.0);
    }

    #[test]
    fn test_toggle_play_follows_events() {
        let mut controller = PlaybackController::new();
        controller.attach(Box::new(ClockElement::new(60.0)));
        controller.poll();

        controller.toggle_play();
        assert!(!controller.state().playing);
        controller.poll();
        assert!(controller.state().playing);

        controller.toggle_play();
        controller.poll();
        assert!(!controller.state().playing);
    }

    #[test]
    fn test_rate_and_volume_mirror() {
        let mut controller = PlaybackController::new();
        controller.attach(Box::new(ClockElement::new(60.0)));
        controller.set_rate(1.5);
        controller.set_volume(0.25);
        assert_eq!(controller.state().playback_rate, 1.5);
        assert_eq!(controller.state().volume, 0.25);
    }
}
