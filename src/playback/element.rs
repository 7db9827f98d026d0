// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Media element collaborator contract.
//!
//! The playback controller drives whatever implements [`MediaElement`]
//! and mirrors its events into observable state. The shipped
//! implementation is [`ClockElement`], a wall-clock playback
//! simulation over a known clip duration; a real decoder-backed
//! element plugs in behind the same trait.

use std::collections::VecDeque;
use std::time::Instant;

/// Notification emitted by a media element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    MetadataLoaded { duration: f64 },
    TimeUpdated { time: f64 },
    PlayStarted,
    PlayPaused,
}

/// The playback collaborator: position, duration, transport commands
/// and event notifications.
pub trait MediaElement {
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, time: f64);
    fn duration(&self) -> f64;
    fn paused(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);
    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);

    /// Drain pending event notifications, oldest first.
    fn poll_events(&mut self) -> Vec<PlaybackEvent>;
}

/// Wall-clock driven element: playback advances with real time,
/// scaled by the playback rate, and pauses itself at the end of the
/// clip. Volume is stored but produces no audio.
pub struct ClockElement {
    duration: f64,
    position: f64,
    rate: f64,
    volume: f64,
    playing: bool,
    last_tick: Option<Instant>,
    metadata_announced: bool,
    events: VecDeque<PlaybackEvent>,
}

impl ClockElement {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            position: 0.0,
            rate: 1.0,
            volume: 1.0,
            playing: false,
            last_tick: None,
            metadata_announced: false,
            events: VecDeque::new(),
        }
    }

    fn tick(&mut self) {
        let now = Instant::now();
        if self.playing {
            if let Some(last) = self.last_tick {
                let elapsed = now.duration_since(last).as_secs_f64();
                self.position = (self.position + elapsed * self.rate).min(self.duration);
                self.events
                    .push_back(PlaybackEvent::TimeUpdated { time: self.position });
                if self.position >= self.duration {
                    self.playing = false;
                    self.events.push_back(PlaybackEvent::PlayPaused);
                }
            }
        }
        self.last_tick = Some(now);
    }
}

impl MediaElement for ClockElement {
    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, time: f64) {
        self.position = time.clamp(0.0, self.duration);
        self.events
            .push_back(PlaybackEvent::TimeUpdated { time: self.position });
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn paused(&self) -> bool {
        !self.playing
    }

    fn play(&mut self) {
        if self.playing {
            return;
        }
        // Restart from the top when play is hit at the end of the clip.
        if self.position >= self.duration {
            self.position = 0.0;
        }
        self.playing = true;
        self.last_tick = Some(Instant::now());
        self.events.push_back(PlaybackEvent::PlayStarted);
    }

    fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.tick();
        self.playing = false;
        self.events.push_back(PlaybackEvent::PlayPaused);
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.tick();
        self.rate = rate;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn poll_events(&mut self) -> Vec<PlaybackEvent> {
        if !self.metadata_announced {
            self.metadata_announced = true;
            self.events.push_front(PlaybackEvent::MetadataLoaded {
                duration: self.duration,
            });
        }
        self.tick();
        self.events.drain(..).collect()
    }
}
