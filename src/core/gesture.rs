//! Slide-to-accept gesture.
//!
//! A knob dragged along a track. Reaching the accept threshold locks the
//! control in the accepted state and schedules a single accept notification
//! after a short delay, giving the UI time to show the confirmation.
//!
//! Units are whatever the caller measures in (terminal cells here).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fraction of the travel that counts as "slid to the end".
pub const DEFAULT_ACCEPT_THRESHOLD: f32 = 0.9;

/// Delay between accepting and notifying.
pub const DEFAULT_ACCEPT_DELAY_MS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub accept_threshold: f32,
    pub accept_delay_ms: u64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            accept_threshold: DEFAULT_ACCEPT_THRESHOLD,
            accept_delay_ms: DEFAULT_ACCEPT_DELAY_MS,
        }
    }
}

/// Drag state for a slide-to-accept control.
#[derive(Debug, Clone)]
pub struct SlideToAccept {
    config: SliderConfig,
    track_width: f32,
    knob_width: f32,
    position: f32,
    grab_offset: f32,
    dragging: bool,
    accepted: bool,
    /// Remaining time until the accept notification; `None` once delivered.
    pending_accept: Option<Duration>,
}

impl SlideToAccept {
    pub fn new(track_width: f32, knob_width: f32, config: SliderConfig) -> Self {
        Self {
            config,
            track_width,
            knob_width,
            position: 0.0,
            grab_offset: 0.0,
            dragging: false,
            accepted: false,
            pending_accept: None,
        }
    }

    /// Maximum knob position.
    pub fn max_travel(&self) -> f32 {
        (self.track_width - self.knob_width).max(0.0)
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Fill fraction in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let max = self.max_travel();
        if max <= 0.0 {
            return if self.accepted { 1.0 } else { 0.0 };
        }
        (self.position / max).clamp(0.0, 1.0)
    }

    /// Resize the track (terminal resize). Keeps the knob inside it.
    pub fn set_track_width(&mut self, track_width: f32) {
        self.track_width = track_width;
        let max = self.max_travel();
        self.position = if self.accepted { max } else { self.position.min(max) };
    }

    /// Grab the knob at pointer position `x`.
    pub fn start(&mut self, x: f32) {
        if self.accepted {
            return;
        }
        self.dragging = true;
        self.grab_offset = x - self.position;
    }

    /// Pointer moved to `x` while dragging.
    pub fn drag_to(&mut self, x: f32) {
        if !self.dragging || self.accepted {
            return;
        }
        let max = self.max_travel();
        self.position = (x - self.grab_offset).clamp(0.0, max);
        self.check_accept();
    }

    /// Pointer released: snap back unless accepted.
    pub fn release(&mut self) {
        if self.accepted {
            return;
        }
        self.dragging = false;
        if self.position < self.max_travel() * self.config.accept_threshold {
            self.position = 0.0;
        }
    }

    /// Keyboard equivalent of dragging by `delta`.
    pub fn nudge(&mut self, delta: f32) {
        if self.accepted {
            return;
        }
        let max = self.max_travel();
        self.position = (self.position + delta).clamp(0.0, max);
        self.check_accept();
    }

    /// Advance time. Returns `true` exactly once, when the accept
    /// notification is due.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.pending_accept {
            Some(remaining) if remaining <= dt => {
                self.pending_accept = None;
                true
            }
            Some(remaining) => {
                self.pending_accept = Some(remaining - dt);
                false
            }
            None => false,
        }
    }

    /// Start over (e.g. a different dare was selected).
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.grab_offset = 0.0;
        self.dragging = false;
        self.accepted = false;
        self.pending_accept = None;
    }

    fn check_accept(&mut self) {
        let max = self.max_travel();
        if max > 0.0 && self.position >= max * self.config.accept_threshold {
            self.accepted = true;
            self.dragging = false;
            self.position = max;
            self.pending_accept = Some(Duration::from_millis(self.config.accept_delay_ms));
            log::debug!("Slider accepted");
        }
    }
}
