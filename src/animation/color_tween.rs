//! Backdrop color transitions
//!
//! A single tween owns the displayed backdrop color. Requesting a new
//! target while a transition is running restarts from whatever color is
//! on screen right now, so overlapping triggers retarget instead of queueing.

use std::cell::RefCell;

use super::easing::{Easing, ease};
use crate::math::Rgba;

/// Anything that can animate the backdrop toward a color
pub trait ColorAnimator {
    fn animate_to(&self, target: Rgba, duration: f64, easing: Easing);
}

/// Time-based interpolation between two colors
#[derive(Debug, Clone)]
pub struct ColorTween {
    /// Color when the current transition started
    pub from: Rgba,
    /// Color the current transition ends on
    pub to: Rgba,
    /// Color currently displayed
    pub current: Rgba,
    /// Transition duration in seconds
    pub duration: f64,
    /// Seconds since the transition started
    pub elapsed: f64,
    pub easing: Easing,
    pub playing: bool,
}

impl ColorTween {
    /// A resting tween showing `color`
    pub fn new(color: Rgba) -> Self {
        Self {
            from: color,
            to: color,
            current: color,
            duration: 0.0,
            elapsed: 0.0,
            easing: Easing::default(),
            playing: false,
        }
    }

    /// Start a transition from the displayed color toward `target`
    pub fn retarget(&mut self, target: Rgba, duration: f64, easing: Easing) {
        self.from = self.current;
        self.to = target;
        self.elapsed = 0.0;
        self.easing = easing;
        self.duration = duration.max(0.0);
        self.playing = true;
    }

    /// Advance by `dt` seconds. Returns the new color if it changed.
    pub fn update(&mut self, dt: f64) -> Option<Rgba> {
        if !self.playing {
            return None;
        }

        self.elapsed += dt.max(0.0);
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };

        if t >= 1.0 {
            self.finish();
        } else {
            self.current = self.from.lerp(&self.to, ease(t, self.easing));
        }

        Some(self.current)
    }

    fn finish(&mut self) {
        self.elapsed = self.duration;
        self.current = self.to;
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl ColorAnimator for RefCell<ColorTween> {
    fn animate_to(&self, target: Rgba, duration: f64, easing: Easing) {
        self.borrow_mut().retarget(target, duration, easing);
    }
}
