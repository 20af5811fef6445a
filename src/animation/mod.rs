//! Animation module for backdrop transitions
//!
//! Easing curves and the color tween that fades the page backdrop
//! between region colors.

mod color_tween;
mod easing;

pub use color_tween::{ColorAnimator, ColorTween};
pub use easing::{Easing, ease};
