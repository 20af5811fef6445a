//! Scroll-linked backdrop colorizer
//!
//! Page regions, the per-region Before/Active/After state machine, and
//! the observer registration that fades the backdrop on entry.

mod colorizer;
mod region;

pub use colorizer::{ScrollColorizer, Transition};
pub use region::{Crossing, RegionPhase, RegionTrigger, RegionTracker};
