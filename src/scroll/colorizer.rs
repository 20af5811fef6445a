//! Scroll-linked backdrop colors
//!
//! One observer per configured region. Entering a region from either
//! direction reads the theme right then and fades the backdrop to that
//! region's color; leaving does nothing, the next region's entry supplies
//! the next color.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::region::RegionTrigger;
use crate::animation::{ColorAnimator, Easing};
use crate::host::{ObserverId, RegionCallbacks, RegionNotifier, ThemeSource};

/// Timing of a backdrop fade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transition {
    /// Seconds
    pub duration: f64,
    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration: 1.5,
            easing: Easing::Power2Out,
        }
    }
}

/// Registered region observers for one mount
pub struct ScrollColorizer {
    notifier: Rc<dyn RegionNotifier>,
    observers: Vec<ObserverId>,
}

impl ScrollColorizer {
    /// Register every region in order. Regions whose selector matches
    /// nothing are skipped.
    pub fn register(
        regions: &[RegionTrigger],
        transition: Transition,
        notifier: Rc<dyn RegionNotifier>,
        theme: Rc<dyn ThemeSource>,
        animator: Rc<dyn ColorAnimator>,
    ) -> Self {
        let mut observers = Vec::with_capacity(regions.len());

        for region in regions {
            let callbacks = RegionCallbacks {
                on_enter: activation(region, transition, &theme, &animator),
                on_enter_back: activation(region, transition, &theme, &animator),
            };

            match notifier.observe(&region.selector, callbacks) {
                Some(id) => observers.push(id),
                None => log::debug!("no element for region {}, skipping", region.selector),
            }
        }

        log::debug!("observing {} of {} regions", observers.len(), regions.len());
        Self { notifier, observers }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Dispose every observer. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        for id in self.observers.drain(..) {
            self.notifier.dispose(id);
        }
    }
}

impl Drop for ScrollColorizer {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn activation(
    region: &RegionTrigger,
    transition: Transition,
    theme: &Rc<dyn ThemeSource>,
    animator: &Rc<dyn ColorAnimator>,
) -> Box<dyn FnMut()> {
    let region = region.clone();
    let theme = Rc::clone(theme);
    let animator = Rc::clone(animator);

    Box::new(move || {
        let target = region.color(theme.resolve());
        log::debug!("region {} active, fading backdrop to {}", region.selector, target);
        animator.animate_to(target, transition.duration, transition.easing);
    })
}
