use serde::{Deserialize, Serialize};

use crate::math::Rgba;
use crate::render::Theme;

/// A page section and the backdrop colors it asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTrigger {
    /// CSS selector of the section element
    pub selector: String,
    pub light: Rgba,
    pub dark: Rgba,
}

impl RegionTrigger {
    pub fn new(selector: &str, light: Rgba, dark: Rgba) -> Self {
        Self {
            selector: selector.to_string(),
            light,
            dark,
        }
    }

    pub fn color(&self, theme: Theme) -> Rgba {
        theme.pick(self.light, self.dark)
    }

    /// The five portfolio sections, top to bottom
    pub fn portfolio_sections() -> Vec<Self> {
        let white = Rgba::WHITE;
        let black = Rgba::BLACK;
        let slate_50 = Rgba::rgb(0xf8, 0xfa, 0xfc);
        let slate_100 = Rgba::rgb(0xf1, 0xf5, 0xf9);
        let slate_900 = Rgba::rgb(0x0f, 0x17, 0x2a);
        let slate_800 = Rgba::rgb(0x1e, 0x29, 0x3b);

        vec![
            Self::new(".hero-section", white, black),
            Self::new(".about-section", slate_50, slate_900),
            Self::new(".skills-section", slate_100, slate_800),
            Self::new(".projects-section", slate_50, slate_900),
            Self::new(".contact-section", slate_100, slate_800),
        ]
    }
}

/// Where the viewport's reference line sits relative to a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionPhase {
    Before,
    Active,
    After,
}

impl RegionPhase {
    /// Phase of `position` against a region spanning `[start, end)`
    pub fn classify(position: f64, start: f64, end: f64) -> Self {
        if position < start {
            RegionPhase::Before
        } else if position < end {
            RegionPhase::Active
        } else {
            RegionPhase::After
        }
    }
}

/// Boundary crossing reported by a [`RegionTracker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Before -> Active, scrolling forward
    Enter,
    /// Active -> After, scrolling forward
    Leave,
    /// After -> Active, scrolling back
    EnterBack,
    /// Active -> Before, scrolling back
    LeaveBack,
}

impl Crossing {
    /// Only entering a region triggers a color change
    pub fn activates(&self) -> bool {
        matches!(self, Crossing::Enter | Crossing::EnterBack)
    }
}

/// Per-region state machine fed with phase samples
#[derive(Debug, Clone, Copy)]
pub struct RegionTracker {
    phase: RegionPhase,
}

impl Default for RegionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionTracker {
    /// Starts before the region, so a first sample inside it counts as entering
    pub fn new() -> Self {
        Self { phase: RegionPhase::Before }
    }

    pub fn phase(&self) -> RegionPhase {
        self.phase
    }

    /// Record a new sample. A jump clean over the region reports nothing.
    pub fn update(&mut self, next: RegionPhase) -> Option<Crossing> {
        use RegionPhase::*;

        let crossing = match (self.phase, next) {
            (Before, Active) => Some(Crossing::Enter),
            (Active, After) => Some(Crossing::Leave),
            (After, Active) => Some(Crossing::EnterBack),
            (Active, Before) => Some(Crossing::LeaveBack),
            _ => None,
        };
        self.phase = next;
        crossing
    }
}
