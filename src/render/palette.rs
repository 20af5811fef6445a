//! Theme-dependent gradient colors for the orbs and the pointer glow

use serde::{Deserialize, Serialize};

use super::surface::ColorStop;
use crate::math::Rgba;

const BLUE: Rgba = Rgba::rgb(59, 130, 246);
const PURPLE: Rgba = Rgba::rgb(147, 51, 234);

/// Light or dark display mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Pick the value matching this theme
    pub fn pick<T>(&self, light: T, dark: T) -> T {
        match self {
            Theme::Light => light,
            Theme::Dark => dark,
        }
    }
}

/// Three-stop gradient: tinted center, mid stop, transparent edge.
///
/// Center and mid alphas are multiplied by an intensity (the orb's own
/// opacity, or 1.0 for the pointer glow).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStyle {
    pub inner: Rgba,
    pub mid: Rgba,
    pub edge: Rgba,
    pub mid_offset: f64,
    pub inner_alpha: f64,
    pub mid_alpha: f64,
}

impl GradientStyle {
    pub fn stops(&self, intensity: f64) -> [ColorStop; 3] {
        [
            ColorStop::new(0.0, self.inner.with_alpha(self.inner_alpha * intensity)),
            ColorStop::new(self.mid_offset, self.mid.with_alpha(self.mid_alpha * intensity)),
            ColorStop::new(1.0, self.edge.with_alpha(0.0)),
        ]
    }

    fn blue_purple(mid_offset: f64, inner_alpha: f64, mid_alpha: f64) -> Self {
        Self {
            inner: BLUE,
            mid: PURPLE,
            edge: BLUE,
            mid_offset,
            inner_alpha,
            mid_alpha,
        }
    }
}

/// Gradient styles for one theme
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub orb: GradientStyle,
    pub glow: GradientStyle,
}

/// Light and dark palettes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palettes {
    pub light: Palette,
    pub dark: Palette,
}

impl Palettes {
    pub fn for_theme(&self, theme: Theme) -> &Palette {
        theme.pick(&self.light, &self.dark)
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Self {
            light: Palette {
                orb: GradientStyle::blue_purple(0.4, 0.6, 0.3),
                glow: GradientStyle::blue_purple(0.3, 0.08, 0.04),
            },
            dark: Palette {
                orb: GradientStyle::blue_purple(0.4, 0.8, 0.4),
                glow: GradientStyle::blue_purple(0.3, 0.12, 0.06),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_pick() {
        assert_eq!(Theme::Light.pick(1, 2), 1);
        assert_eq!(Theme::Dark.pick(1, 2), 2);
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn test_dark_glow_stops() {
        let stops = Palettes::default().for_theme(Theme::Dark).glow.stops(1.0);
        assert_eq!(stops[0].color.to_css(), "rgba(59, 130, 246, 0.12)");
        assert_eq!(stops[1].offset, 0.3);
        assert_eq!(stops[1].color.to_css(), "rgba(147, 51, 234, 0.06)");
        assert_eq!(stops[2].color.to_css(), "rgba(59, 130, 246, 0)");
    }

    #[test]
    fn test_orb_stops_scale_with_opacity() {
        let stops = Palettes::default().for_theme(Theme::Light).orb.stops(0.1);
        assert!((stops[0].color.a - 0.06).abs() < 1e-9);
        assert!((stops[1].color.a - 0.03).abs() < 1e-9);
        assert_eq!(stops[1].offset, 0.4);
        assert_eq!(stops[2].color.a, 0.0);
    }
}
