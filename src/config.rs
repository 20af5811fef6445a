//! Backdrop configuration
//!
//! Every knob has the portfolio's default, so an empty YAML document (or
//! no document at all) yields the stock six-orb, five-section backdrop.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::particles::{OrbParams, Span};
use crate::render::Palettes;
use crate::scroll::{RegionTrigger, Transition};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub orb_count: usize,
    pub orbs: OrbParams,
    /// Radius of the glow following the pointer
    pub glow_radius: f64,
    pub palette: Palettes,
    pub transition: Transition,
    /// Checked in order; later regions win overlapping transitions
    pub regions: Vec<RegionTrigger>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            orb_count: 6,
            orbs: OrbParams::default(),
            glow_radius: 300.0,
            palette: Palettes::default(),
            transition: Transition::default(),
            regions: RegionTrigger::portfolio_sections(),
        }
    }
}

impl BackdropConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_span("orbs.radius", self.orbs.radius)?;
        check_span("orbs.opacity", self.orbs.opacity)?;
        check_span("orbs.speed", self.orbs.speed)?;
        check_value("orbs.speed_scale", self.orbs.speed_scale)?;
        check_value("orbs.sway_x", self.orbs.sway_x)?;
        check_value("orbs.sway_y", self.orbs.sway_y)?;
        check_value("orbs.sway_y_frequency", self.orbs.sway_y_frequency)?;
        check_value("glow_radius", self.glow_radius)?;
        check_value("transition.duration", self.transition.duration)?;

        check_value("orbs.radius.min", self.orbs.radius.min)?;
        check_value("orbs.opacity.min", self.orbs.opacity.min)?;
        // angles only ever increase
        check_value("orbs.speed.min", self.orbs.speed.min)?;
        Ok(())
    }
}

fn check_span(field: &'static str, span: Span) -> Result<(), ConfigError> {
    if span.is_valid() {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            field,
            min: span.min,
            max: span.max,
        })
    }
}

/// Finite and non-negative
fn check_value(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;
    use crate::math::{Rgba, Viewport};
    use crate::particles::OrbField;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = BackdropConfig::from_yaml("").unwrap();
        assert_eq!(config, BackdropConfig::default());
        assert_eq!(config.orb_count, 6);
        assert_eq!(config.regions.len(), 5);
        assert_eq!(config.transition.duration, 1.5);
        assert_eq!(config.transition.easing, Easing::Power2Out);
    }

    #[test]
    fn test_partial_override() {
        let yaml = r##"
orb_count: 3
glow_radius: 200
orbs:
  radius: { min: 10, max: 20 }
regions:
  - selector: "#intro"
    light: "#fafafa"
    dark: "#111"
"##;
        let config = BackdropConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.orb_count, 3);
        assert_eq!(config.glow_radius, 200.0);
        assert_eq!(config.orbs.radius, Span::new(10.0, 20.0));
        // untouched fields keep their defaults
        assert_eq!(config.orbs.opacity, Span::new(0.05, 0.20));
        assert_eq!(config.regions.len(), 1);
        assert_eq!(config.regions[0].dark, Rgba::rgb(0x11, 0x11, 0x11));
    }

    #[test]
    fn test_rejects_bad_color() {
        let yaml = r##"
regions:
  - selector: ".hero-section"
    light: "white"
    dark: "#000"
"##;
        assert!(matches!(BackdropConfig::from_yaml(yaml), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_empty_range() {
        let yaml = "orbs:\n  opacity: { min: 0.2, max: 0.2 }\n";
        match BackdropConfig::from_yaml(yaml) {
            Err(ConfigError::InvalidRange { field, .. }) => assert_eq!(field, "orbs.opacity"),
            other => panic!("expected range error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_negative_duration() {
        let yaml = "transition:\n  duration: -1\n";
        assert!(matches!(
            BackdropConfig::from_yaml(yaml),
            Err(ConfigError::InvalidValue { field: "transition.duration", .. })
        ));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let yaml = "orbs:\n  speed: { min: -0.4, max: -0.1 }\n";
        assert!(matches!(
            BackdropConfig::from_yaml(yaml),
            Err(ConfigError::InvalidValue { field: "orbs.speed.min", .. })
        ));
    }

    #[test]
    fn test_rejects_negative_opacity() {
        let yaml = "orbs:\n  opacity: { min: -0.5, max: -0.1 }\n";
        assert!(matches!(
            BackdropConfig::from_yaml(yaml),
            Err(ConfigError::InvalidValue { field: "orbs.opacity.min", .. })
        ));
    }

    #[test]
    fn test_validated_speeds_keep_angles_increasing() {
        let yaml = "orbs:\n  speed: { min: 0.0, max: 0.1 }\n";
        let config = BackdropConfig::from_yaml(yaml).unwrap();
        let mut field = OrbField::initialize(6, Viewport::new(800.0, 600.0), config.orbs, 11);
        let before: Vec<f64> = field.orbs().iter().map(|o| o.angle).collect();
        field.advance();
        for (orb, angle) in field.orbs().iter().zip(before) {
            assert!(orb.angle >= angle);
        }
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(BackdropConfig::from_yaml("orb_count: [").is_err());
    }
}
