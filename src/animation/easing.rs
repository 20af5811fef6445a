//! Easing functions for smooth animations

use serde::{Deserialize, Serialize};

/// Easing function types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation
    Linear,
    /// Smooth ease-in-out
    EaseInOut,
    /// Slow start, accelerate
    EaseIn,
    /// Fast start, decelerate (quadratic)
    EaseOut,
    /// Fast start, long soft landing (cubic, GSAP's `power2.out`)
    #[default]
    Power2Out,
}

/// Apply easing function to a value t in range [0, 1]
pub fn ease(t: f64, easing: Easing) -> f64 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t).powi(2),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::Power2Out,
    ];

    #[test]
    fn test_ease_bounds() {
        for easing in ALL {
            assert!(ease(0.0, easing).abs() < 1e-9, "Easing {:?} should start at 0", easing);
            assert!((ease(1.0, easing) - 1.0).abs() < 1e-9, "Easing {:?} should end at 1", easing);
        }
    }

    #[test]
    fn test_ease_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let t = i as f64 / 100.0;
                let v = ease(t, easing);
                assert!(v >= prev - 1e-9, "Easing {:?} should be monotonic", easing);
                prev = v;
            }
        }
    }

    #[test]
    fn test_power2_out_front_loaded() {
        // Half the time covers 87.5% of the distance
        assert!((ease(0.5, Easing::Power2Out) - 0.875).abs() < 1e-9);
        assert!(ease(0.5, Easing::Power2Out) > ease(0.5, Easing::EaseOut));
    }

    #[test]
    fn test_ease_clamps_input() {
        assert_eq!(ease(-0.5, Easing::Linear), 0.0);
        assert_eq!(ease(1.5, Easing::Linear), 1.0);
    }

    #[test]
    fn test_easing_names() {
        let e: Easing = serde_yaml::from_str("power2_out").unwrap();
        assert_eq!(e, Easing::Power2Out);
        let e: Easing = serde_yaml::from_str("ease_in_out").unwrap();
        assert_eq!(e, Easing::EaseInOut);
    }
}
