//! Floating light orbs
//!
//! A fixed set of soft circular light sources drifting around anchors
//! scattered over the viewport. Each orb sways on its own slow
//! sinusoidal path; the set never grows, shrinks or respawns while
//! mounted.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::math::{Vec2, Viewport};
use crate::render::{GradientStyle, RadialGradient, Rect, Surface};

/// Half-open range `[min, max)` sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    /// Degenerate spans yield `min`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.is_valid() {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

/// Tuning for orb creation and motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbParams {
    pub radius: Span,
    pub opacity: Span,
    pub speed: Span,
    /// Angle gained per frame per unit of speed
    pub speed_scale: f64,
    /// Horizontal sway amplitude in pixels
    pub sway_x: f64,
    /// Vertical sway amplitude in pixels
    pub sway_y: f64,
    /// Vertical sway runs at this fraction of the phase
    pub sway_y_frequency: f64,
}

impl Default for OrbParams {
    fn default() -> Self {
        Self {
            radius: Span::new(60.0, 180.0),
            opacity: Span::new(0.05, 0.20),
            speed: Span::new(0.1, 0.4),
            speed_scale: 0.005,
            sway_x: 30.0,
            sway_y: 20.0,
            sway_y_frequency: 0.7,
        }
    }
}

impl OrbParams {
    /// Offset from the anchor for a given phase
    pub fn sway(&self, angle: f64) -> Vec2 {
        Vec2::new(
            self.sway_x * angle.sin(),
            self.sway_y * (angle * self.sway_y_frequency).cos(),
        )
    }
}

/// A single floating orb
#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    /// Anchor, fixed for the orb's lifetime
    pub base: Vec2,
    /// Rendered position, always `base + sway(angle)`
    pub position: Vec2,
    pub radius: f64,
    pub opacity: f64,
    /// Phase, only ever increases
    pub angle: f64,
    pub speed: f64,
}

impl Orb {
    fn spawn<R: Rng>(viewport: Viewport, params: &OrbParams, rng: &mut R) -> Self {
        let base = Vec2::new(
            Span::new(0.0, viewport.width).sample(rng),
            Span::new(0.0, viewport.height).sample(rng),
        );
        let radius = params.radius.sample(rng);
        let opacity = params.opacity.sample(rng);
        let speed = params.speed.sample(rng);
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);

        Self {
            base,
            position: base + params.sway(angle),
            radius,
            opacity,
            angle,
            speed,
        }
    }

    /// Step one frame along the sway path
    pub fn advance(&mut self, params: &OrbParams) {
        self.angle += self.speed * params.speed_scale;
        self.position = self.base + params.sway(self.angle);
    }

    /// Gradient centered on the orb, stops scaled by its opacity
    pub fn gradient(&self, style: &GradientStyle) -> RadialGradient {
        RadialGradient {
            center: self.position,
            radius: self.radius,
            stops: style.stops(self.opacity),
        }
    }

    /// Paint the orb's bounding square with its gradient
    pub fn render(&self, surface: &mut dyn Surface, style: &GradientStyle) {
        surface.fill_radial_gradient(&self.gradient(style), Rect::around(self.position, self.radius));
    }
}

/// The full set of orbs for one mount
#[derive(Debug, Clone)]
pub struct OrbField {
    orbs: Vec<Orb>,
    params: OrbParams,
}

impl OrbField {
    /// Create `count` orbs scattered over `viewport` from a seeded generator
    pub fn initialize(count: usize, viewport: Viewport, params: OrbParams, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::initialize_with_rng(count, viewport, params, &mut rng)
    }

    pub fn initialize_with_rng<R: Rng>(
        count: usize,
        viewport: Viewport,
        params: OrbParams,
        rng: &mut R,
    ) -> Self {
        let orbs = (0..count).map(|_| Orb::spawn(viewport, &params, rng)).collect();
        log::debug!("created {} orbs over {}x{}", count, viewport.width, viewport.height);
        Self { orbs, params }
    }

    /// Advance every orb by one frame
    pub fn advance(&mut self) {
        for orb in &mut self.orbs {
            orb.advance(&self.params);
        }
    }

    /// Advance then draw each orb in insertion order; later orbs paint over earlier ones
    pub fn advance_and_render(&mut self, surface: &mut dyn Surface, style: &GradientStyle) {
        for orb in &mut self.orbs {
            orb.advance(&self.params);
            orb.render(surface, style);
        }
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, Palettes, RecordingSurface, Theme};
    use proptest::prelude::*;

    fn field(count: usize, w: f64, h: f64) -> OrbField {
        OrbField::initialize(count, Viewport::new(w, h), OrbParams::default(), 7)
    }

    #[test]
    fn test_field_cardinality() {
        assert_eq!(field(6, 800.0, 600.0).len(), 6);
        assert!(field(0, 800.0, 600.0).is_empty());
    }

    #[test]
    fn test_zero_viewport_does_not_panic() {
        let f = field(6, 0.0, 0.0);
        assert_eq!(f.len(), 6);
        for orb in f.orbs() {
            assert_eq!(orb.base, Vec2::ZERO);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        assert_eq!(field(6, 800.0, 600.0).orbs(), field(6, 800.0, 600.0).orbs());
    }

    #[test]
    fn test_advance_moves_angle_by_speed() {
        let mut f = field(3, 800.0, 600.0);
        let before: Vec<f64> = f.orbs().iter().map(|o| o.angle).collect();
        f.advance();
        for (orb, angle) in f.orbs().iter().zip(before) {
            assert!((orb.angle - (angle + orb.speed * 0.005)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_render_in_insertion_order() {
        let mut f = field(4, 800.0, 600.0);
        let mut surface = RecordingSurface::new(Viewport::new(800.0, 600.0));
        let style = Palettes::default().for_theme(Theme::Light).orb;

        f.advance_and_render(&mut surface, &style);

        let centers: Vec<Vec2> = surface.gradients().map(|(g, _)| g.center).collect();
        let positions: Vec<Vec2> = f.orbs().iter().map(|o| o.position).collect();
        assert_eq!(centers, positions);
    }

    #[test]
    fn test_orb_fill_area_bounds_circle() {
        let f = field(1, 800.0, 600.0);
        let orb = &f.orbs()[0];
        let mut surface = RecordingSurface::new(Viewport::new(800.0, 600.0));
        orb.render(&mut surface, &Palettes::default().dark.orb);

        match &surface.ops()[0] {
            DrawOp::Gradient { gradient, area } => {
                assert_eq!(gradient.radius, orb.radius);
                assert_eq!(area.width, orb.radius * 2.0);
                assert_eq!(area.x, orb.position.x - orb.radius);
                assert!((gradient.stops[0].color.a - orb.opacity * 0.8).abs() < 1e-9);
            }
            op => panic!("unexpected op {:?}", op),
        }
    }

    #[test]
    fn test_degenerate_span_samples_min() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(Span::new(5.0, 5.0).sample(&mut rng), 5.0);
        assert!(!Span::new(5.0, 1.0).is_valid());
    }

    proptest! {
        #[test]
        fn prop_fresh_orbs_within_ranges(
            count in 0usize..32,
            w in 1.0f64..4000.0,
            h in 1.0f64..4000.0,
            seed in any::<u64>(),
        ) {
            let params = OrbParams::default();
            let f = OrbField::initialize(count, Viewport::new(w, h), params, seed);
            prop_assert_eq!(f.len(), count);
            for orb in f.orbs() {
                prop_assert!(orb.base.x >= 0.0 && orb.base.x < w);
                prop_assert!(orb.base.y >= 0.0 && orb.base.y < h);
                prop_assert!(params.radius.contains(orb.radius));
                prop_assert!(params.opacity.contains(orb.opacity));
                prop_assert!(params.speed.contains(orb.speed));
                prop_assert!(orb.angle >= 0.0 && orb.angle < std::f64::consts::TAU);
            }
        }

        #[test]
        fn prop_position_is_base_plus_sway(frames in 0usize..500, seed in any::<u64>()) {
            let mut f = OrbField::initialize(6, Viewport::new(1280.0, 720.0), OrbParams::default(), seed);
            let bases: Vec<Vec2> = f.orbs().iter().map(|o| o.base).collect();
            for _ in 0..frames {
                f.advance();
            }
            for (orb, base) in f.orbs().iter().zip(bases) {
                prop_assert_eq!(orb.base, base);
                let expected_x = orb.base.x + 30.0 * orb.angle.sin();
                let expected_y = orb.base.y + 20.0 * (0.7 * orb.angle).cos();
                prop_assert!((orb.position.x - expected_x).abs() < 1e-9);
                prop_assert!((orb.position.y - expected_y).abs() < 1e-9);
            }
        }
    }
}
