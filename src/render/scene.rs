use std::cell::RefCell;
use std::rc::Rc;

use super::palette::{Palettes, Theme};
use super::surface::{RadialGradient, Rect, Surface};
use crate::animation::ColorTween;
use crate::host::BackdropSink;
use crate::math::{Vec2, Viewport};
use crate::particles::OrbField;

/// Everything one mounted backdrop draws, advanced one frame at a time
pub struct Scene {
    field: OrbField,
    surface: Box<dyn Surface>,
    backdrop: Box<dyn BackdropSink>,
    /// Shared with the scroll colorizer, which retargets it
    fade: Rc<RefCell<ColorTween>>,
    palettes: Palettes,
    glow_radius: f64,
    pointer: Vec2,
    last_timestamp: Option<f64>,
}

impl Scene {
    pub fn new(
        field: OrbField,
        surface: Box<dyn Surface>,
        backdrop: Box<dyn BackdropSink>,
        fade: Rc<RefCell<ColorTween>>,
        palettes: Palettes,
        glow_radius: f64,
    ) -> Self {
        Self {
            field,
            surface,
            backdrop,
            fade,
            palettes,
            glow_radius,
            pointer: Vec2::ZERO,
            last_timestamp: None,
        }
    }

    /// Render one frame.
    ///
    /// Order: backdrop fade step, clear, pointer glow, then each orb
    /// advanced and painted in insertion order. A surface with a zero
    /// side is only cleared.
    pub fn frame(&mut self, timestamp_ms: f64, theme: Theme) {
        let dt = self
            .last_timestamp
            .map(|last| ((timestamp_ms - last) / 1000.0).max(0.0))
            .unwrap_or(0.0);
        self.last_timestamp = Some(timestamp_ms);

        let faded = self.fade.borrow_mut().update(dt);
        if let Some(color) = faded {
            self.backdrop.apply(color);
        }

        self.surface.clear();
        let size = self.surface.size();
        if !size.is_visible() {
            return;
        }

        let palette = self.palettes.for_theme(theme);
        let glow = RadialGradient {
            center: self.pointer,
            radius: self.glow_radius,
            stops: palette.glow.stops(1.0),
        };
        let whole = Rect::covering(size);
        self.surface.fill_radial_gradient(&glow, whole);

        self.field.advance_and_render(self.surface.as_mut(), &palette.orb);
    }

    /// Latest pointer position; read by the next frame
    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    /// Resize the drawing buffer. Orb anchors are left alone.
    pub fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
    }

    /// Push the fade's displayed color to the backdrop without stepping it
    pub fn sync_backdrop(&mut self) {
        let color = self.fade.borrow().current;
        self.backdrop.apply(color);
    }

    pub fn field(&self) -> &OrbField {
        &self.field
    }

    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }
}
