use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{RadialGradient, Rect, Surface};
use crate::math::Viewport;

/// Wrapper around a canvas 2D context implementing [`Surface`]
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// Returns `None` when the canvas has no 2D context available
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        Some(Self { canvas, ctx })
    }

    /// Screen-blend the canvas over the page and let pointer events through
    pub fn apply_presentation_style(&self) {
        let style = self.canvas.style();
        for (name, value) in [
            ("mix-blend-mode", "screen"),
            ("opacity", "0.7"),
            ("pointer-events", "none"),
        ] {
            if let Err(e) = style.set_property(name, value) {
                log::warn!("failed to set canvas style {}: {:?}", name, e);
            }
        }
    }
}

impl Surface for Canvas2dSurface {
    fn size(&self) -> Viewport {
        Viewport::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width.max(0.0) as u32);
        self.canvas.set_height(viewport.height.max(0.0) as u32);
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, area: Rect) {
        let c = gradient.center;
        let canvas_gradient = match self.ctx.create_radial_gradient(c.x, c.y, 0.0, c.x, c.y, gradient.radius) {
            Ok(g) => g,
            Err(e) => {
                log::warn!("failed to create radial gradient: {:?}", e);
                return;
            }
        };

        for stop in &gradient.stops {
            if let Err(e) = canvas_gradient.add_color_stop(stop.offset as f32, &stop.color.to_css()) {
                log::warn!("failed to add color stop: {:?}", e);
                return;
            }
        }

        self.ctx.set_fill_style_canvas_gradient(&canvas_gradient);
        self.ctx.fill_rect(area.x, area.y, area.width, area.height);
    }
}
