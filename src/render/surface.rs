use std::cell::RefCell;
use std::rc::Rc;

use crate::math::{Rgba, Vec2, Viewport};

/// One stop of a radial gradient, `offset` in 0..=1 of the radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Gradient from a point (inner radius 0) out to `radius`
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f64,
    pub stops: [ColorStop; 3],
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Whole surface
    pub fn covering(viewport: Viewport) -> Self {
        Self::new(0.0, 0.0, viewport.width, viewport.height)
    }

    /// Square bounding a circle
    pub fn around(center: Vec2, radius: f64) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }
}

/// A 2D drawing target the backdrop paints into each frame
pub trait Surface {
    /// Current drawing-buffer size
    fn size(&self) -> Viewport;

    /// Match the drawing buffer to a new viewport size
    fn resize(&mut self, viewport: Viewport);

    /// Erase everything
    fn clear(&mut self);

    /// Fill `area` with `gradient`. Failure to build the gradient draws nothing.
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, area: Rect);
}

/// Shared handles draw into the same surface
impl<S: Surface + ?Sized> Surface for Rc<RefCell<S>> {
    fn size(&self) -> Viewport {
        self.borrow().size()
    }

    fn resize(&mut self, viewport: Viewport) {
        self.borrow_mut().resize(viewport);
    }

    fn clear(&mut self) {
        self.borrow_mut().clear();
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, area: Rect) {
        self.borrow_mut().fill_radial_gradient(gradient, area);
    }
}
