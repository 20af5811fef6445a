//! Headless surface that records draw calls
//!
//! Lets the whole frame pipeline run natively so tests (and non-browser
//! hosts) can inspect exactly what a frame would have painted.

use super::surface::{RadialGradient, Rect, Surface};
use crate::math::Viewport;

/// A recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Viewport),
    Gradient { gradient: RadialGradient, area: Rect },
}

/// Surface that keeps every operation since the last `take_ops`
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Viewport,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(size: Viewport) -> Self {
        Self { size, ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded operations
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Operations of the most recent frame (from the last clear onward)
    pub fn last_frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear(_)))
            .unwrap_or(0);
        &self.ops[start..]
    }

    pub fn gradients(&self) -> impl Iterator<Item = (&RadialGradient, &Rect)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Gradient { gradient, area } => Some((gradient, area)),
            DrawOp::Clear(_) => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport;
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear(self.size));
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, area: Rect) {
        self.ops.push(DrawOp::Gradient {
            gradient: gradient.clone(),
            area,
        });
    }
}
