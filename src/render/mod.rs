mod canvas2d;
mod palette;
mod recording;
mod scene;
mod surface;

pub use canvas2d::Canvas2dSurface;
pub use palette::{GradientStyle, Palette, Palettes, Theme};
pub use recording::{DrawOp, RecordingSurface};
pub use scene::Scene;
pub use surface::{ColorStop, RadialGradient, Rect, Surface};
