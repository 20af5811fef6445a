mod vec2;
mod color;

pub use vec2::{Vec2, Viewport};
pub use color::Rgba;
