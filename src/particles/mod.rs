mod orbs;

pub use orbs::{Orb, OrbField, OrbParams, Span};
