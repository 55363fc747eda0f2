pub mod kahan;
pub mod shapes;

pub use kahan::Kahan;
pub use shapes::{Circle, Particle, DVec2, Vec2};
