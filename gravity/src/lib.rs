pub mod disk;
pub mod field;

pub use disk::{Disk, Halton, DEFAULT_SAMPLES};
pub use field::Gravity;
