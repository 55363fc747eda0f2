pub mod config;
pub mod error;
pub mod integrator;
pub mod world;

pub use config::{IntegratorKind, SimConfig};
pub use error::ConfigError;
pub use integrator::{Integrator, Verlet, Yoshida4};
pub use world::{StepStatus, World};
