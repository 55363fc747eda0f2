use crate::error::{ConfigError, ConfigResult};

/// Symplectic integrator selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorKind {
    /// Two force evaluations per step, second order.
    VelocityVerlet,
    /// Three force evaluations per step, fourth order.
    Yoshida4,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Fixed-point scale for Morton encoding. Larger values give finer
    /// spatial resolution and a smaller representable region.
    pub precision: f32,
    /// Barnes-Hut acceptance half-angle in radians. Groups subtending less
    /// than this are treated as point masses; smaller is more accurate and
    /// slower.
    pub angle_threshold: f32,
    pub integrator: IntegratorKind,
    /// Gravitational constant.
    pub g: f32,
    /// Size of the quasi-random disk used for overlapping bodies.
    pub monte_carlo_samples: usize,
    /// Squared distance from the origin beyond which particles are
    /// discarded after a step.
    pub far_field_cutoff: f32,
    /// Inclusive bound on the particle count; pushing past it evicts the
    /// oldest particle.
    pub particle_cap: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            precision: 512.0,
            // tan(7 deg) acceptance.
            angle_threshold: 0.122_173f32,
            integrator: IntegratorKind::VelocityVerlet,
            g: 1.0,
            monte_carlo_samples: gravity::DEFAULT_SAMPLES,
            far_field_cutoff: 5_000.0 * 5_000.0,
            particle_cap: 2_500,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(ConfigError::InvalidPrecision {
                precision: self.precision,
            });
        }
        if !self.angle_threshold.is_finite() || self.angle_threshold < 0.0 {
            return Err(ConfigError::InvalidAngleThreshold {
                angle: self.angle_threshold,
            });
        }
        if !self.g.is_finite() {
            return Err(ConfigError::InvalidGravitationalConstant { g: self.g });
        }
        if self.monte_carlo_samples == 0 {
            return Err(ConfigError::InvalidSampleCount);
        }
        if !self.far_field_cutoff.is_finite() || self.far_field_cutoff <= 0.0 {
            return Err(ConfigError::InvalidFarFieldCutoff {
                cutoff: self.far_field_cutoff,
            });
        }
        if self.particle_cap == 0 {
            return Err(ConfigError::InvalidParticleCap);
        }
        Ok(())
    }
}
