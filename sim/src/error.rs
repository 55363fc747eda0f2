use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    InvalidPrecision { precision: f32 },
    InvalidAngleThreshold { angle: f32 },
    InvalidGravitationalConstant { g: f32 },
    InvalidSampleCount,
    InvalidFarFieldCutoff { cutoff: f32 },
    InvalidParticleCap,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPrecision { precision } => {
                write!(
                    f,
                    "morton precision must be finite and positive (precision: {})",
                    precision
                )
            }
            ConfigError::InvalidAngleThreshold { angle } => {
                write!(
                    f,
                    "angle threshold must be finite, non-negative radians (angle: {})",
                    angle
                )
            }
            ConfigError::InvalidGravitationalConstant { g } => {
                write!(f, "gravitational constant must be finite (G: {})", g)
            }
            ConfigError::InvalidSampleCount => {
                write!(f, "monte carlo sample count must be at least 1")
            }
            ConfigError::InvalidFarFieldCutoff { cutoff } => {
                write!(
                    f,
                    "far-field cutoff must be a positive squared distance (cutoff: {})",
                    cutoff
                )
            }
            ConfigError::InvalidParticleCap => {
                write!(f, "particle cap must be at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
