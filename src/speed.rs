use std::fmt;

use crate::config::{AutoPanConfig, KNOTS_TO_MPS};
use crate::mode::RotationSource;

/// GPS-derived ground speed in metres per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Speed {
    Known(f64),
    /// Stale or invalid reading.
    #[default]
    Unknown,
}

impl From<f64> for Speed {
    fn from(value: f64) -> Self {
        // Location services report a negative speed when it is invalid.
        if value.is_finite() && value >= 0.0 {
            Speed::Known(value)
        } else {
            Speed::Unknown
        }
    }
}

impl From<Option<f64>> for Speed {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Speed::Unknown, Speed::from)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Known(v) => write!(f, "{:.2} m/s", v),
            Speed::Unknown => write!(f, "unknown"),
        }
    }
}

impl Speed {
    pub fn from_knots(knots: f64) -> Self {
        Speed::from(knots * KNOTS_TO_MPS)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Speed::Known(v) => Some(*v),
            Speed::Unknown => None,
        }
    }

    /// Rotation source to use when auto-rotate is first switched on.
    pub fn initial_rotation_source(&self, config: &AutoPanConfig) -> RotationSource {
        match self {
            Speed::Known(v) if *v > config.rotation_speed_threshold() => RotationSource::Bearing,
            _ => RotationSource::Heading,
        }
    }

    /// Rotation source to use while already rotating by `current`.
    ///
    /// Only leaves `current` once the speed is clear of the hysteresis band,
    /// so readings hovering around the threshold don't flip the map back and
    /// forth. A stale reading falls back to the compass.
    pub fn rotation_source_from(
        &self,
        current: RotationSource,
        config: &AutoPanConfig,
    ) -> RotationSource {
        match (current, self) {
            (_, Speed::Unknown) => RotationSource::Heading,
            (RotationSource::Heading, Speed::Known(v)) if *v > config.upper_switch_speed() => {
                RotationSource::Bearing
            }
            (RotationSource::Bearing, Speed::Known(v)) if *v < config.lower_switch_speed() => {
                RotationSource::Heading
            }
            (current, Speed::Known(_)) => current,
        }
    }
}
