use thiserror::Error;

// ** ROTATION SOURCE CONFIGURATION ** //

/// Ground speed (m/s) separating "stationary-or-slow" from "moving".
/// Below it the device compass drives rotation, above it the GPS track bearing.
pub const DEFAULT_ROTATION_SPEED_THRESHOLD: f64 = 2.0;
/// Half-width (m/s) of the band around the threshold in which the
/// rotation source is left alone while already rotating.
pub const DEFAULT_HYSTERESIS: f64 = 0.5;

/// Knots to metres per second.
pub const KNOTS_TO_MPS: f64 = 0.514_444;

// ** GPS TRACKER CONFIGURATION ** //

/// Successive fixes closer than this (meters) don't produce a derived bearing.
pub const MIN_BEARING_DISTANCE_M: f64 = 1.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("hysteresis {hysteresis} must be smaller than the rotation speed threshold {threshold}")]
    HysteresisTooWide { threshold: f64, hysteresis: f64 },
}

/// Tuning for the auto-rotate source selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoPanConfig {
    rotation_speed_threshold: f64,
    hysteresis: f64,
}

impl Default for AutoPanConfig {
    fn default() -> Self {
        Self {
            rotation_speed_threshold: DEFAULT_ROTATION_SPEED_THRESHOLD,
            hysteresis: DEFAULT_HYSTERESIS,
        }
    }
}

impl AutoPanConfig {
    pub fn new(rotation_speed_threshold: f64, hysteresis: f64) -> Result<Self, ConfigError> {
        check_value("rotation speed threshold", rotation_speed_threshold)?;
        check_value("hysteresis", hysteresis)?;

        // The lower switching point must stay above zero, or a stopped map
        // would never fall back to the compass.
        let too_wide = if rotation_speed_threshold > 0.0 {
            hysteresis >= rotation_speed_threshold
        } else {
            hysteresis > 0.0
        };
        if too_wide {
            return Err(ConfigError::HysteresisTooWide {
                threshold: rotation_speed_threshold,
                hysteresis,
            });
        }

        Ok(Self {
            rotation_speed_threshold,
            hysteresis,
        })
    }

    pub fn rotation_speed_threshold(&self) -> f64 {
        self.rotation_speed_threshold
    }

    pub fn hysteresis(&self) -> f64 {
        self.hysteresis
    }

    /// Speed a heading-rotated map must exceed to switch to bearing.
    pub fn upper_switch_speed(&self) -> f64 {
        self.rotation_speed_threshold + self.hysteresis
    }

    /// Speed a bearing-rotated map must drop under to switch to heading.
    pub fn lower_switch_speed(&self) -> f64 {
        self.rotation_speed_threshold - self.hysteresis
    }
}

fn check_value(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { name, value });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(())
}
