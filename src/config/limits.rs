//! Limits: per-axis travel ranges and the global speed/acceleration clamp.
//!
//! Every value an operator or choreography routine produces passes through
//! one of these tables before it reaches the stepper driver.

use serde::Deserialize;

use crate::rig::Axis;

use super::units::{Degrees, StepConverter, Steps};

/// Allowed travel for one axis, in degrees.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisRange {
    /// Minimum allowed position in degrees.
    #[serde(rename = "min_degrees")]
    pub min: Degrees,

    /// Maximum allowed position in degrees.
    #[serde(rename = "max_degrees")]
    pub max: Degrees,
}

impl AxisRange {
    /// Create a new range.
    pub fn new(min: Degrees, max: Degrees) -> Self {
        Self { min, max }
    }

    /// Check if the range is valid (min < max).
    pub fn is_valid(&self) -> bool {
        self.min.0 < self.max.0
    }

    /// Check if a position is within the range.
    pub fn contains(&self, position: Degrees) -> bool {
        position.0 >= self.min.0 && position.0 <= self.max.0
    }

    /// Constrain a position into the range, replacing out-of-range values
    /// with the nearest bound.
    pub fn clamp(&self, position: Degrees) -> Degrees {
        if position.0 < self.min.0 {
            self.min
        } else if position.0 > self.max.0 {
            self.max
        } else {
            position
        }
    }
}

/// Travel ranges for all three axes.
///
/// Defaults match the chair geometry: the tilt platform reaches ±9.81° in
/// pitch and ±7.94° in roll, the yaw stage ±45°.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisLimitsTable {
    /// Pitch travel range.
    #[serde(default = "default_pitch_range")]
    pub pitch: AxisRange,

    /// Roll travel range.
    #[serde(default = "default_roll_range")]
    pub roll: AxisRange,

    /// Yaw travel range.
    #[serde(default = "default_yaw_range")]
    pub yaw: AxisRange,
}

fn default_pitch_range() -> AxisRange {
    AxisRange::new(Degrees(-9.81), Degrees(9.81))
}

fn default_roll_range() -> AxisRange {
    AxisRange::new(Degrees(-7.94), Degrees(7.94))
}

fn default_yaw_range() -> AxisRange {
    AxisRange::new(Degrees(-45.0), Degrees(45.0))
}

impl Default for AxisLimitsTable {
    fn default() -> Self {
        Self {
            pitch: default_pitch_range(),
            roll: default_roll_range(),
            yaw: default_yaw_range(),
        }
    }
}

impl AxisLimitsTable {
    /// Get the range for an axis.
    pub fn axis(&self, axis: Axis) -> &AxisRange {
        match axis {
            Axis::Pitch => &self.pitch,
            Axis::Roll => &self.roll,
            Axis::Yaw => &self.yaw,
        }
    }
}

/// An axis travel range converted to steps (for runtime use).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLimits {
    /// Minimum position in steps.
    pub min_steps: i64,
    /// Maximum position in steps.
    pub max_steps: i64,
}

impl StepLimits {
    /// Derive step limits from a degree range through the converter.
    pub fn from_range(range: &AxisRange, converter: &StepConverter) -> Self {
        Self {
            min_steps: converter.steps_from_degrees(range.min).value(),
            max_steps: converter.steps_from_degrees(range.max).value(),
        }
    }

    /// Check if a position is within limits.
    pub fn contains(&self, steps: Steps) -> bool {
        steps.0 >= self.min_steps && steps.0 <= self.max_steps
    }

    /// Constrain a position into the limits.
    pub fn clamp(&self, steps: Steps) -> Steps {
        if steps.0 < self.min_steps {
            Steps(self.min_steps)
        } else if steps.0 > self.max_steps {
            Steps(self.max_steps)
        } else {
            steps
        }
    }
}

/// Which bound a clamp landed on, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampBound {
    /// The value was at or below zero and was raised to the minimum.
    Min,
    /// The value exceeded the maximum and was lowered to it.
    Max,
}

/// Result of clamping a speed or acceleration value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamped {
    /// The value actually applied.
    pub value: f32,
    /// The bound applied, or `None` if the input was unchanged.
    pub bound: Option<ClampBound>,
}

/// Global clamp range for commanded speeds and accelerations.
///
/// The rule, applied independently per field: a value at or below zero is
/// raised to the configured minimum, a value above the configured maximum is
/// lowered to it, anything else passes through unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeedRange {
    /// Minimum speed in steps/second.
    #[serde(default = "default_min_speed")]
    pub min_speed: f32,

    /// Maximum speed in steps/second.
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,

    /// Minimum acceleration in steps/second².
    #[serde(default = "default_min_acceleration")]
    pub min_acceleration: f32,

    /// Maximum acceleration in steps/second².
    #[serde(default = "default_max_acceleration")]
    pub max_acceleration: f32,
}

fn default_min_speed() -> f32 {
    1.0
}

fn default_max_speed() -> f32 {
    80_000.0
}

fn default_min_acceleration() -> f32 {
    1.0
}

fn default_max_acceleration() -> f32 {
    10_000.0
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
            min_acceleration: default_min_acceleration(),
            max_acceleration: default_max_acceleration(),
        }
    }
}

impl SpeedRange {
    /// Check if both ranges are valid (0 < min <= max).
    pub fn is_valid(&self) -> bool {
        self.min_speed > 0.0
            && self.min_speed <= self.max_speed
            && self.min_acceleration > 0.0
            && self.min_acceleration <= self.max_acceleration
    }

    /// Clamp a commanded speed.
    pub fn clamp_speed(&self, value: f32) -> Clamped {
        Self::clamp_into(value, self.min_speed, self.max_speed)
    }

    /// Clamp a commanded acceleration.
    pub fn clamp_acceleration(&self, value: f32) -> Clamped {
        Self::clamp_into(value, self.min_acceleration, self.max_acceleration)
    }

    fn clamp_into(value: f32, min: f32, max: f32) -> Clamped {
        if value <= 0.0 || value.is_nan() {
            Clamped {
                value: min,
                bound: Some(ClampBound::Min),
            }
        } else if value > max {
            Clamped {
                value: max,
                bound: Some(ClampBound::Max),
            }
        } else {
            Clamped { value, bound: None }
        }
    }
}
