//! Chair configuration - root configuration structure.

use serde::Deserialize;

use crate::rig::Axis;

use super::choreography::ChoreographyConfig;
use super::drive::DriveConfig;
use super::limits::{AxisLimitsTable, SpeedRange, StepLimits};
use super::units::StepConverter;

/// Kinematics applied to every stepper before the first command, plus the
/// console line rate for the serial glue.
#[derive(Debug, Clone, Deserialize)]
pub struct StartupConfig {
    /// Initial speed for all steppers in steps/second.
    #[serde(default = "default_startup_speed")]
    pub speed_hz: f32,

    /// Initial acceleration for all steppers in steps/second².
    #[serde(default = "default_startup_acceleration")]
    pub acceleration: f32,

    /// Serial console baud rate. The core never opens a UART; the hardware
    /// glue reads this when it does.
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

fn default_startup_speed() -> f32 {
    6000.0
}

fn default_startup_acceleration() -> f32 {
    10_000.0
}

fn default_baud_rate() -> u32 {
    4800
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            speed_hz: default_startup_speed(),
            acceleration: default_startup_acceleration(),
            baud_rate: default_baud_rate(),
        }
    }
}

/// Root configuration structure from TOML.
///
/// Every section has defaults, so an empty document yields the stock chair
/// setup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChairConfig {
    /// Drive train (motor resolution and gearing).
    #[serde(default)]
    pub drive: DriveConfig,

    /// Global speed/acceleration clamp range.
    #[serde(default)]
    pub speed: SpeedRange,

    /// Per-axis travel ranges.
    #[serde(default)]
    pub axes: AxisLimitsTable,

    /// Startup kinematics and console rate.
    #[serde(default)]
    pub startup: StartupConfig,

    /// Choreography tuning tables.
    #[serde(default)]
    pub choreography: ChoreographyConfig,
}

impl ChairConfig {
    /// Build the degree-to-step converter for the drive train.
    pub fn converter(&self) -> StepConverter {
        self.drive.converter()
    }

    /// Derive the step limits for an axis.
    pub fn step_limits(&self, axis: Axis) -> StepLimits {
        StepLimits::from_range(self.axes.axis(axis), &self.converter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Degrees;

    #[test]
    fn test_default_config_matches_chair_geometry() {
        let config = ChairConfig::default();

        assert_eq!(config.drive.total_steps_per_revolution(), 4000);
        assert_eq!(config.axes.pitch.max.value(), 9.81);
        assert_eq!(config.axes.roll.min.value(), -7.94);
        assert_eq!(config.axes.yaw.max.value(), 45.0);
        assert_eq!(config.speed.max_speed, 80_000.0);
        assert_eq!(config.speed.max_acceleration, 10_000.0);
        assert_eq!(config.startup.baud_rate, 4800);
    }

    #[test]
    fn test_step_limits_derive_through_converter() {
        let config = ChairConfig::default();
        let conv = config.converter();

        for axis in Axis::ALL {
            let limits = config.step_limits(axis);
            let range = config.axes.axis(axis);
            assert_eq!(limits.min_steps, conv.steps_from_degrees(range.min).value());
            assert_eq!(limits.max_steps, conv.steps_from_degrees(range.max).value());
            assert!(limits.min_steps < 0);
            assert!(limits.max_steps > 0);
        }
    }

    #[test]
    fn test_pitch_extremes_are_symmetric() {
        let config = ChairConfig::default();
        let conv = config.converter();

        let up = conv.steps_from_degrees(Degrees(9.81)).value();
        let down = conv.steps_from_degrees(Degrees(-9.81)).value();
        assert_eq!(up, 109);
        assert_eq!(down, -109);
    }
}
