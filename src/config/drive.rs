//! Drive train configuration: motor resolution and gearing.

use serde::Deserialize;

use super::units::{Microsteps, StepConverter};

/// Stepper drive train shared by all three axes.
///
/// Defaults describe the chair hardware: 200-step motors quarter-stepped
/// behind 5:1 gearboxes, 0.09 degrees of output per step.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveConfig {
    /// Base steps per motor revolution (typically 200 for 1.8° motors).
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u16,

    /// Microstep setting (1, 2, 4, 8, 16, 32, etc.).
    #[serde(default = "default_microsteps")]
    pub microsteps: Microsteps,

    /// Gear ratio (output:input, e.g., 5.0 means 5:1 reduction).
    #[serde(default = "default_gear_ratio")]
    pub gear_ratio: f32,
}

fn default_steps_per_revolution() -> u16 {
    200
}

fn default_microsteps() -> Microsteps {
    Microsteps::QUARTER
}

fn default_gear_ratio() -> f32 {
    5.0
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: default_steps_per_revolution(),
            microsteps: default_microsteps(),
            gear_ratio: default_gear_ratio(),
        }
    }
}

impl DriveConfig {
    /// Motor steps per motor revolution, including microstepping.
    pub fn motor_steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution as u32 * self.microsteps.value() as u32
    }

    /// Total steps per output shaft revolution (steps × microsteps × gear ratio).
    pub fn total_steps_per_revolution(&self) -> u32 {
        (self.motor_steps_per_revolution() as f32 * self.gear_ratio) as u32
    }

    /// Build the degree-to-step converter for this drive train.
    pub fn converter(&self) -> StepConverter {
        StepConverter::new(self.gear_ratio, self.motor_steps_per_revolution())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_drive_resolution() {
        let drive = DriveConfig::default();

        // 200 * 4 = 800 motor steps, * 5.0 gear = 4000 per output rev
        assert_eq!(drive.motor_steps_per_revolution(), 800);
        assert_eq!(drive.total_steps_per_revolution(), 4000);
        assert!((drive.converter().degrees_per_step() - 0.09).abs() < 1e-6);
    }

    #[test]
    fn test_custom_drive() {
        let drive = DriveConfig {
            steps_per_revolution: 400,
            microsteps: Microsteps::EIGHTH,
            gear_ratio: 2.0,
        };

        assert_eq!(drive.total_steps_per_revolution(), 6400);
    }
}
